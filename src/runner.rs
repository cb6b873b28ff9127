use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::app::App;
use crate::context::GameContext;
use crate::engine::TimeSource;
use crate::error::AppError;
use crate::event::KeySource;
use crate::input::command_for;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// One pass of the loop: wait for the frame boundary, apply the keys that
/// arrived meanwhile in order, then advance the active game and redraw.
/// A quit ends the pass at once, so the world and the screen stay as they
/// were.
pub fn step<S, B>(
    terminal: &mut Terminal<B>,
    source: &mut S,
    ctx: &mut GameContext,
    app: &mut App,
) -> Result<Step, AppError>
where
    S: TimeSource + KeySource,
    B: Backend,
{
    let frames = ctx.clock.tick(source)?;

    for key in source.drain_keys() {
        if let Some(cmd) = command_for(key) {
            app.on_command(cmd, ctx.audio.as_mut());
            if app.should_quit {
                return Ok(Step::Quit);
            }
        }
    }

    app.on_tick(frames, ctx.audio.as_mut());
    ctx.clock.set_fps(app.target_fps());

    terminal.draw(|frame| ui::render(frame, app))?;
    Ok(Step::Continue)
}

pub fn run<S, B>(
    terminal: &mut Terminal<B>,
    source: &mut S,
    ctx: &mut GameContext,
    app: &mut App,
) -> Result<(), AppError>
where
    S: TimeSource + KeySource,
    B: Backend,
{
    while step(terminal, source, ctx, app)? == Step::Continue {}
    Ok(())
}
