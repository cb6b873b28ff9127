pub mod flappy;
pub mod snake;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::audio::Audio;
use crate::engine::GameState;
use crate::input::Command;

/// Keys that start a new round, as shown in help lines.
pub const RESTART_KEYS: &str = "C/R";

pub trait Game {
    /// Advance by `frames` logical frames at this game's frame rate.
    fn update(&mut self, frames: u32, audio: &mut dyn Audio);
    fn handle_command(&mut self, cmd: Command, audio: &mut dyn Audio);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    /// Put the world (actor, obstacles, score) back to its starting layout.
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn best_score(&self) -> u32;
    fn state(&self) -> GameState;
    /// Frame rate the loop should run at right now.
    fn fps(&self) -> u32;

    fn is_game_over(&self) -> bool {
        self.state() == GameState::GameOver
    }
}

/// Drawn in place of a playfield that cannot fit `area`.
pub fn render_too_small(frame: &mut Frame, area: Rect, need: (u16, u16)) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Terminal too small",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("need {}x{} for the field, have {}x{}", need.0, need.1, area.width, area.height),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
