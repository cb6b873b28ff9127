pub mod home;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, Tab};
use crate::games::Game;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),   // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Home => home::render_home(
            frame,
            chunks[1],
            app.selected_game,
            [app.flappy.best_score(), app.snake.best_score()],
        ),
        Tab::Flappy => app.flappy.render(frame, chunks[1]),
        Tab::Snake => app.snake.render(frame, chunks[1]),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;
    use crate::audio::RecordingAudio;
    use crate::config::Config;
    use crate::context::GameContext;
    use crate::games::flappy::{BIRD_SIZE, WIN_HEIGHT};
    use crate::games::snake::{Apple, Snake, APPLE_COLOR};
    use crate::input::{Command, Direction};

    fn app() -> App {
        let config = Config {
            seed: Some(5),
            ..Config::default()
        };
        App::new(&GameContext::with_audio(config, Box::new(RecordingAudio::new())).unwrap())
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn half_block_with(buf: &Buffer, colors: &[Color]) -> bool {
        buf.content()
            .iter()
            .any(|c| c.symbol() == "▀" && (colors.contains(&c.fg) || colors.contains(&c.bg)))
    }

    #[test]
    fn test_flappy_bird_near_floor_visible_at_80x24() {
        let mut app = app();
        let mut audio = RecordingAudio::new();
        app.on_command(Command::Select(0), &mut audio);
        app.on_command(Command::Confirm, &mut audio);
        app.flappy.bird_mut().y = 50.0;
        app.flappy.bird_mut().ms_to_climb = 0.0;

        let sprites = app.flappy.sprites();
        let mut bird_colors = Vec::new();
        for sprite in [&sprites.bird_wing_up, &sprites.bird_wing_down] {
            for y in 0..sprite.height() {
                for x in 0..sprite.width() {
                    bird_colors.extend(sprite.get(x, y));
                }
            }
        }
        assert!(50 + BIRD_SIZE < WIN_HEIGHT);

        let buf = draw(&mut app, 80, 24);
        assert!(half_block_with(&buf, &bird_colors));
        assert!(!text(&buf).contains("Terminal too small"));
    }

    #[test]
    fn test_snake_bottom_row_visible_at_80x24() {
        let mut app = app();
        let mut audio = RecordingAudio::new();
        app.on_command(Command::Select(1), &mut audio);
        app.on_command(Command::Confirm, &mut audio);
        app.snake
            .set_board(Snake::from_cells(&[(5, 5)], Direction::Right), Apple { cell: (20, 18) });

        let buf = draw(&mut app, 80, 24);
        assert!(half_block_with(&buf, &[APPLE_COLOR]));
        assert!(!text(&buf).contains("Terminal too small"));
    }

    #[test]
    fn test_tiny_terminal_gets_notice() {
        let mut app = app();
        let mut audio = RecordingAudio::new();
        app.on_command(Command::Select(0), &mut audio);
        let buf = draw(&mut app, 40, 12);
        assert!(text(&buf).contains("Terminal too small"));

        app.on_command(Command::Back, &mut audio);
        app.on_command(Command::Select(1), &mut audio);
        let buf = draw(&mut app, 40, 12);
        assert!(text(&buf).contains("Terminal too small"));
    }

    #[test]
    fn test_game_over_hint_names_restart_keys() {
        let mut app = app();
        let mut audio = RecordingAudio::new();
        app.on_command(Command::Select(0), &mut audio);
        app.on_command(Command::Confirm, &mut audio);
        app.flappy.bird_mut().y = 60.0;
        app.flappy.bird_mut().ms_to_climb = 0.0;
        app.on_tick(1, &mut audio);
        assert!(app.flappy.is_game_over());
        // Past the 1500 ms freeze
        app.on_tick(90, &mut audio);

        let screen = text(&draw(&mut app, 80, 24));
        assert!(screen.contains("C/R Play again"));
    }
}
