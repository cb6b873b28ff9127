use crate::audio::Audio;
use crate::context::GameContext;
use crate::games::flappy::Flappy;
use crate::games::snake::SnakeGame;
use crate::games::Game;
use crate::input::{Command, Direction};

const GAME_COUNT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Home,
    Flappy,
    Snake,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Flappy, Tab::Snake]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Flappy => " Flappy ",
            Tab::Snake => " Snake ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Flappy => 1,
            Tab::Snake => 2,
        }
    }

    /// Tab for a home-screen tile.
    fn for_game(idx: usize) -> Option<Tab> {
        match idx {
            0 => Some(Tab::Flappy),
            1 => Some(Tab::Snake),
            _ => None,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize, // tile highlighted on the home screen
    pub flappy: Flappy,
    pub snake: SnakeGame,
}

impl App {
    pub fn new(ctx: &GameContext) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            flappy: Flappy::new(ctx.sprites.clone(), ctx.config.flappy.fps, ctx.rng(1)),
            snake: SnakeGame::new(ctx.config.snake.base_fps, ctx.rng(2)),
        }
    }

    fn active_game(&mut self) -> Option<&mut dyn Game> {
        match self.current_tab {
            Tab::Home => None,
            Tab::Flappy => Some(&mut self.flappy as &mut dyn Game),
            Tab::Snake => Some(&mut self.snake as &mut dyn Game),
        }
    }

    /// Frame rate the clock should run at for whatever is on screen.
    pub fn target_fps(&self) -> u32 {
        match self.current_tab {
            Tab::Home | Tab::Flappy => self.flappy.fps(),
            Tab::Snake => self.snake.fps(),
        }
    }

    pub fn on_tick(&mut self, frames: u32, audio: &mut dyn Audio) {
        if let Some(game) = self.active_game() {
            game.update(frames, audio);
        }
    }

    pub fn on_command(&mut self, cmd: Command, audio: &mut dyn Audio) {
        // Global commands
        match cmd {
            Command::Quit => {
                self.should_quit = true;
                return;
            }
            Command::NextTab => {
                self.next_tab();
                return;
            }
            Command::PrevTab => {
                self.prev_tab();
                return;
            }
            Command::Back => {
                if self.current_tab != Tab::Home {
                    self.switch_to(Tab::Home);
                }
                return;
            }
            _ => {}
        }

        if self.current_tab == Tab::Home {
            self.on_home_command(cmd);
            return;
        }

        // Forward to active game
        if let Some(game) = self.active_game() {
            game.handle_command(cmd, audio);
        }
    }

    fn on_home_command(&mut self, cmd: Command) {
        match cmd {
            Command::Select(idx) => {
                if let Some(tab) = Tab::for_game(idx) {
                    self.switch_to(tab);
                }
            }
            Command::Steer(Direction::Right) | Command::Steer(Direction::Down) => {
                self.selected_game = (self.selected_game + 1) % GAME_COUNT;
            }
            Command::Steer(Direction::Left) | Command::Steer(Direction::Up) => {
                self.selected_game = (self.selected_game + GAME_COUNT - 1) % GAME_COUNT;
            }
            Command::Confirm => {
                if let Some(tab) = Tab::for_game(self.selected_game) {
                    self.switch_to(tab);
                }
            }
            _ => {}
        }
    }

    fn switch_to(&mut self, tab: Tab) {
        if tab != self.current_tab {
            log::info!("switched to {}", tab.title().trim());
            self.current_tab = tab;
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
