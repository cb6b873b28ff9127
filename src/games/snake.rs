use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::audio::{Audio, Cue};
use crate::canvas::PixelCanvas;
use crate::engine::collision::{self, cell_in_bounds};
use crate::engine::{Bounds, Elapsed, Entity, GameState, ScoreState, Session, Shape};
use crate::games::{render_too_small, Game, RESTART_KEYS};
use crate::input::{Command, Direction};

pub type Cell = (i32, i32);

// Board size in cells, wall ring included.
pub const GRID_W: i32 = 30;
pub const GRID_H: i32 = 20;
pub const PLAY_MIN: Cell = (1, 1);
pub const PLAY_MAX: Cell = (GRID_W - 2, GRID_H - 2);

const FPS_STEP: u32 = 2;
const RAMP_EVERY: u32 = 5;
const GAME_OVER_FREEZE_MS: f64 = 1000.0;

const WALL_COLOR: Color = Color::Rgb(90, 90, 110);
const HEAD_COLOR: Color = Color::Rgb(120, 255, 120);
const BODY_COLOR: Color = Color::Rgb(40, 180, 40);
pub const APPLE_COLOR: Color = Color::Rgb(230, 40, 40);
const FLOOR_COLOR: Color = Color::Rgb(25, 25, 35);

/// Frame rate for a score: two frames faster every time the snake's
/// length reaches a multiple of five.
pub fn snake_fps(base_fps: u32, score: u32) -> u32 {
    base_fps + FPS_STEP * ((score + 1) / RAMP_EVERY)
}

/// Body trail (front = head) with a per-cell occupancy count.
#[derive(Clone, Debug)]
pub struct Snake {
    heading: Direction,
    // Holds still until the first direction key.
    moving: bool,
    trail: VecDeque<Cell>,
    occupancy: HashMap<Cell, u32>,
    target_len: usize,
    bit_itself: bool,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        let mut snake = Self {
            heading: Direction::Right,
            moving: false,
            trail: VecDeque::new(),
            occupancy: HashMap::new(),
            target_len: 1,
            bit_itself: false,
        };
        snake.occupy(head);
        snake.trail.push_front(head);
        snake
    }

    /// A moving snake laid out head first.
    pub fn from_cells(cells: &[Cell], heading: Direction) -> Self {
        let mut snake = Self {
            heading,
            moving: true,
            trail: VecDeque::new(),
            occupancy: HashMap::new(),
            target_len: cells.len().max(1),
            bit_itself: false,
        };
        for &cell in cells {
            snake.occupy(cell);
            snake.trail.push_back(cell);
        }
        snake
    }

    pub fn head(&self) -> Cell {
        self.trail.front().copied().unwrap_or_default()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.trail.iter()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupancy.get(&cell).is_some_and(|n| *n > 0)
    }

    pub fn bit_itself(&self) -> bool {
        self.bit_itself
    }

    /// One more cell of length, added over the next step.
    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    /// Any direction is accepted, reversal included.
    pub fn steer(&mut self, dir: Direction) {
        self.heading = dir;
        self.moving = true;
    }

    // Returns the count the cell had before this insertion.
    fn occupy(&mut self, cell: Cell) -> u32 {
        let count = self.occupancy.entry(cell).or_insert(0);
        let before = *count;
        *count += 1;
        before
    }

    fn vacate(&mut self, cell: Cell) {
        if let Some(count) = self.occupancy.get_mut(&cell) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.occupancy.remove(&cell);
            }
        }
    }

    /// Move one cell along the heading. The tail leaves before the head
    /// arrives, so chasing the tail is safe.
    pub fn step(&mut self) {
        if !self.moving || self.bit_itself {
            return;
        }
        let (dx, dy) = self.heading.delta();
        let head = self.head();
        let next = (head.0 + dx, head.1 + dy);

        while self.trail.len() >= self.target_len {
            let Some(tail) = self.trail.pop_back() else { break };
            self.vacate(tail);
        }

        if self.occupy(next) >= 1 {
            self.bit_itself = true;
        }
        self.trail.push_front(next);
    }
}

impl Entity for Snake {
    fn update(&mut self, elapsed: Elapsed) {
        for _ in 0..elapsed.frames {
            self.step();
        }
    }

    fn bounds(&self) -> Bounds {
        let (x, y) = self.head();
        Bounds::new(x as f64, y as f64, 1.0, 1.0)
    }

    fn collision_shape(&self) -> Shape<'_> {
        let (x, y) = self.head();
        Shape::Cell(x, y)
    }
}

/// The consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Apple {
    pub cell: Cell,
}

impl Apple {
    /// Uniformly random playable cell the snake does not cover. `None`
    /// when the board is full.
    pub fn place(rng: &mut StdRng, snake: &Snake) -> Option<Apple> {
        let free: Vec<Cell> = (PLAY_MIN.1..=PLAY_MAX.1)
            .flat_map(|y| (PLAY_MIN.0..=PLAY_MAX.0).map(move |x| (x, y)))
            .filter(|cell| !snake.occupies(*cell))
            .collect();
        free.choose(rng).map(|&cell| Apple { cell })
    }
}

impl Entity for Apple {
    // Apples never move on their own.
    fn update(&mut self, _elapsed: Elapsed) {}

    fn bounds(&self) -> Bounds {
        Bounds::new(self.cell.0 as f64, self.cell.1 as f64, 1.0, 1.0)
    }

    fn collision_shape(&self) -> Shape<'_> {
        Shape::Cell(self.cell.0, self.cell.1)
    }
}

pub struct SnakeGame {
    snake: Snake,
    apple: Apple,
    score: ScoreState,
    session: Session,
    rng: StdRng,
    base_fps: u32,
}

impl SnakeGame {
    pub fn start_cell() -> Cell {
        (GRID_W / 2, GRID_H / 2)
    }

    pub fn new(base_fps: u32, mut rng: StdRng) -> Self {
        let snake = Snake::new(Self::start_cell());
        let apple = Apple::place(&mut rng, &snake).unwrap_or(Apple { cell: PLAY_MIN });
        Self {
            snake,
            apple,
            score: ScoreState::new(),
            session: Session::new(),
            rng,
            base_fps: base_fps.max(1),
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Apple {
        self.apple
    }

    /// Replace the board layout (used to stage scenarios).
    pub fn set_board(&mut self, snake: Snake, apple: Apple) {
        self.snake = snake;
        self.apple = apple;
    }

    fn restart(&mut self) {
        if self.session.restart() {
            self.reset();
            log::info!("snake restarted");
        }
    }

    fn game_over(&mut self, audio: &mut dyn Audio, reason: &str) {
        if self.session.end(GAME_OVER_FREEZE_MS) {
            audio.stop();
            audio.play(Cue::GameOver);
            log::info!("snake game over ({}), score {}", reason, self.score.score());
        }
    }

    fn eat(&mut self, audio: &mut dyn Audio) {
        let before = self.fps();
        let score = self.score.increment();
        self.snake.grow();
        audio.play(Cue::Score);
        if self.fps() != before {
            log::info!("snake score {}, speed now {} fps", score, self.fps());
        }
        match Apple::place(&mut self.rng, &self.snake) {
            Some(apple) => self.apple = apple,
            None => self.game_over(audio, "board full"),
        }
    }

    fn head_color(&self) -> Color {
        if self.snake.bit_itself() {
            Color::Red
        } else {
            HEAD_COLOR
        }
    }

    fn cell_color(&self, cell: Cell) -> Color {
        if !cell_in_bounds(cell, PLAY_MIN, PLAY_MAX) {
            WALL_COLOR
        } else if cell == self.snake.head() {
            self.head_color()
        } else if self.snake.occupies(cell) {
            BODY_COLOR
        } else if cell == self.apple.cell {
            APPLE_COLOR
        } else {
            FLOOR_COLOR
        }
    }

    fn cell_spans(&self, x: i32, y: i32) -> Span<'static> {
        if !cell_in_bounds((x, y), PLAY_MIN, PLAY_MAX) {
            return Span::styled("▒▒", Style::default().fg(WALL_COLOR));
        }
        if (x, y) == self.snake.head() {
            let ch = match self.snake.heading() {
                Direction::Up => "▲▲",
                Direction::Down => "▼▼",
                Direction::Left => "◀◀",
                Direction::Right => "▶▶",
            };
            return Span::styled(ch, Style::default().fg(self.head_color()).add_modifier(Modifier::BOLD));
        }
        if self.snake.occupies((x, y)) {
            return Span::styled("██", Style::default().fg(BODY_COLOR));
        }
        if (x, y) == self.apple.cell {
            return Span::styled("● ", Style::default().fg(APPLE_COLOR).add_modifier(Modifier::BOLD));
        }
        Span::styled("· ", Style::default().fg(Color::Rgb(50, 50, 60)))
    }

    /// Two columns per cell when the whole board fits. Otherwise one
    /// half-block pixel per cell, scaled up to the area. `None` when not
    /// every cell can be shown.
    fn render_board(&self, width: usize, height: usize) -> Option<Vec<Line<'static>>> {
        let (w, h) = (GRID_W as usize, GRID_H as usize);
        if width >= 2 * w && height >= h {
            let lines = (0..GRID_H)
                .map(|y| Line::from((0..GRID_W).map(|x| self.cell_spans(x, y)).collect::<Vec<_>>()))
                .collect();
            return Some(lines);
        }
        if width < w || height * 2 < h {
            return None;
        }

        let mut canvas = PixelCanvas::new(w, h, FLOOR_COLOR);
        for y in 0..GRID_H {
            for x in 0..GRID_W {
                canvas.set(x, y, self.cell_color((x, y)));
            }
        }
        Some(canvas.present(width, height))
    }
}

impl Game for SnakeGame {
    fn update(&mut self, frames: u32, audio: &mut dyn Audio) {
        let fps = self.fps();
        match self.session.state() {
            GameState::GameOver => {
                self.session.advance_freeze(Elapsed::new(frames, fps).ms);
                return;
            }
            GameState::Playing => {}
            GameState::Intro | GameState::Paused => return,
        }

        // One cell per elapsed frame, checking after every step
        for _ in 0..frames {
            self.snake.update(Elapsed::new(1, fps));

            if self.snake.bit_itself() {
                self.game_over(audio, "ran into itself");
                return;
            }
            if !cell_in_bounds(self.snake.head(), PLAY_MIN, PLAY_MAX) {
                self.game_over(audio, "hit the wall");
                return;
            }
            if collision::collides(&self.snake, &self.apple) {
                self.eat(audio);
                if self.session.state() != GameState::Playing {
                    return;
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command, _audio: &mut dyn Audio) {
        match cmd {
            Command::Restart => self.restart(),
            Command::TogglePause => {
                if self.session.toggle_pause() {
                    log::info!("snake {}", self.session.state().label());
                }
            }
            Command::Steer(dir) => match self.session.state() {
                GameState::Intro => {
                    self.session.start();
                    log::info!("snake started");
                    self.snake.steer(dir);
                }
                GameState::Playing => self.snake.steer(dir),
                _ => {}
            },
            Command::Confirm => match self.session.state() {
                GameState::Intro => {
                    self.session.start();
                    log::info!("snake started");
                }
                GameState::GameOver => self.restart(),
                _ => {}
            },
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 200, 120)))
            .title(" 🐍 Snake ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(120, 255, 120))
                    .add_modifier(Modifier::BOLD),
            );

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(
                format!(" Score: {:03} ", self.score.score()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("Best: {:03} ", self.score.best()), Style::default().fg(Color::Cyan)),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("⚡ {} fps ", self.fps()), Style::default().fg(Color::Green)),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        match self.render_board(chunks[1].width as usize, chunks[1].height as usize) {
            Some(lines) => frame.render_widget(Paragraph::new(lines), chunks[1]),
            None => render_too_small(frame, chunks[1], (GRID_W as u16, (GRID_H as u16).div_ceil(2))),
        }

        let help = match self.session.state() {
            GameState::GameOver if self.session.is_frozen() => Line::from(Span::styled(
                format!(" GAME OVER :) Your Score: {}", self.score.score()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            GameState::GameOver => Line::from(vec![
                Span::styled(
                    format!(" GAME OVER :) Your Score: {} │ ", self.score.score()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{} Play again │ Esc Menu │ Q Quit", RESTART_KEYS), Style::default().fg(Color::Rgb(0, 255, 255))),
            ]),
            GameState::Intro => Line::from(vec![
                Span::styled(
                    " ▶ Press SPACE to PLAY! ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("↑↓←→ Steer │ P Pause │ {} Restart │ Esc Menu", RESTART_KEYS), Style::default().fg(Color::DarkGray)),
            ]),
            GameState::Paused => Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            GameState::Playing => Line::from(Span::styled(
                format!(" ↑↓←→ Steer │ P Pause │ {} Restart │ Esc Menu", RESTART_KEYS),
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn reset(&mut self) {
        self.score.reset();
        self.snake = Snake::new(Self::start_cell());
        if let Some(apple) = Apple::place(&mut self.rng, &self.snake) {
            self.apple = apple;
        }
    }

    fn get_score(&self) -> u32 {
        self.score.score()
    }

    fn best_score(&self) -> u32 {
        self.score.best()
    }

    fn state(&self) -> GameState {
        self.session.state()
    }

    fn fps(&self) -> u32 {
        snake_fps(self.base_fps, self.score.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use rand::SeedableRng;

    fn game() -> SnakeGame {
        SnakeGame::new(15, StdRng::seed_from_u64(11))
    }

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.cells().copied().collect()
    }

    #[test]
    fn test_step_pops_tail() {
        let mut snake = Snake::from_cells(&[(5, 5), (5, 4), (5, 3)], Direction::Down);
        snake.step();
        assert!(!snake.bit_itself());
        assert_eq!(cells(&snake), vec![(5, 6), (5, 5), (5, 4)]);
        assert!(!snake.occupies((5, 3)));
    }

    #[test]
    fn test_step_into_body_collides() {
        let mut snake = Snake::from_cells(&[(5, 5), (5, 4), (5, 3)], Direction::Down);
        snake.steer(Direction::Up);
        snake.step();
        assert!(snake.bit_itself());
    }

    #[test]
    fn test_tail_chasing_is_safe() {
        // Square loop: head moves into the cell the tail is leaving
        let mut snake = Snake::from_cells(&[(2, 1), (1, 1), (1, 2), (2, 2)], Direction::Down);
        snake.step();
        assert!(!snake.bit_itself());
        assert_eq!(snake.head(), (2, 2));
    }

    #[test]
    fn test_growth_skips_one_pop() {
        let mut snake = Snake::from_cells(&[(5, 5), (4, 5)], Direction::Right);
        snake.grow();
        snake.step();
        assert_eq!(snake.len(), 3);
        snake.step();
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_idle_until_first_steer() {
        let mut snake = Snake::new((15, 10));
        snake.step();
        assert_eq!(snake.head(), (15, 10));
        snake.steer(Direction::Left);
        snake.step();
        assert_eq!(snake.head(), (14, 10));
    }

    #[test]
    fn test_apple_never_under_snake() {
        let mut rng = StdRng::seed_from_u64(5);
        let body: Vec<Cell> = (1..=28).map(|x| (x, 1)).collect();
        let snake = Snake::from_cells(&body, Direction::Left);
        for _ in 0..200 {
            let apple = Apple::place(&mut rng, &snake).unwrap();
            assert!(!snake.occupies(apple.cell));
            assert!(cell_in_bounds(apple.cell, PLAY_MIN, PLAY_MAX));
        }
    }

    #[test]
    fn test_fps_ramp() {
        assert_eq!(snake_fps(15, 0), 15);
        assert_eq!(snake_fps(15, 3), 15);
        assert_eq!(snake_fps(15, 4), 17);
        assert_eq!(snake_fps(15, 9), 19);
    }

    #[test]
    fn test_eating_scores_once() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Confirm, &mut audio);
        g.set_board(Snake::from_cells(&[(5, 5)], Direction::Right), Apple { cell: (6, 5) });
        g.update(1, &mut audio);
        assert_eq!(g.get_score(), 1);
        assert_ne!(g.apple().cell, (6, 5));
        // Park the new apple out of the way before moving on
        let snake = g.snake().clone();
        g.set_board(snake, Apple { cell: (1, 1) });
        g.update(1, &mut audio);
        assert_eq!(g.get_score(), 1);
        assert_eq!(audio.count(Cue::Score), 1);
        assert_eq!(g.snake().len(), 2);
    }

    #[test]
    fn test_wall_ends_game() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Steer(Direction::Up), &mut audio);
        assert_eq!(g.state(), GameState::Playing);
        // Start row is 10; the wall is row 0
        g.update(9, &mut audio);
        assert_eq!(g.state(), GameState::Playing);
        g.update(1, &mut audio);
        assert!(g.is_game_over());
        assert_eq!(audio.count(Cue::GameOver), 1);
    }

    #[test]
    fn test_last_direction_in_a_tick_wins() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Confirm, &mut audio);
        g.set_board(Snake::from_cells(&[(10, 10)], Direction::Right), Apple { cell: (1, 1) });
        g.handle_command(Command::Steer(Direction::Up), &mut audio);
        g.handle_command(Command::Steer(Direction::Left), &mut audio);
        g.update(1, &mut audio);
        assert_eq!(g.snake().head(), (9, 10));
    }

    #[test]
    fn test_filling_the_board_ends_game() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Confirm, &mut audio);

        // Serpentine over every playable cell; the first cell is the apple
        let path: Vec<Cell> = (PLAY_MIN.1..=PLAY_MAX.1)
            .flat_map(|y| {
                let row: Vec<Cell> = (PLAY_MIN.0..=PLAY_MAX.0).map(|x| (x, y)).collect();
                if (y - PLAY_MIN.1) % 2 == 0 {
                    row
                } else {
                    row.into_iter().rev().collect()
                }
            })
            .collect();
        assert_eq!(path[0], (1, 1));
        let mut snake = Snake::from_cells(&path[1..], Direction::Left);
        // Keep the tail in place so the last free cell gets covered
        snake.grow();
        g.set_board(snake, Apple { cell: path[0] });

        g.update(1, &mut audio);
        assert_eq!(g.snake().len(), path.len());
        assert_eq!(g.get_score(), 1);
        assert!(g.is_game_over());
        assert_eq!(audio.count(Cue::GameOver), 1);
        assert!(Apple::place(&mut StdRng::seed_from_u64(1), g.snake()).is_none());
    }
}
