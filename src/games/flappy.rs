use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::assets::{Sprite, SpriteSet};
use crate::audio::{Audio, Cue};
use crate::canvas::PixelCanvas;
use crate::engine::collision::{hits_any, out_of_vertical_bounds};
use crate::engine::spawn::ramped_interval;
use crate::engine::{ActiveSet, Bounds, Elapsed, Entity, GameState, Mask, ScoreState, Session, Shape, SpawnScheduler};
use crate::games::{render_too_small, Game, RESTART_KEYS};
use crate::input::{Command, Direction};

// World size in pixels. Rendered with half blocks: WIN_WIDTH columns,
// WIN_HEIGHT / 2 rows.
pub const WIN_WIDTH: usize = 72;
pub const WIN_HEIGHT: usize = 64;

pub const BIRD_SIZE: usize = 6;
pub const PIPE_WIDTH: usize = 10;
pub const PIECE_HEIGHT: usize = 4;

// Speeds are in px per ms of game time.
pub const ANIMATION_SPEED: f64 = 0.03;
pub const SINK_SPEED: f64 = 0.0225;
/// Average ascent speed over one complete climb.
pub const CLIMB_SPEED: f64 = 0.0375;
pub const CLIMB_DURATION: f64 = 333.3;

pub const ADD_INTERVAL_MS: f64 = 2000.0;
pub const MIN_ADD_INTERVAL_MS: f64 = 1750.0;
const ADD_INTERVAL_STEP_MS: f64 = 200.0;
const RAMP_EVERY: u32 = 5;

const GAME_OVER_FREEZE_MS: f64 = 1500.0;
const WING_PERIOD_MS: f64 = 500.0;
const INITIAL_MS_TO_CLIMB: f64 = 2.0;
// Smallest drawn size: a quarter scale, 18x8 terminal cells.
const MIN_FIELD_SCALE: f64 = 0.25;
const MIN_FIELD_CELLS: (u16, u16) = ((WIN_WIDTH / 4) as u16, (WIN_HEIGHT / 8) as u16);

pub fn add_interval(score: u32) -> f64 {
    ramped_interval(score, ADD_INTERVAL_MS, ADD_INTERVAL_STEP_MS, RAMP_EVERY, MIN_ADD_INTERVAL_MS)
}

/// The player. Climbs along a cosine ease after a flap, sinks otherwise.
#[derive(Clone, Debug)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Time left in the current climb; <= 0 means falling.
    pub ms_to_climb: f64,
    anim_ms: f64,
    wing_up: Mask,
    wing_down: Mask,
}

impl Bird {
    pub fn new(sprites: &SpriteSet) -> Self {
        Self {
            x: (WIN_WIDTH / 4) as f64,
            y: (WIN_HEIGHT / 2 - BIRD_SIZE / 2) as f64,
            ms_to_climb: INITIAL_MS_TO_CLIMB,
            anim_ms: 0.0,
            wing_up: sprites.bird_wing_up.mask(),
            wing_down: sprites.bird_wing_down.mask(),
        }
    }

    /// Restart the climb curve from the beginning.
    pub fn flap(&mut self) {
        self.ms_to_climb = CLIMB_DURATION;
    }

    pub fn wing_up(&self) -> bool {
        self.anim_ms % WING_PERIOD_MS <= WING_PERIOD_MS / 2.0
    }

    fn mask(&self) -> &Mask {
        if self.wing_up() {
            &self.wing_up
        } else {
            &self.wing_down
        }
    }
}

impl Entity for Bird {
    fn update(&mut self, elapsed: Elapsed) {
        let e = elapsed.ms;
        self.anim_ms += e;
        if self.ms_to_climb > 0.0 {
            let frac_climb_done = 1.0 - self.ms_to_climb / CLIMB_DURATION;
            self.y -= CLIMB_SPEED * e * (1.0 - (frac_climb_done * PI).cos());
            self.ms_to_climb = (self.ms_to_climb - e).max(0.0);
        } else {
            self.y += SINK_SPEED * e;
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, BIRD_SIZE as f64, BIRD_SIZE as f64)
    }

    fn collision_shape(&self) -> Shape<'_> {
        Shape::Mask(self.mask())
    }
}

/// One full-height column: a bottom pipe and a top pipe with a gap between.
#[derive(Clone, Debug)]
pub struct PipePair {
    pub x: f64,
    /// Pieces per pipe, end piece included.
    pub top_pieces: usize,
    pub bottom_pieces: usize,
    /// Already added to the score.
    pub counted: bool,
    image: Sprite,
    mask: Mask,
}

impl PipePair {
    /// Body pieces shared between the two pipes, leaving room for the bird.
    pub fn total_body_pieces() -> usize {
        (WIN_HEIGHT - 3 * BIRD_SIZE - 3 * PIECE_HEIGHT) / PIECE_HEIGHT
    }

    pub fn random(rng: &mut impl Rng, sprites: &SpriteSet) -> Self {
        let bottom = rng.gen_range(1..=Self::total_body_pieces());
        Self::with_bottom(bottom, sprites)
    }

    /// Build a pair whose bottom pipe has `bottom_body` body pieces.
    pub fn with_bottom(bottom_body: usize, sprites: &SpriteSet) -> Self {
        let total = Self::total_body_pieces();
        let bottom_body = bottom_body.clamp(1, total);
        let top_body = total - bottom_body;
        let h = WIN_HEIGHT as i32;
        let piece = PIECE_HEIGHT as i32;

        let mut image = Sprite::transparent(PIPE_WIDTH, WIN_HEIGHT);

        // Bottom pipe grows up from the floor, end piece on top
        for i in 1..=bottom_body as i32 {
            image.blit(&sprites.pipe_body, 0, h - i * piece);
        }
        let bottom_end_y = h - bottom_body as i32 * piece - piece;
        image.blit(&sprites.pipe_end, 0, bottom_end_y);

        // Top pipe hangs from the ceiling, end piece below
        for i in 0..top_body as i32 {
            image.blit(&sprites.pipe_body, 0, i * piece);
        }
        image.blit(&sprites.pipe_end, 0, top_body as i32 * piece);

        let mask = image.mask();
        Self {
            x: (WIN_WIDTH - 1) as f64,
            top_pieces: top_body + 1,
            bottom_pieces: bottom_body + 1,
            counted: false,
            image,
            mask,
        }
    }

    pub fn is_visible(&self) -> bool {
        -(PIPE_WIDTH as f64) < self.x && self.x < WIN_WIDTH as f64
    }

    /// Rows between the two end pieces.
    pub fn gap(&self) -> (usize, usize) {
        let top = self.top_pieces * PIECE_HEIGHT;
        let bottom = WIN_HEIGHT - self.bottom_pieces * PIECE_HEIGHT;
        (top, bottom)
    }

    pub fn image(&self) -> &Sprite {
        &self.image
    }
}

impl Entity for PipePair {
    fn update(&mut self, elapsed: Elapsed) {
        self.x -= ANIMATION_SPEED * elapsed.ms;
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, 0.0, PIPE_WIDTH as f64, WIN_HEIGHT as f64)
    }

    fn collision_shape(&self) -> Shape<'_> {
        Shape::Mask(&self.mask)
    }
}

pub struct Flappy {
    bird: Bird,
    pipes: ActiveSet<PipePair>,
    spawner: SpawnScheduler,
    score: ScoreState,
    session: Session,
    sprites: SpriteSet,
    rng: StdRng,
    fps: u32,
}

impl Flappy {
    pub fn new(sprites: SpriteSet, fps: u32, rng: StdRng) -> Self {
        let fps = fps.max(1);
        Self {
            bird: Bird::new(&sprites),
            pipes: ActiveSet::new(),
            spawner: SpawnScheduler::new(fps),
            score: ScoreState::new(),
            session: Session::new(),
            sprites,
            rng,
            fps,
        }
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }

    pub fn pipes(&self) -> &ActiveSet<PipePair> {
        &self.pipes
    }

    /// Put a pipe straight into the active set.
    pub fn insert_pipe(&mut self, pipe: PipePair) {
        self.pipes.push(pipe);
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    pub fn add_interval(&self) -> f64 {
        add_interval(self.score.score())
    }

    fn restart(&mut self) {
        if self.session.restart() {
            self.reset();
            log::info!("flappy restarted");
        }
    }

    fn game_over(&mut self, audio: &mut dyn Audio) {
        if self.session.end(GAME_OVER_FREEZE_MS) {
            audio.stop();
            audio.play(Cue::GameOver);
            log::info!("flappy game over, score {}", self.score.score());
        }
    }

    fn count_passed_pipes(&mut self, audio: &mut dyn Audio) {
        let bird_x = self.bird.x;
        for pipe in self.pipes.iter_mut() {
            if !pipe.counted && pipe.bounds().right() < bird_x {
                pipe.counted = true;
                let score = self.score.increment();
                audio.play(Cue::Score);
                if score % RAMP_EVERY == 0 {
                    log::info!("flappy score {}, pipe interval now {} ms", score, add_interval(score));
                }
            }
        }
    }

    /// The world scaled to fit `width` x `height` cells, or `None` when it
    /// would shrink past the point where the bird stays recognisable.
    fn render_field(&self, width: usize, height: usize) -> Option<Vec<Line<'static>>> {
        let mut canvas = PixelCanvas::new(WIN_WIDTH, WIN_HEIGHT, Color::Rgb(70, 180, 200));
        if canvas.scale_to(width, height) < MIN_FIELD_SCALE {
            return None;
        }

        // Sky gradient
        for y in 0..WIN_HEIGHT {
            let t = y as u32 * 255 / WIN_HEIGHT as u32;
            let r = (70 + (120 * t) / 255) as u8;
            let g = (180 + (52 * t) / 255) as u8;
            let b = (200 + (45 * t) / 255) as u8;
            canvas.fill_rect(0, y as i32, WIN_WIDTH as i32, 1, Color::Rgb(r, g, b));
        }

        for pipe in &self.pipes {
            let (x, y) = pipe.bounds().origin();
            canvas.render(pipe.image(), x, y);
        }

        let bird_sprite = if self.bird.wing_up() {
            &self.sprites.bird_wing_up
        } else {
            &self.sprites.bird_wing_down
        };
        let (bx, by) = self.bird.bounds().origin();
        canvas.render(bird_sprite, bx, by);

        Some(canvas.present(width, height))
    }
}

impl Game for Flappy {
    fn update(&mut self, frames: u32, audio: &mut dyn Audio) {
        let elapsed = Elapsed::new(frames, self.fps);
        match self.session.state() {
            GameState::GameOver => {
                self.session.advance_freeze(elapsed.ms);
                return;
            }
            GameState::Playing => {}
            GameState::Intro | GameState::Paused => return,
        }

        if self.spawner.advance(frames, self.add_interval()) {
            let pipe = PipePair::random(&mut self.rng, &self.sprites);
            self.pipes.push(pipe);
        }

        for pipe in self.pipes.iter_mut() {
            pipe.update(elapsed);
        }
        self.bird.update(elapsed);

        self.pipes.prune(PipePair::is_visible);

        if hits_any(&self.bird, &self.pipes) || out_of_vertical_bounds(&self.bird, WIN_HEIGHT as f64) {
            self.game_over(audio);
            return;
        }

        self.count_passed_pipes(audio);
    }

    fn handle_command(&mut self, cmd: Command, audio: &mut dyn Audio) {
        match cmd {
            Command::Restart => self.restart(),
            Command::TogglePause => {
                if self.session.toggle_pause() {
                    log::info!("flappy {}", self.session.state().label());
                }
            }
            Command::Confirm | Command::Steer(Direction::Up) => match self.session.state() {
                GameState::Intro => {
                    self.session.start();
                    log::info!("flappy started");
                    self.bird.flap();
                    audio.play(Cue::Flap);
                }
                GameState::Playing => {
                    self.bird.flap();
                    audio.play(Cue::Flap);
                }
                GameState::GameOver => self.restart(),
                GameState::Paused => {}
            },
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(100, 200, 80)))
            .title(" 🐦 Flappy ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(245, 200, 66))
                    .add_modifier(Modifier::BOLD),
            );

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Status bar
                Constraint::Min(8),     // Game field
                Constraint::Length(1),  // Help
            ])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(
                format!(" Score: {:03} ", self.score.score()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Best: {:03} ", self.score.best()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Pipes every {:.2}s ", self.add_interval() / 1000.0),
                Style::default().fg(Color::Green),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        match self.render_field(chunks[1].width as usize, chunks[1].height as usize) {
            Some(lines) => frame.render_widget(Paragraph::new(lines), chunks[1]),
            None => render_too_small(frame, chunks[1], MIN_FIELD_CELLS),
        }

        let help = match self.session.state() {
            GameState::GameOver if self.session.is_frozen() => Line::from(Span::styled(
                format!(" 💀 GAME OVER! Score: {}", self.score.score()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            GameState::GameOver => Line::from(vec![
                Span::styled(
                    format!(" 💀 GAME OVER! Score: {} │ ", self.score.score()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{} Play again │ Esc Menu │ Q Quit", RESTART_KEYS), Style::default().fg(Color::Gray)),
            ]),
            GameState::Intro => Line::from(vec![
                Span::styled(
                    " ▶ Press SPACE to start! ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("SPACE/↑ Flap │ P Pause │ {} Restart │ Esc Menu", RESTART_KEYS), Style::default().fg(Color::DarkGray)),
            ]),
            GameState::Paused => Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            GameState::Playing => Line::from(Span::styled(
                format!(" SPACE/↑ Flap │ P Pause │ {} Restart │ Esc Menu", RESTART_KEYS),
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn reset(&mut self) {
        self.bird = Bird::new(&self.sprites);
        self.pipes.clear();
        self.spawner.reset();
        self.score.reset();
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
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use rand::SeedableRng;

    fn sprites() -> SpriteSet {
        SpriteSet::builtin().unwrap()
    }

    fn game() -> Flappy {
        Flappy::new(sprites(), 60, StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_full_climb_covers_average_speed_times_duration() {
        let mut bird = Bird::new(&sprites());
        bird.flap();
        let start = bird.y;
        let step = Elapsed::new(1, 60);
        let mut ticks = 0;
        while bird.ms_to_climb > 0.0 {
            bird.update(step);
            ticks += 1;
            assert!(ticks < 100, "climb never finished");
        }
        let climbed = start - bird.y;
        let expected = CLIMB_SPEED * CLIMB_DURATION;
        // Left Riemann sum of the ease curve: off by at most one tick's worth
        assert!(
            (climbed - expected).abs() <= 2.0 * CLIMB_SPEED * step.ms,
            "climbed {climbed}, expected {expected}"
        );
        assert_eq!(bird.ms_to_climb, 0.0);
    }

    #[test]
    fn test_bird_sinks_without_flap() {
        let mut bird = Bird::new(&sprites());
        bird.ms_to_climb = 0.0;
        let y = bird.y;
        bird.update(Elapsed::new(2, 60));
        assert!((bird.y - (y + SINK_SPEED * 2000.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pipe_layout_leaves_gap() {
        let set = sprites();
        let total = PipePair::total_body_pieces();
        assert_eq!(total, 8);
        for bottom in 1..=total {
            let pipe = PipePair::with_bottom(bottom, &set);
            assert_eq!(pipe.top_pieces + pipe.bottom_pieces, total + 2);
            let (top, bottom_edge) = pipe.gap();
            assert!(bottom_edge - top >= 3 * BIRD_SIZE);
            // Nothing opaque inside the gap
            for y in top..bottom_edge {
                for x in 0..PIPE_WIDTH {
                    assert!(pipe.image().get(x, y).is_none());
                }
            }
        }
    }

    #[test]
    fn test_pipe_scores_once_fully_behind_bird() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Confirm, &mut audio);
        let mut pipe = PipePair::with_bottom(4, g.sprites());
        // Right edge lands exactly on the bird after one frame
        pipe.x = g.bird().x - PIPE_WIDTH as f64 + 0.5;
        g.insert_pipe(pipe);
        g.update(1, &mut audio);
        assert_eq!(g.get_score(), 0);
        g.update(1, &mut audio);
        assert_eq!(g.get_score(), 1);
    }

    #[test]
    fn test_pipe_visibility() {
        let mut pipe = PipePair::with_bottom(3, &sprites());
        assert!(pipe.is_visible());
        pipe.x = -(PIPE_WIDTH as f64);
        assert!(!pipe.is_visible());
        pipe.x = WIN_WIDTH as f64;
        assert!(!pipe.is_visible());
    }

    #[test]
    fn test_first_playing_tick_spawns_a_pipe() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.update(1, &mut audio);
        assert!(g.pipes().is_empty(), "intro does not spawn");
        g.handle_command(Command::Confirm, &mut audio);
        assert_eq!(g.state(), GameState::Playing);
        g.update(1, &mut audio);
        assert_eq!(g.pipes().len(), 1);
        assert_eq!(audio.count(Cue::Flap), 1);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Confirm, &mut audio);
        g.update(1, &mut audio);
        g.handle_command(Command::TogglePause, &mut audio);
        let y = g.bird().y;
        g.update(30, &mut audio);
        assert_eq!(g.bird().y, y);
        assert_eq!(g.state(), GameState::Paused);
    }

    #[test]
    fn test_falling_out_ends_game_once() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Confirm, &mut audio);
        g.bird_mut().y = (WIN_HEIGHT - BIRD_SIZE) as f64 - 0.1;
        g.bird_mut().ms_to_climb = 0.0;
        g.update(1, &mut audio);
        assert_eq!(g.state(), GameState::GameOver);
        g.update(1, &mut audio);
        assert_eq!(audio.count(Cue::GameOver), 1);
        assert_eq!(audio.stops, 1);
    }

    #[test]
    fn test_restart_waits_for_freeze() {
        let mut g = game();
        let mut audio = RecordingAudio::new();
        g.handle_command(Command::Confirm, &mut audio);
        // Halfway through a climb, just under the ceiling
        g.bird_mut().y = 0.2;
        g.bird_mut().ms_to_climb = CLIMB_DURATION / 2.0;
        g.update(1, &mut audio);
        assert!(g.is_game_over());

        g.handle_command(Command::Restart, &mut audio);
        assert!(g.is_game_over(), "restart ignored while frozen");

        // 1500 ms at 60 fps
        g.update(90, &mut audio);
        g.handle_command(Command::Restart, &mut audio);
        assert_eq!(g.state(), GameState::Playing);
        assert!(g.pipes().is_empty());
        assert_eq!(g.get_score(), 0);
    }

    #[test]
    fn test_add_interval_ramp() {
        assert_eq!(add_interval(0), 2000.0);
        assert_eq!(add_interval(5), 1800.0);
        assert_eq!(add_interval(50), MIN_ADD_INTERVAL_MS);
    }
}
