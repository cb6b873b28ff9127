#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Intro,
    Playing,
    Paused,
    GameOver,
}

impl GameState {
    pub fn label(&self) -> &'static str {
        match self {
            GameState::Intro => "intro",
            GameState::Playing => "playing",
            GameState::Paused => "paused",
            GameState::GameOver => "game over",
        }
    }
}

/// Current score plus the best one seen this run (memory only).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreState {
    score: u32,
    best: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn increment(&mut self) -> u32 {
        self.score += 1;
        self.best = self.best.max(self.score);
        self.score
    }

    /// Back to zero; the best score survives.
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

/// The game state machine. Games call in here for every transition so the
/// allowed edges live in one place.
#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    // Display-only hold after a game over, in ms of game time.
    freeze_ms: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: GameState::Intro,
            freeze_ms: 0.0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    /// Intro -> Playing.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::Intro {
            return false;
        }
        self.state = GameState::Playing;
        true
    }

    /// Playing <-> Paused. Other states ignore the toggle.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            _ => return false,
        };
        true
    }

    /// Playing -> GameOver, holding for `freeze_ms` before a restart is accepted.
    pub fn end(&mut self, freeze_ms: f64) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.state = GameState::GameOver;
        self.freeze_ms = freeze_ms.max(0.0);
        true
    }

    pub fn advance_freeze(&mut self, elapsed_ms: f64) {
        if self.state == GameState::GameOver {
            self.freeze_ms = (self.freeze_ms - elapsed_ms).max(0.0);
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.state == GameState::GameOver && self.freeze_ms > 0.0
    }

    pub fn can_restart(&self) -> bool {
        !self.is_frozen()
    }

    /// The loop-back edge: any state except a frozen game over goes straight
    /// to Playing. The caller resets its own world.
    pub fn restart(&mut self) -> bool {
        if !self.can_restart() {
            return false;
        }
        self.state = GameState::Playing;
        self.freeze_ms = 0.0;
        true
    }
}
