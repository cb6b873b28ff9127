use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::engine::TimeSource;

/// Where the loop collects key presses between frames.
pub trait KeySource {
    /// Key presses received since the last drain, oldest first.
    fn drain_keys(&mut self) -> Vec<KeyEvent>;
}

/// Wall-clock time source that spends every wait polling the terminal, so
/// key presses are collected between frames without a reader thread.
pub struct TerminalEvents {
    started: Instant,
    pending: Vec<KeyEvent>,
}

impl TerminalEvents {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            pending: Vec::new(),
        }
    }
}

impl KeySource for TerminalEvents {
    fn drain_keys(&mut self) -> Vec<KeyEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for TerminalEvents {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn wait(&mut self, duration: Duration) -> io::Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(());
            }
            if event::poll(left)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.pending.push(key);
                    }
                }
            }
        }
    }
}
