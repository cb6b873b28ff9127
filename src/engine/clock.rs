//! Fixed-rate frame clock.
//!
//! The clock never sleeps on its own: waiting is handed to a [`TimeSource`],
//! which lets the terminal source poll keyboard input for the whole wait.

use std::io;
use std::time::Duration;

/// Upper bound on frames reported by a single tick. Past this the clock
/// resynchronises to "now" instead of trying to catch up.
pub const MAX_CATCHUP_FRAMES: u32 = 5;

pub trait TimeSource {
    /// Time since the source was created.
    fn now(&self) -> Duration;
    /// Block for (at most) `duration`.
    fn wait(&mut self, duration: Duration) -> io::Result<()>;
}

pub fn frames_to_ms(frames: f64, fps: u32) -> f64 {
    (1000.0 * frames) / fps as f64
}

pub fn ms_to_frames(ms: f64, fps: u32) -> f64 {
    (fps as f64 * ms) / 1000.0
}

pub struct FrameClock {
    fps: u32,
    // Game-time position of the last frame boundary handed out.
    last_frame: Duration,
    started: bool,
    total_frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            last_frame: Duration::ZERO,
            started: false,
            total_frames: 0,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: u32) {
        let fps = fps.max(1);
        if fps != self.fps {
            log::debug!("frame clock retargeted {} -> {} fps", self.fps, fps);
            self.fps = fps;
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Wait for the next frame boundary and return how many logical frames
    /// elapsed since the previous call (at least 1).
    pub fn tick<S: TimeSource + ?Sized>(&mut self, source: &mut S) -> io::Result<u32> {
        let frame = self.frame_duration();

        if !self.started {
            self.started = true;
            self.last_frame = source.now();
            source.wait(frame)?;
            self.last_frame += frame;
            self.total_frames += 1;
            return Ok(1);
        }

        let deadline = self.last_frame + frame;
        let mut now = source.now();
        if now < deadline {
            source.wait(deadline - now)?;
            now = source.now().max(deadline);
        }

        let behind = now.saturating_sub(self.last_frame);
        let elapsed = (behind.as_secs_f64() / frame.as_secs_f64()).floor() as u32;
        let elapsed = elapsed.max(1);

        if elapsed > MAX_CATCHUP_FRAMES {
            log::debug!("frame clock fell {} frames behind, resyncing", elapsed);
            self.last_frame = now;
            self.total_frames += MAX_CATCHUP_FRAMES as u64;
            return Ok(MAX_CATCHUP_FRAMES);
        }

        self.last_frame += frame * elapsed;
        self.total_frames += elapsed as u64;
        Ok(elapsed)
    }
}

/// Time source whose clock only moves when told to. Waiting advances it by
/// exactly the requested amount.
#[derive(Default)]
pub struct ManualTime {
    now: Duration,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now
    }

    fn wait(&mut self, duration: Duration) -> io::Result<()> {
        self.now += duration;
        Ok(())
    }
}
