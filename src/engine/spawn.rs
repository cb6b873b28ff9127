use crate::engine::clock::ms_to_frames;

/// Emits one spawn per interval of game time, counted in frames.
#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    frames_since_spawn: f64,
    fps: u32,
    primed: bool,
}

impl SpawnScheduler {
    /// The first call to [`advance`](Self::advance) spawns immediately.
    pub fn new(fps: u32) -> Self {
        Self {
            frames_since_spawn: 0.0,
            fps: fps.max(1),
            primed: true,
        }
    }

    pub fn reset(&mut self) {
        self.frames_since_spawn = 0.0;
        self.primed = true;
    }

    /// Account for `frames` of game time and report whether a new obstacle
    /// is due. Never reports more than one spawn per call, and a backlog
    /// longer than one interval is dropped.
    pub fn advance(&mut self, frames: u32, interval_ms: f64) -> bool {
        if self.primed {
            self.primed = false;
            self.frames_since_spawn = 0.0;
            return true;
        }

        let interval = ms_to_frames(interval_ms, self.fps);
        if interval <= 0.0 {
            return true;
        }
        self.frames_since_spawn += frames as f64;
        if self.frames_since_spawn >= interval {
            self.frames_since_spawn = (self.frames_since_spawn - interval) % interval;
            true
        } else {
            false
        }
    }
}

/// Spawn interval as a pure function of score: shrinks by `step_ms` for
/// every `every` points, never below `floor_ms`.
pub fn ramped_interval(score: u32, start_ms: f64, step_ms: f64, every: u32, floor_ms: f64) -> f64 {
    let steps = (score / every.max(1)) as f64;
    (start_ms - step_ms * steps).max(floor_ms)
}
