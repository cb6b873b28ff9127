//! The loop core shared by both games: frame clock, entities, collision,
//! spawning, the live obstacle set and the session state machine.

pub mod active_set;
pub mod clock;
pub mod collision;
pub mod entity;
pub mod mask;
pub mod spawn;
pub mod state;

pub use active_set::ActiveSet;
pub use clock::{frames_to_ms, ms_to_frames, FrameClock, TimeSource};
pub use entity::{Bounds, Elapsed, Entity, Shape};
pub use mask::Mask;
pub use spawn::SpawnScheduler;
pub use state::{GameState, ScoreState, Session};
