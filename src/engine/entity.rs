use crate::engine::clock::frames_to_ms;
use crate::engine::mask::Mask;

/// Game time covered by one update: whole frames and the same span in ms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Elapsed {
    pub frames: u32,
    pub ms: f64,
}

impl Elapsed {
    pub fn new(frames: u32, fps: u32) -> Self {
        Self {
            frames,
            ms: frames_to_ms(frames as f64, fps.max(1)),
        }
    }
}

/// Axis-aligned box in world units. For grid entities one unit is one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Integer origin used when masks are compared pixel by pixel.
    pub fn origin(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// What the collision detector compares.
pub enum Shape<'a> {
    /// Opaque pixels of a mask whose top-left sits at the entity's origin.
    Mask(&'a Mask),
    /// A single grid cell.
    Cell(i32, i32),
}

/// Capability shared by everything that lives in a game world.
pub trait Entity {
    fn update(&mut self, elapsed: Elapsed);
    fn bounds(&self) -> Bounds;
    fn collision_shape(&self) -> Shape<'_>;
}
