/// Per-pixel opacity bitmap used for precise overlap tests.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, mut opaque: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.bits[y * width + x] = opaque(x, y);
            }
        }
        mask
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.bits[y as usize * self.width + x as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// True when at least one opaque pixel of `self` placed at `at` lands on
    /// an opaque pixel of `other` placed at `other_at`.
    pub fn overlaps(&self, at: (i32, i32), other: &Mask, other_at: (i32, i32)) -> bool {
        let left = at.0.max(other_at.0);
        let top = at.1.max(other_at.1);
        let right = (at.0 + self.width as i32).min(other_at.0 + other.width as i32);
        let bottom = (at.1 + self.height as i32).min(other_at.1 + other.height as i32);

        for y in top..bottom {
            for x in left..right {
                if self.get(x - at.0, y - at.1) && other.get(x - other_at.0, y - other_at.1) {
                    return true;
                }
            }
        }
        false
    }
}
