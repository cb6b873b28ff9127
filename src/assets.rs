//! Sprites: small palette-keyed pixel images.
//!
//! A sprite file is plain text, one row per line, one palette key per pixel.
//! `.` and space are transparent; short rows are padded with transparency.

use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;

use crate::engine::Mask;
use crate::error::AssetError;
use crate::games::flappy::{BIRD_SIZE, PIECE_HEIGHT, PIPE_WIDTH};

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
}

fn palette(key: char) -> Option<Option<Color>> {
    let color = match key {
        '.' | ' ' => return Some(None),
        'Y' => Color::Rgb(245, 200, 66),
        'w' => Color::Rgb(215, 165, 35),
        'O' => Color::Rgb(225, 75, 35),
        'W' => Color::Rgb(255, 255, 255),
        'K' => Color::Rgb(20, 20, 20),
        'G' => Color::Rgb(100, 170, 40),
        'g' => Color::Rgb(74, 122, 26),
        'L' => Color::Rgb(145, 215, 62),
        'D' => Color::Rgb(60, 100, 20),
        'R' => Color::Rgb(220, 50, 50),
        _ => return None,
    };
    Some(Some(color))
}

impl Sprite {
    pub fn transparent(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    /// Parse sprite text. `origin` only labels errors.
    pub fn parse(origin: &Path, text: &str) -> Result<Self, AssetError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(AssetError::Empty { path: origin.to_path_buf() });
        }

        let mut sprite = Self::transparent(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, key) in row.chars().enumerate() {
                let color = palette(key).ok_or_else(|| AssetError::UnknownColor {
                    path: origin.to_path_buf(),
                    line: y + 1,
                    key,
                })?;
                sprite.pixels[y * width + x] = color;
            }
        }
        Ok(sprite)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// Copy the opaque pixels of `src` with its top-left at (x, y).
    pub fn blit(&mut self, src: &Sprite, x: i32, y: i32) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                let Some(color) = src.get(sx, sy) else { continue };
                let dx = x + sx as i32;
                let dy = y + sy as i32;
                if dx >= 0 && dy >= 0 && (dx as usize) < self.width && (dy as usize) < self.height {
                    self.pixels[dy as usize * self.width + dx as usize] = Some(color);
                }
            }
        }
    }

    pub fn mask(&self) -> Mask {
        Mask::from_fn(self.width, self.height, |x, y| self.get(x, y).is_some())
    }
}

pub fn load_sprite(path: &Path) -> Result<Sprite, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Sprite::parse(path, &text)
}

const BIRD_WING_UP: &str = "
.wYYW.
wwYWKW
YYYYOO
YYYYOO
.YYYY.
..YY..
";

const BIRD_WING_DOWN: &str = "
..YYW.
.YYWKW
YYYYOO
wwYYOO
wwYYY.
..YY..
";

const PIPE_BODY: &str = "
.gGGGGGLg.
.gGGGGGLg.
.gGGGGGLg.
.gGGGGGLg.
";

const PIPE_END: &str = "
DgGGGGGLLD
DgGGGGGLLD
DgGGGGGLLD
DDDDDDDDDD
";

/// Every image the Flappy game draws.
#[derive(Clone, Debug)]
pub struct SpriteSet {
    pub bird_wing_up: Sprite,
    pub bird_wing_down: Sprite,
    pub pipe_end: Sprite,
    pub pipe_body: Sprite,
}

impl SpriteSet {
    pub fn builtin() -> Result<Self, AssetError> {
        let origin = PathBuf::from("<builtin>");
        Ok(Self {
            bird_wing_up: Sprite::parse(&origin.join("bird_wing_up"), BIRD_WING_UP)?,
            bird_wing_down: Sprite::parse(&origin.join("bird_wing_down"), BIRD_WING_DOWN)?,
            pipe_end: Sprite::parse(&origin.join("pipe_end"), PIPE_END)?,
            pipe_body: Sprite::parse(&origin.join("pipe_body"), PIPE_BODY)?,
        })
    }

    /// Load every sprite from `dir`. Any missing or malformed file fails
    /// the whole set.
    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let bird = (BIRD_SIZE, BIRD_SIZE);
        let piece = (PIPE_WIDTH, PIECE_HEIGHT);
        Ok(Self {
            bird_wing_up: load_sized(&dir.join("bird_wing_up.txt"), bird)?,
            bird_wing_down: load_sized(&dir.join("bird_wing_down.txt"), bird)?,
            pipe_end: load_sized(&dir.join("pipe_end.txt"), piece)?,
            pipe_body: load_sized(&dir.join("pipe_body.txt"), piece)?,
        })
    }

    pub fn load(dir: Option<&Path>) -> Result<Self, AssetError> {
        match dir {
            Some(dir) => {
                log::info!("loading sprites from {}", dir.display());
                Self::load_dir(dir)
            }
            None => {
                log::info!("using built-in sprites");
                Self::builtin()
            }
        }
    }
}

fn load_sized(path: &Path, expected: (usize, usize)) -> Result<Sprite, AssetError> {
    let sprite = load_sprite(path)?;
    let found = (sprite.width(), sprite.height());
    if found != expected {
        return Err(AssetError::WrongSize {
            path: path.to_path_buf(),
            expected,
            found,
        });
    }
    Ok(sprite)
}
