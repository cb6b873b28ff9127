use ratatui::prelude::*;

use crate::assets::Sprite;

/// Pixel framebuffer drawn with half blocks: each terminal row holds two
/// pixel rows (top = foreground, bottom = background of '▀').
pub struct PixelCanvas {
    width: usize,
    height: usize,
    px: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            px: vec![fill; width * height],
        }
    }

    pub fn set(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.px[y as usize * self.width + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.width + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Color) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Draw a sprite's opaque pixels; later draws cover earlier ones.
    pub fn render(&mut self, sprite: &Sprite, x: i32, y: i32) {
        for sy in 0..sprite.height() {
            for sx in 0..sprite.width() {
                if let Some(c) = sprite.get(sx, sy) {
                    self.set(x + sx as i32, y + sy as i32, c);
                }
            }
        }
    }

    /// Largest nearest-neighbour scaling that fits `cols` x `rows` terminal
    /// cells, keeping square pixels and centred horizontally.
    pub fn scale_to(&self, cols: usize, rows: usize) -> f64 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        (cols as f64 / self.width as f64).min((rows * 2) as f64 / self.height as f64)
    }

    pub fn present(&self, cols: usize, rows: usize) -> Vec<Line<'static>> {
        let scale = self.scale_to(cols, rows);
        let out_w = ((self.width as f64 * scale).floor() as usize).min(cols);
        let out_h = ((self.height as f64 * scale).floor() as usize).min(rows * 2);
        if out_w == 0 || out_h == 0 {
            return Vec::new();
        }
        let pad = (cols - out_w) / 2;
        let sample = |x: usize, y: usize| {
            let sx = (x * self.width / out_w).min(self.width - 1);
            let sy = (y * self.height / out_h).min(self.height - 1);
            self.get(sx, sy)
        };

        let mut lines = Vec::with_capacity(out_h.div_ceil(2));
        for row in (0..out_h).step_by(2) {
            let mut spans: Vec<Span<'static>> = Vec::with_capacity(out_w + 1);
            if pad > 0 {
                spans.push(Span::raw(" ".repeat(pad)));
            }
            for x in 0..out_w {
                let top = sample(x, row);
                let bottom = if row + 1 < out_h { sample(x, row + 1) } else { Color::Reset };
                spans.push(Span::styled("▀", Style::default().fg(top).bg(bottom)));
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}
