//! Pixel silhouettes used for collision.
//!
//! A [`Mask`] stores one bit per pixel: set where the sprite is opaque. Masks
//! are owned by a [`SpriteSet`] that is handed to the simulation when it is
//! built, so the engine never loads art itself.

use crate::core::constants::{
    BIRD_HEIGHT, BIRD_WIDTH, PIPE_HEIGHT, PIPE_LIP_HEIGHT, PIPE_LIP_INSET, PIPE_WIDTH,
};

const WORD_BITS: u32 = 64;

/// Row-major bit mask of opaque pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS) as usize;
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Fully opaque mask.
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Build a mask by evaluating `opaque(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if opaque(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Parse ASCII art: `#` is opaque, anything else transparent.
    /// Rows shorter than the longest one are padded with transparency.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        let mut mask = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    mask.set(x as u32, y as u32, true);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (index, bit) = self.locate(x, y);
        self.bits[index] & (1 << bit) != 0
    }

    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (index, bit) = self.locate(x, y);
        if opaque {
            self.bits[index] |= 1 << bit;
        } else {
            self.bits[index] &= !(1 << bit);
        }
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u32) {
        let index = y as usize * self.words_per_row + (x / WORD_BITS) as usize;
        (index, x % WORD_BITS)
    }

    /// Mirror top-to-bottom.
    pub fn flipped_vertical(&self) -> Self {
        let mut flipped = Self::new(self.width, self.height);
        for y in 0..self.height as usize {
            let src = (self.height as usize - 1 - y) * self.words_per_row;
            let dst = y * self.words_per_row;
            flipped.bits[dst..dst + self.words_per_row]
                .copy_from_slice(&self.bits[src..src + self.words_per_row]);
        }
        flipped
    }

    /// Rotate counter-clockwise by `degrees` about the centre.
    ///
    /// The result is sized to the bounding box of the rotated rectangle, the
    /// same way a blit-rotate grows its surface, and sampled nearest-neighbour.
    pub fn rotated(&self, degrees: f64) -> Self {
        let quarter = (degrees / 90.0).round();
        if (degrees - quarter * 90.0).abs() < 1e-9 {
            return self.rotated_quarter_turns(quarter as i64);
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f64, self.height as f64);
        let out_w = (w * cos.abs() + h * sin.abs()).ceil() as u32;
        let out_h = (w * sin.abs() + h * cos.abs()).ceil() as u32;
        let (src_cx, src_cy) = (w / 2.0, h / 2.0);
        let (dst_cx, dst_cy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);

        Self::from_fn(out_w, out_h, |x, y| {
            // Screen y points down, so a counter-clockwise turn on screen
            // maps destination pixels back through the transposed rotation.
            let dx = x as f64 + 0.5 - dst_cx;
            let dy = y as f64 + 0.5 - dst_cy;
            let sx = dx * cos - dy * sin + src_cx;
            let sy = dx * sin + dy * cos + src_cy;
            if sx < 0.0 || sy < 0.0 {
                return false;
            }
            self.get(sx.floor() as u32, sy.floor() as u32)
        })
    }

    fn rotated_quarter_turns(&self, turns: i64) -> Self {
        let (w, h) = (self.width, self.height);
        match turns.rem_euclid(4) {
            0 => self.clone(),
            1 => Self::from_fn(h, w, |x, y| self.get(w - 1 - y, x)),
            2 => Self::from_fn(w, h, |x, y| self.get(w - 1 - x, h - 1 - y)),
            _ => Self::from_fn(h, w, |x, y| self.get(y, h - 1 - x)),
        }
    }

    /// First pixel where `self` and `other` are both opaque, with `other`'s
    /// top-left placed at `offset` in `self`'s coordinates.
    ///
    /// Returns the overlapping point in `self`'s coordinates.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (ox, oy) = offset;
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (self.width as i32).min(ox + other.width as i32);
        let y_end = (self.height as i32).min(oy + other.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as u32, y as u32) && other.get((x - ox) as u32, (y - oy) as u32) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Whether the masks share any opaque pixel at `offset`.
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        self.overlap(other, offset).is_some()
    }
}

/// Collision silhouettes for every sprite the simulation tests.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub bird: Mask,
    pub pipe_top: Mask,
    pub pipe_bottom: Mask,
}

impl SpriteSet {
    /// Use `pipe` as the bottom pipe and its vertical mirror as the top pipe.
    pub fn new(bird: Mask, pipe: Mask) -> Self {
        Self {
            bird,
            pipe_top: pipe.flipped_vertical(),
            pipe_bottom: pipe,
        }
    }

    pub fn bird_height(&self) -> u32 {
        self.bird.height()
    }

    pub fn pipe_width(&self) -> u32 {
        self.pipe_bottom.width()
    }

    pub fn pipe_height(&self) -> u32 {
        self.pipe_bottom.height()
    }
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self::new(bird_silhouette(), pipe_silhouette())
    }
}

/// Rounded body with a beak poking out on the right.
pub fn bird_silhouette() -> Mask {
    let (w, h) = (BIRD_WIDTH as f64, BIRD_HEIGHT as f64);
    let body_w = w * 0.82;
    let (cx, cy) = (body_w / 2.0, h / 2.0);
    let (rx, ry) = (body_w / 2.0, h / 2.0);
    Mask::from_fn(BIRD_WIDTH, BIRD_HEIGHT, |x, y| {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        let nx = (px - cx) / rx;
        let ny = (py - cy) / ry;
        let in_body = nx * nx + ny * ny <= 1.0;
        let in_beak = px >= body_w - 4.0 && py >= h * 0.45 && py <= h * 0.75;
        in_body || in_beak
    })
}

/// Bottom pipe: a full-width lip at the mouth above a slightly narrower body.
pub fn pipe_silhouette() -> Mask {
    Mask::from_fn(PIPE_WIDTH, PIPE_HEIGHT, |x, y| {
        y < PIPE_LIP_HEIGHT || (x >= PIPE_LIP_INSET && x < PIPE_WIDTH - PIPE_LIP_INSET)
    })
}
