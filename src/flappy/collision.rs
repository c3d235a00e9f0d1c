//! Pixel-accurate bird/pipe collision.

use super::bird::Bird;
use super::mask::{Mask, SpriteSet};
use super::pipe::Pipe;
use std::borrow::Cow;

/// A bird's collision mask placed in world space.
#[derive(Debug, Clone)]
pub struct Silhouette<'a> {
    pub mask: Cow<'a, Mask>,
    /// World position of the mask's top-left pixel.
    pub x: i32,
    pub y: i32,
}

impl<'a> Silhouette<'a> {
    /// Silhouette of `bird` as drawn.
    ///
    /// With `rotate` set the sprite is turned by the bird's tilt and kept
    /// centred on the un-rotated sprite, which is how it appears on screen.
    pub fn of(bird: &Bird, sprites: &'a SpriteSet, rotate: bool) -> Self {
        let (x, y) = (bird.x, bird.row());
        if !rotate || bird.tilt == 0.0 {
            return Self {
                mask: Cow::Borrowed(&sprites.bird),
                x,
                y,
            };
        }

        let rotated = sprites.bird.rotated(bird.tilt);
        let dx = sprites.bird.width() as i32 / 2 - rotated.width() as i32 / 2;
        let dy = sprites.bird.height() as i32 / 2 - rotated.height() as i32 / 2;
        Self {
            mask: Cow::Owned(rotated),
            x: x + dx,
            y: y + dy,
        }
    }

    /// Whether this silhouette touches either half of `pipe`.
    pub fn hits(&self, pipe: &Pipe, sprites: &SpriteSet) -> bool {
        let top_offset = (pipe.x - self.x, pipe.top - self.y);
        let bottom_offset = (pipe.x - self.x, pipe.bottom - self.y);
        self.mask.overlaps(&sprites.pipe_bottom, bottom_offset)
            || self.mask.overlaps(&sprites.pipe_top, top_offset)
    }
}

/// Whether `bird` collides with `pipe`, tested from the bird's frame.
pub fn collides(bird: &Bird, pipe: &Pipe, sprites: &SpriteSet, rotate: bool) -> bool {
    Silhouette::of(bird, sprites, rotate).hits(pipe, sprites)
}

/// The same test evaluated from the pipe's frame.
pub fn pipe_hits_bird(pipe: &Pipe, bird: &Bird, sprites: &SpriteSet, rotate: bool) -> bool {
    let silhouette = Silhouette::of(bird, sprites, rotate);
    let top_offset = (silhouette.x - pipe.x, silhouette.y - pipe.top);
    let bottom_offset = (silhouette.x - pipe.x, silhouette.y - pipe.bottom);
    sprites.pipe_top.overlaps(&silhouette.mask, top_offset)
        || sprites.pipe_bottom.overlaps(&silhouette.mask, bottom_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe_at(x: i32, gap_top: i32, sprites: &SpriteSet) -> Pipe {
        Pipe::new(x, gap_top, 200, sprites.pipe_height() as i32)
    }

    #[test]
    fn test_bird_inside_gap_is_clear() {
        let sprites = SpriteSet::default();
        let bird = Bird::new(230, 300.0);
        let pipe = pipe_at(220, 250, &sprites);
        assert!(!collides(&bird, &pipe, &sprites, false));
    }

    #[test]
    fn test_bird_in_top_pipe_collides() {
        let sprites = SpriteSet::default();
        let bird = Bird::new(230, 150.0);
        let pipe = pipe_at(220, 250, &sprites);
        assert!(collides(&bird, &pipe, &sprites, false));
    }

    #[test]
    fn test_bird_in_bottom_pipe_collides() {
        let sprites = SpriteSet::default();
        let bird = Bird::new(230, 430.0);
        let pipe = pipe_at(220, 250, &sprites);
        assert!(collides(&bird, &pipe, &sprites, false));
    }

    #[test]
    fn test_pipe_far_ahead_is_clear() {
        let sprites = SpriteSet::default();
        let bird = Bird::new(230, 150.0);
        let pipe = pipe_at(650, 250, &sprites);
        assert!(!collides(&bird, &pipe, &sprites, false));
    }

    #[test]
    fn test_diagonal_near_miss_is_not_a_hit() {
        // Bird's bounding box overlaps the inset corner of the top pipe body
        // (the lip sits at the mouth), but no opaque pixels touch.
        let sprites = SpriteSet::default();
        let pipe = pipe_at(300, 250, &sprites);
        // Bird's right edge reaches 2px into the pipe's bounding box, above the
        // lip, where the pipe body is inset by 4px.
        let bird = Bird::new(300 - 68 + 2, 100.0);
        let bbox_overlap = bird.x + 68 > pipe.x && bird.row() < pipe.top + 640;
        assert!(bbox_overlap);
        assert!(!collides(&bird, &pipe, &sprites, false));
    }

    #[test]
    fn test_rotated_silhouette_stays_centred() {
        let sprites = SpriteSet::default();
        let mut bird = Bird::new(230, 300.0);
        bird.tilt = -90.0;
        let silhouette = Silhouette::of(&bird, &sprites, true);
        assert_eq!(silhouette.mask.width(), 48);
        assert_eq!(silhouette.mask.height(), 68);
        assert_eq!(silhouette.x, 230 + 34 - 24);
        assert_eq!(silhouette.y, 300 + 24 - 34);
    }

    #[test]
    fn test_nose_down_bird_reaches_lower() {
        // Diving bird's rotated silhouette extends further down than the
        // level sprite, so it touches a bottom pipe the level sprite clears.
        let sprites = SpriteSet::default();
        let pipe = pipe_at(220, 150, &sprites); // bottom pipe starts at y = 350
        let mut bird = Bird::new(230, 300.0); // level sprite bottom row at 347
        assert!(!collides(&bird, &pipe, &sprites, true));
        bird.tilt = -90.0;
        assert!(collides(&bird, &pipe, &sprites, true));
        assert!(!collides(&bird, &pipe, &sprites, false));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let sprites = SpriteSet::default();
        for (y, tilt) in [(150.0, 0.0), (300.0, 25.0), (430.0, -55.0), (262.0, -90.0)] {
            let mut bird = Bird::new(230, y);
            bird.tilt = tilt;
            for x in [100, 160, 200, 230, 290, 300] {
                let pipe = pipe_at(x, 250, &sprites);
                assert_eq!(
                    collides(&bird, &pipe, &sprites, true),
                    pipe_hits_bird(&pipe, &bird, &sprites, true),
                    "asymmetric at y={y} tilt={tilt} pipe x={x}"
                );
            }
        }
    }
}
