//! Drifting background stars (cosmetic only)

use glam::Vec2;
use rand::Rng;

/// Moving stars drawn behind the play area
pub const DRIFT_STAR_COUNT: usize = 100;
/// Static stars used when no background image is available
pub const PLACEHOLDER_STAR_COUNT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// 0-1, also scales drift speed
    pub brightness: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Starfield {
    pub stars: Vec<Star>,
    pub width: f32,
    pub height: f32,
}

impl Starfield {
    /// Scatter `count` stars uniformly over a `width` x `height` area
    pub fn generate(count: usize, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..width.max(1.0)),
                    rng.random_range(0.0..height.max(1.0)),
                ),
                brightness: rng.random::<f32>(),
            })
            .collect();
        Self {
            stars,
            width,
            height,
        }
    }

    /// Slide left and down, wrapping at the edges; brighter stars move faster
    pub fn drift(&mut self) {
        for star in &mut self.stars {
            star.pos.x = wrap(star.pos.x - 0.5, self.width);
            star.pos.y = wrap(star.pos.y + 1.0 + star.brightness, self.height);
        }
    }
}

/// Wrap into [0, max); rem_euclid can round up to `max` for tiny negatives
fn wrap(value: f32, max: f32) -> f32 {
    let wrapped = value.rem_euclid(max);
    if wrapped >= max { 0.0 } else { wrapped }
}
