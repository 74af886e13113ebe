//! Falling entities: hazards and power-ups
//!
//! Per-kind stats live in compile-time tables indexed by the kind enum.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::consts::*;

/// Baseline stats for a hazard kind (level 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardStats {
    /// Fall speed in px/frame
    pub speed: f32,
    /// Hitbox edge length in px
    pub size: f32,
    pub color: Color,
}

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Asteroid,
    Comet,
    Alien,
    /// Falls straight, lunging at the player whenever its cooldown runs out
    Homing,
    Splitting,
}

const HAZARD_STATS: [HazardStats; 5] = [
    HazardStats { speed: 5.0, size: 50.0, color: [139, 69, 19] },
    HazardStats { speed: 7.0, size: 40.0, color: [100, 149, 237] },
    HazardStats { speed: 6.0, size: 60.0, color: [50, 205, 50] },
    HazardStats { speed: 4.0, size: 45.0, color: [255, 0, 0] },
    HazardStats { speed: 5.0, size: 55.0, color: [255, 165, 0] },
];

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Asteroid,
        HazardKind::Comet,
        HazardKind::Alien,
        HazardKind::Homing,
        HazardKind::Splitting,
    ];

    pub fn stats(self) -> &'static HazardStats {
        &HAZARD_STATS[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Asteroid => "asteroid",
            HazardKind::Comet => "comet",
            HazardKind::Alien => "alien",
            HazardKind::Homing => "homing",
            HazardKind::Splitting => "splitting",
        }
    }

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling hazard
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub kind: HazardKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed including the level bonus at spawn time
    pub speed: f32,
    /// Frames until the next homing lunge (homing only)
    pub homing_cooldown: u32,
}

impl Hazard {
    pub fn new(kind: HazardKind, pos: Vec2, speed_bonus: f32) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos,
            size: stats.size,
            speed: stats.speed + speed_bonus,
            homing_cooldown: 0,
        }
    }

    /// Spawn just above the play area at a random column
    pub fn spawn(kind: HazardKind, play_width: f32, speed_bonus: f32, rng: &mut impl Rng) -> Self {
        let size = kind.stats().size;
        let x = random_column(play_width, size, rng);
        Self::new(kind, Vec2::new(x, -size), speed_bonus)
    }

    pub fn color(&self) -> Color {
        self.kind.stats().color
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Advance one frame
    pub fn update(&mut self, player_pos: Vec2) {
        if self.kind != HazardKind::Homing {
            self.pos.y += self.speed;
            return;
        }

        if self.homing_cooldown == 0 {
            let (dir, _) = crate::direction_to(self.pos, player_pos, 1.0);
            self.pos += dir * self.speed * HOMING_LUNGE_FACTOR;
            self.homing_cooldown = HOMING_COOLDOWN_FRAMES;
        } else {
            self.pos.y += self.speed;
            self.homing_cooldown -= 1;
        }
    }

    pub fn is_below(&self, play_height: f32) -> bool {
        self.pos.y > play_height
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs one hit; no timer
    Shield,
    Speed,
    Shrink,
    Invincibility,
    /// Pulls nearby power-ups toward the player
    Magnet,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Shield,
        PowerUpKind::Speed,
        PowerUpKind::Shrink,
        PowerUpKind::Invincibility,
        PowerUpKind::Magnet,
    ];

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::Shield => YELLOW,
            PowerUpKind::Speed => BLUE,
            PowerUpKind::Shrink => GREEN,
            PowerUpKind::Invincibility => WHITE,
            PowerUpKind::Magnet => GREY,
        }
    }

    /// Effect duration in seconds (None for the shield)
    pub fn duration(&self) -> Option<f32> {
        match self {
            PowerUpKind::Shield => None,
            PowerUpKind::Speed => Some(7.0),
            PowerUpKind::Shrink => Some(12.0),
            PowerUpKind::Invincibility => Some(5.0),
            PowerUpKind::Magnet => Some(15.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Speed => "Speed",
            PowerUpKind::Shrink => "Shrink",
            PowerUpKind::Invincibility => "Invincibility",
            PowerUpKind::Magnet => "Magnet",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling collectible
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: POWER_UP_SIZE,
            speed: POWER_UP_SPEED,
        }
    }

    pub fn spawn(kind: PowerUpKind, play_width: f32, rng: &mut impl Rng) -> Self {
        let x = random_column(play_width, POWER_UP_SIZE, rng);
        Self::new(kind, Vec2::new(x, -POWER_UP_SIZE))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn is_below(&self, play_height: f32) -> bool {
        self.pos.y > play_height
    }
}

/// Random whole-pixel x so an entity of `size` fits inside the play area
fn random_column(play_width: f32, size: f32, rng: &mut impl Rng) -> f32 {
    let max_x = (play_width - size).max(0.0) as u32;
    rng.random_range(0..=max_x) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stats_table_matches_kinds() {
        assert_eq!(HazardKind::Asteroid.stats().speed, 5.0);
        assert_eq!(HazardKind::Comet.stats().size, 40.0);
        assert_eq!(HazardKind::Alien.stats().size, 60.0);
        assert_eq!(HazardKind::Homing.stats().speed, 4.0);
        assert_eq!(HazardKind::Splitting.stats().color, [255, 165, 0]);
    }

    #[test]
    fn test_plain_hazard_falls_straight() {
        let mut hazard = Hazard::new(HazardKind::Comet, Vec2::new(100.0, 0.0), 0.0);
        hazard.update(Vec2::new(400.0, 500.0));
        assert_eq!(hazard.pos, Vec2::new(100.0, 7.0));
    }

    #[test]
    fn test_homing_lunges_then_falls() {
        let player = Vec2::new(400.0, 500.0);
        let mut hazard = Hazard::new(HazardKind::Homing, Vec2::new(100.0, 0.0), 0.0);

        // Lunge: both axes move toward the player
        let before = hazard.pos;
        hazard.update(player);
        assert!(hazard.pos.x > before.x);
        assert!(hazard.pos.y > before.y);
        assert!(((hazard.pos - before).length() - 2.0).abs() < 1e-4);
        assert_eq!(hazard.homing_cooldown, HOMING_COOLDOWN_FRAMES);

        // Cooldown: only y moves, by exactly the fall speed
        let before = hazard.pos;
        hazard.update(player);
        assert_eq!(hazard.pos.x, before.x);
        assert_eq!(hazard.pos.y, before.y + 4.0);
        assert_eq!(hazard.homing_cooldown, HOMING_COOLDOWN_FRAMES - 1);
    }

    #[test]
    fn test_homing_lunges_again_after_cooldown() {
        let player = Vec2::new(400.0, 500.0);
        let mut hazard = Hazard::new(HazardKind::Homing, Vec2::new(100.0, 0.0), 0.0);
        hazard.update(player);
        for _ in 0..HOMING_COOLDOWN_FRAMES {
            let x = hazard.pos.x;
            hazard.update(player);
            assert_eq!(hazard.pos.x, x);
        }
        let x = hazard.pos.x;
        hazard.update(player);
        assert!(hazard.pos.x > x);
    }

    #[test]
    fn test_spawn_fits_play_area() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let hazard = Hazard::spawn(HazardKind::random(&mut rng), 800.0, 0.3, &mut rng);
            assert!(hazard.pos.x >= 0.0 && hazard.pos.x + hazard.size <= 800.0);
            assert_eq!(hazard.pos.y, -hazard.size);
            assert!((hazard.speed - (hazard.kind.stats().speed + 0.3)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_only_shield_has_no_duration() {
        for kind in PowerUpKind::ALL {
            assert_eq!(kind.duration().is_none(), kind == PowerUpKind::Shield);
        }
    }
}
