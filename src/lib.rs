//! Space Dodger - a falling-hazard arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, spawning, collisions, effects)
//! - `session`: Run lifecycle (Idle -> Running -> GameOver) and presentation contract
//! - `clock`: Fixed-step frame clock
//! - `highscores`: SQLite-backed score store
//! - `settings`: JSON settings with defaults
//! - `backdrop`: Background asset resolution with a generated fallback
//! - `autopilot`: Demo input generator

pub mod autopilot;
pub mod backdrop;
pub mod clock;
pub mod error;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::StoreError;
pub use highscores::{ScoreEntry, ScoreStore, SqliteScoreStore};
pub use session::{FrameView, Presenter, RunPhase, Session};
pub use settings::Settings;

use glam::Vec2;

/// RGB colour used by entities and particles
pub type Color = [u8; 3];

/// Game configuration constants
pub mod consts {
    use crate::Color;

    /// Reference frame rate all per-frame speeds are tuned for
    pub const FRAME_RATE: u32 = 60;
    /// Fixed simulation timestep at the reference frame rate
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_BASE_SIZE: f32 = 50.0;
    pub const PLAYER_MIN_SIZE: f32 = 30.0;
    pub const PLAYER_BASE_SPEED: f32 = 10.0;
    pub const PLAYER_MAX_SPEED: f32 = 15.0;
    pub const PLAYER_MAX_HEALTH: u8 = 3;
    /// Speed pickup multiplier (capped at PLAYER_MAX_SPEED)
    pub const SPEED_BOOST: f32 = 1.5;
    /// Shrink pickup multiplier (floored at PLAYER_MIN_SIZE)
    pub const SHRINK_FACTOR: f32 = 0.8;

    /// Special ability meter
    pub const SPECIAL_CHARGE_MAX: f32 = 100.0;
    pub const SPECIAL_CHARGE_RATE: f32 = 0.1;

    /// Hazard limits
    pub const MAX_HAZARDS: usize = 10;
    pub const HOMING_COOLDOWN_FRAMES: u32 = 60;
    /// Fraction of nominal speed used for a homing lunge
    pub const HOMING_LUNGE_FACTOR: f32 = 0.5;

    /// Power-up defaults
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const POWER_UP_SPEED: f32 = 3.0;
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.01;
    pub const MAX_POWER_UPS: usize = 1;

    /// Difficulty progression
    pub const BASE_SPAWN_RATE: f64 = 0.05;
    pub const MAX_SPAWN_RATE: f64 = 0.3;
    pub const SPAWN_RATE_PER_LEVEL: f64 = 0.05;
    pub const LEVEL_SCORE_STEP: u64 = 50;
    pub const HAZARD_SPEED_PER_LEVEL: f32 = 0.1;

    /// Combo bonus awarded every this many consecutive dodges
    pub const COMBO_STEP: u32 = 10;

    /// Magnet effect
    pub const MAGNET_RADIUS: f32 = 200.0;
    pub const MAGNET_PULL: f32 = 5.0;

    /// Particle bursts
    pub const BURST_PARTICLES: usize = 20;
    pub const MAX_PARTICLES: usize = 256;

    /// Palette
    pub const RED: Color = [255, 60, 60];
    pub const WHITE: Color = [255, 255, 255];
    pub const YELLOW: Color = [255, 255, 0];
    pub const BLUE: Color = [0, 100, 255];
    pub const GREEN: Color = [0, 255, 100];
    pub const GREY: Color = [128, 128, 128];
}

/// Star systems the player travels through, one per level (cycles)
pub const STAR_SYSTEMS: [&str; 17] = [
    "Sol",
    "Alpha Centauri",
    "Sirius",
    "Betelgeuse",
    "Andromeda",
    "Orion",
    "Pleiades",
    "Cygnus",
    "Cassiopeia",
    "Galactic Core",
    "Nebula X",
    "Quasar Y",
    "Black Hole Z",
    "Supernova Remnant",
    "Neutron Star Cluster",
    "Gamma Ray Burst",
    "Dark Matter Cloud",
];

/// Star-system name for a 0-based level
pub fn level_name(level: u32) -> &'static str {
    STAR_SYSTEMS[level as usize % STAR_SYSTEMS.len()]
}

/// Unit vector from `from` toward `to`, with the distance floored at `min_dist`
///
/// Returns the scaled direction and the (floored) distance.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2, min_dist: f32) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.length().max(min_dist);
    (delta / dist, dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name_cycles() {
        assert_eq!(level_name(0), "Sol");
        assert_eq!(level_name(16), "Dark Matter Cloud");
        assert_eq!(level_name(17), "Sol");
    }

    #[test]
    fn test_direction_to_floors_distance() {
        let (dir, dist) = direction_to(Vec2::ZERO, Vec2::new(0.5, 0.0), 1.0);
        assert_eq!(dist, 1.0);
        assert!((dir.x - 0.5).abs() < 1e-6);

        let (dir, dist) = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0), 1.0);
        assert!((dist - 5.0).abs() < 1e-6);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }
}
