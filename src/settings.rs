//! Game settings and preferences
//!
//! Stored as JSON next to the executable. Every field has a default, so a
//! partial (or missing) file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::highscores::DEFAULT_TOP_SCORES;

/// Highest accepted step rate; above this a step's dt no longer moves a
/// multi-second f32 timer
pub const MAX_FRAME_RATE: u32 = 1000;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    pub play_width: f32,
    pub play_height: f32,

    // === Timing ===
    /// Simulation steps per second
    pub frame_rate: u32,
    /// Catch-up cap per rendered frame
    pub max_substeps: u32,

    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,

    // === Storage ===
    pub database_path: PathBuf,
    /// Optional background image; a starfield is generated if missing
    pub background_path: PathBuf,

    // === Visual Effects ===
    /// Particle bursts on hits and pickups
    pub particles: bool,
    pub max_particles: usize,

    // === HUD ===
    /// Entries on the game-over leaderboard
    pub top_scores_shown: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_width: consts::PLAY_WIDTH,
            play_height: consts::PLAY_HEIGHT,

            frame_rate: consts::FRAME_RATE,
            max_substeps: consts::MAX_SUBSTEPS,

            seed: None,

            database_path: PathBuf::from("game_data.db"),
            background_path: PathBuf::from("space_background.png"),

            particles: true,
            max_particles: consts::MAX_PARTICLES,

            top_scores_shown: DEFAULT_TOP_SCORES,
        }
    }
}

impl Settings {
    /// Seconds per simulation step
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.frame_rate.clamp(1, MAX_FRAME_RATE) as f32
    }

    /// Simulation steps covering `seconds` of play
    pub fn steps_in(&self, seconds: u64) -> u64 {
        self.frame_rate.clamp(1, MAX_FRAME_RATE) as u64 * seconds
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Replace nonsensical values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.frame_rate == 0 {
            log::warn!("frame_rate must be positive, using {}", defaults.frame_rate);
            self.frame_rate = defaults.frame_rate;
        } else if self.frame_rate > MAX_FRAME_RATE {
            log::warn!("frame_rate {} too high, capping at {MAX_FRAME_RATE}", self.frame_rate);
            self.frame_rate = MAX_FRAME_RATE;
        }
        if !(self.play_width > 0.0 && self.play_height > 0.0) {
            log::warn!("Play area must be positive, using defaults");
            self.play_width = defaults.play_width;
            self.play_height = defaults.play_height;
        }
        self.max_substeps = self.max_substeps.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EffectTimers, PowerUpKind};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "seed": 42, "particles": false }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(settings.frame_rate, 60);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            seed: Some(7),
            play_width: 640.0,
            top_scores_shown: 3,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_zero_frame_rate_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "frame_rate": 0 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.frame_rate, 60);
        assert!((settings.sim_dt() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_frame_rate_is_capped_and_timers_still_expire() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "frame_rate": 10000000 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.frame_rate, MAX_FRAME_RATE);

        let mut timers = EffectTimers::new();
        timers.start(PowerUpKind::Invincibility);
        let dt = settings.sim_dt();
        let steps = 5 * MAX_FRAME_RATE + 10;
        let expired: usize = (0..steps).map(|_| timers.advance(dt).len()).sum();
        assert_eq!(expired, 1);
        assert!(!timers.is_active(PowerUpKind::Invincibility));
    }

    #[test]
    fn test_steps_follow_frame_rate() {
        assert_eq!(Settings::default().steps_in(120), 7200);
        let settings = Settings {
            frame_rate: 30,
            ..Default::default()
        };
        assert_eq!(settings.steps_in(120), 3600);
    }

    #[test]
    fn test_sim_dt_never_below_cap() {
        let settings = Settings {
            frame_rate: u32::MAX,
            ..Default::default()
        };
        assert_eq!(settings.sim_dt(), 1.0 / MAX_FRAME_RATE as f32);
    }
}
