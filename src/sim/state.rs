//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; no module-level globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::EffectTimers;
use super::entity::{Hazard, PowerUp, PowerUpKind};
use super::starfield::{DRIFT_STAR_COUNT, Starfield};
use crate::Color;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Health reached zero
    Destroyed,
    /// Quit signal from the presentation layer
    Quit,
}

/// Final outcome handed to persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub frames: u64,
    pub reason: EndReason,
}

/// Things that happened during the last step (for HUD/audio hooks)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A hazard left the bottom of the play area
    HazardDodged { combo: u32, bonus: u64 },
    PlayerHit { health: u8 },
    ShieldAbsorbed,
    /// Hazard touched the player while invincible
    HitIgnored,
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    LevelUp { level: u32 },
    SpecialActivated { cleared: usize },
    GameOver { score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the square hitbox
    pub pos: Vec2,
    pub size: f32,
    /// Horizontal speed in px/frame
    pub speed: f32,
    pub health: u8,
    pub shield: bool,
    pub invincible: bool,
    pub magnet: bool,
    /// Special ability meter, 0-100
    pub special_charge: f32,
    /// Consecutive dodges since the last hit
    pub combo: u32,
}

impl Player {
    pub fn new(play_width: f32, play_height: f32) -> Self {
        let size = PLAYER_BASE_SIZE;
        Self {
            pos: Vec2::new((play_width / 2.0).floor(), play_height - 2.0 * size),
            size,
            speed: PLAYER_BASE_SPEED,
            health: PLAYER_MAX_HEALTH,
            shield: false,
            invincible: false,
            magnet: false,
            special_charge: 0.0,
            combo: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Shift horizontally by `direction` (-1, 0, 1) steps, clamped to the play area
    pub fn move_horizontal(&mut self, direction: f32, play_width: f32) {
        self.pos.x += direction * self.speed;
        self.clamp_to(play_width);
    }

    /// Keep the whole hitbox inside the play area (size can grow back on expiry)
    pub fn clamp_to(&mut self, play_width: f32) {
        let max_x = (play_width - self.size).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    pub fn increase_speed(&mut self) {
        self.speed = (self.speed * SPEED_BOOST).min(PLAYER_MAX_SPEED);
    }

    pub fn shrink(&mut self) {
        self.size = (self.size * SHRINK_FACTOR).max(PLAYER_MIN_SIZE);
    }

    pub fn charge_special(&mut self) {
        self.special_charge = (self.special_charge + SPECIAL_CHARGE_RATE).min(SPECIAL_CHARGE_MAX);
    }

    pub fn special_ready(&self) -> bool {
        self.special_charge >= SPECIAL_CHARGE_MAX
    }

    /// Spend a full meter; false if not charged
    pub fn activate_special(&mut self) -> bool {
        if self.special_ready() {
            self.special_charge = 0.0;
            true
        } else {
            false
        }
    }

    /// Apply a collected power-up's immediate effect
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.shield = true,
            PowerUpKind::Speed => self.increase_speed(),
            PowerUpKind::Shrink => self.shrink(),
            PowerUpKind::Invincibility => self.invincible = true,
            PowerUpKind::Magnet => self.magnet = true,
        }
    }

    /// Revert a timed effect to baseline
    pub fn expire_effect(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => {}
            PowerUpKind::Speed => self.speed = PLAYER_BASE_SPEED,
            PowerUpKind::Shrink => self.size = PLAYER_BASE_SIZE,
            PowerUpKind::Invincibility => self.invincible = false,
            PowerUpKind::Magnet => self.magnet = false,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// Frames left to live
    pub life: u32,
}

/// An active effect for HUD display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    /// Seconds left; None for the shield
    pub remaining: Option<f32>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub play_width: f32,
    pub play_height: f32,
    pub phase: GamePhase,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub power_ups: Vec<PowerUp>,
    pub effects: EffectTimers,
    pub score: u64,
    /// 0-based level
    pub level: u32,
    /// Per-frame hazard spawn probability
    pub spawn_rate: f64,
    /// Added to every hazard's base speed at spawn
    pub hazard_speed_bonus: f32,
    /// Simulation step counter
    pub frame: u64,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    pub stars: Starfield,
    /// Events from the most recent step
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run on the default play area
    pub fn new(seed: u64) -> Self {
        Self::with_play_area(seed, PLAY_WIDTH, PLAY_HEIGHT)
    }

    pub fn with_play_area(seed: u64, play_width: f32, play_height: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = Starfield::generate(DRIFT_STAR_COUNT, play_width, play_height, &mut rng);
        Self {
            seed,
            rng,
            play_width,
            play_height,
            phase: GamePhase::Running,
            player: Player::new(play_width, play_height),
            hazards: Vec::new(),
            power_ups: Vec::new(),
            effects: EffectTimers::new(),
            score: 0,
            level: 0,
            spawn_rate: BASE_SPAWN_RATE,
            hazard_speed_bonus: 0.0,
            frame: 0,
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            stars,
            events: Vec::new(),
        }
    }

    pub fn level_name(&self) -> &'static str {
        crate::level_name(self.level)
    }

    /// Timed effects plus the shield, in display order
    pub fn active_effects(&self) -> Vec<ActiveEffect> {
        let mut active: Vec<ActiveEffect> = self
            .effects
            .active()
            .map(|(kind, secs)| ActiveEffect {
                kind,
                remaining: Some(secs),
            })
            .collect();
        if self.player.shield {
            active.push(ActiveEffect {
                kind: PowerUpKind::Shield,
                remaining: None,
            });
        }
        active
    }

    /// Emit a burst of particles around `center`, respecting the cap
    pub fn spawn_particles(&mut self, center: Vec2, color: Color) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..BURST_PARTICLES.min(room) {
            let offset = Vec2::new(
                self.rng.random_range(-10..=10) as f32,
                self.rng.random_range(-10..=10) as f32,
            );
            let vel = Vec2::new(
                self.rng.random_range(-2.0..=2.0),
                self.rng.random_range(-2.0..=2.0),
            );
            self.particles.push(Particle {
                pos: center + offset,
                vel,
                size: self.rng.random_range(2..=5) as f32,
                color,
                life: self.rng.random_range(20..=40),
            });
        }
    }

    /// Move particles and drop the expired ones
    pub fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }
}
