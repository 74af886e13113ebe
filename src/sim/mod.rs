//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! input polling and storage:
//! - One `tick` per frame, fixed order of phases
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod effects;
pub mod entity;
pub mod spawn;
pub mod starfield;
pub mod state;
pub mod tick;

pub use collision::{Aabb, HazardResolution, resolve_hazards, resolve_power_ups};
pub use effects::{EffectTimers, apply_magnet};
pub use entity::{Hazard, HazardKind, HazardStats, PowerUp, PowerUpKind};
pub use spawn::{check_level_up, level_threshold, spawn_entities, spawn_rate_for_level};
pub use starfield::{Star, Starfield};
pub use state::{
    ActiveEffect, EndReason, GameEvent, GamePhase, GameState, Particle, Player, RunSummary,
};
pub use tick::{TickInput, tick};
