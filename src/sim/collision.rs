//! Collision detection and response
//!
//! Everything in the game is an axis-aligned square, so detection is a plain
//! box overlap test. Response differs for hazards (damage) and power-ups
//! (pickup).

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::RED;

/// Axis-aligned box given by its top-left corner and extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn square(min: Vec2, edge: f32) -> Self {
        Self::new(min, Vec2::splat(edge))
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Outcome of resolving hazards against the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardResolution {
    Survived,
    /// Health hit zero; remaining hazards were left untouched
    Destroyed,
}

/// Resolve player/hazard contacts, removing every hazard that touched
pub fn resolve_hazards(state: &mut GameState) -> HazardResolution {
    let mut index = 0;
    while index < state.hazards.len() {
        let hazard = &state.hazards[index];
        let player_box = Aabb::square(state.player.pos, state.player.size);
        if !player_box.overlaps(&Aabb::square(hazard.pos, hazard.size)) {
            index += 1;
            continue;
        }
        state.hazards.remove(index);

        let player = &mut state.player;
        if player.invincible {
            state.events.push(GameEvent::HitIgnored);
            continue;
        }
        if player.shield {
            player.shield = false;
            state.events.push(GameEvent::ShieldAbsorbed);
        } else {
            player.health = player.health.saturating_sub(1);
            player.combo = 0;
            state.events.push(GameEvent::PlayerHit {
                health: player.health,
            });
        }
        let center = state.player.center();
        state.spawn_particles(center, RED);

        if !state.player.is_alive() {
            return HazardResolution::Destroyed;
        }
    }
    HazardResolution::Survived
}

/// Collect every power-up the player touches
pub fn resolve_power_ups(state: &mut GameState) {
    let mut index = 0;
    while index < state.power_ups.len() {
        let power_up = &state.power_ups[index];
        let player_box = Aabb::square(state.player.pos, state.player.size);
        if !player_box.overlaps(&Aabb::square(power_up.pos, power_up.size)) {
            index += 1;
            continue;
        }
        let power_up = state.power_ups.remove(index);
        let kind = power_up.kind;

        state.effects.start(kind);
        state.player.apply_power_up(kind);
        state.spawn_particles(power_up.center(), kind.color());
        log::debug!("Collected {} power-up", kind.as_str());
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
}
