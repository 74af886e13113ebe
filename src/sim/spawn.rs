//! Hazard/power-up spawning and difficulty progression

use rand::Rng;

use super::entity::{Hazard, HazardKind, PowerUp, PowerUpKind};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Score needed to leave `level` (0-based)
pub fn level_threshold(level: u32) -> u64 {
    LEVEL_SCORE_STEP * (level as u64 + 1)
}

/// Hazard spawn probability for a level
pub fn spawn_rate_for_level(level: u32) -> f64 {
    (BASE_SPAWN_RATE * (1.0 + level as f64 * SPAWN_RATE_PER_LEVEL)).min(MAX_SPAWN_RATE)
}

/// Advance one level if the score crossed the current threshold
pub fn check_level_up(state: &mut GameState) -> bool {
    if state.score < level_threshold(state.level) {
        return false;
    }
    state.level += 1;
    state.hazard_speed_bonus += HAZARD_SPEED_PER_LEVEL;
    state.spawn_rate = spawn_rate_for_level(state.level);
    log::info!(
        "Level {} - {} (spawn rate {:.3})",
        state.level + 1,
        state.level_name(),
        state.spawn_rate
    );
    state.events.push(GameEvent::LevelUp { level: state.level });
    true
}

/// Per-frame spawn roll for hazards and power-ups
pub fn spawn_entities(state: &mut GameState) {
    if state.hazards.len() < MAX_HAZARDS && state.rng.random_bool(state.spawn_rate) {
        let kind = HazardKind::random(&mut state.rng);
        let hazard = Hazard::spawn(kind, state.play_width, state.hazard_speed_bonus, &mut state.rng);
        state.hazards.push(hazard);
    }

    if state.power_ups.len() < MAX_POWER_UPS && state.rng.random_bool(POWER_UP_SPAWN_CHANCE) {
        let kind = PowerUpKind::random(&mut state.rng);
        let power_up = PowerUp::spawn(kind, state.play_width, &mut state.rng);
        log::debug!("Spawned {} power-up", kind.as_str());
        state.power_ups.push(power_up);
    }
}
