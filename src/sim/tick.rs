//! Per-frame simulation step
//!
//! Fixed order each frame: input, level check, spawn, move/reap, collide,
//! special ability, effect timers, particles.

use super::collision::{HazardResolution, resolve_hazards, resolve_power_ups};
use super::effects::apply_magnet;
use super::spawn::{check_level_up, spawn_entities};
use super::state::{EndReason, GameEvent, GamePhase, GameState, RunSummary};
use crate::consts::COMBO_STEP;

/// Input snapshot for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Special ability key held
    pub special: bool,
    /// Window closed / quit requested
    pub quit: bool,
}

impl TickInput {
    fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the run by one step of `dt` seconds
///
/// Returns the run summary when this step ended the run. Steps after the run
/// ended are no-ops.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<RunSummary> {
    if state.phase == GamePhase::GameOver {
        return None;
    }
    state.events.clear();

    if input.quit {
        return Some(end_run(state, EndReason::Quit));
    }
    state.frame += 1;

    // 1. Input
    let direction = input.horizontal();
    if direction != 0.0 {
        state.player.move_horizontal(direction, state.play_width);
    }

    // 2. Difficulty
    check_level_up(state);

    // 3. Spawn
    spawn_entities(state);

    // 4. Move and reap
    advance_hazards(state);
    advance_power_ups(state);

    // 5. Collisions
    if resolve_hazards(state) == HazardResolution::Destroyed {
        return Some(end_run(state, EndReason::Destroyed));
    }
    resolve_power_ups(state);

    // 6. Special ability
    state.player.charge_special();
    if input.special && state.player.activate_special() {
        clear_hazards(state);
    }

    // 7. Effects
    for kind in state.effects.advance(dt) {
        state.player.expire_effect(kind);
        log::debug!("{} effect expired", kind.as_str());
        state.events.push(GameEvent::EffectExpired(kind));
    }
    state.player.clamp_to(state.play_width);
    if state.player.magnet {
        let target = state.player.pos;
        apply_magnet(&mut state.power_ups, target);
    }

    // 8. Cosmetics
    state.update_particles();
    state.stars.drift();

    None
}

/// Move hazards; those leaving the bottom score a dodge
fn advance_hazards(state: &mut GameState) {
    let player_pos = state.player.pos;
    for hazard in &mut state.hazards {
        hazard.update(player_pos);
    }

    let play_height = state.play_height;
    let before = state.hazards.len();
    state.hazards.retain(|h| !h.is_below(play_height));
    for _ in state.hazards.len()..before {
        record_dodge(state);
    }
}

fn record_dodge(state: &mut GameState) {
    let player = &mut state.player;
    player.combo += 1;
    let bonus = if player.combo % COMBO_STEP == 0 {
        (player.combo / COMBO_STEP) as u64
    } else {
        0
    };
    state.score += 1 + bonus;
    state.events.push(GameEvent::HazardDodged {
        combo: player.combo,
        bonus,
    });
}

fn advance_power_ups(state: &mut GameState) {
    let play_height = state.play_height;
    for power_up in &mut state.power_ups {
        power_up.update();
    }
    state.power_ups.retain(|p| !p.is_below(play_height));
}

/// Destroy every live hazard, one point each
fn clear_hazards(state: &mut GameState) {
    let cleared: Vec<_> = state.hazards.drain(..).collect();
    for hazard in &cleared {
        state.spawn_particles(hazard.center(), hazard.color());
    }
    state.score += cleared.len() as u64;
    log::debug!("Special ability cleared {} hazards", cleared.len());
    state.events.push(GameEvent::SpecialActivated {
        cleared: cleared.len(),
    });
}

fn end_run(state: &mut GameState, reason: EndReason) -> RunSummary {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Run over ({:?}) after {} frames: score {} on level {}",
        reason,
        state.frame,
        state.score,
        state.level + 1
    );
    RunSummary {
        score: state.score,
        level: state.level,
        frames: state.frame,
        reason,
    }
}
