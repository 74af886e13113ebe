//! Attract-mode pilot
//!
//! Produces the input a reasonable player would give for the current frame:
//! sidestep the nearest hazard coming down on the ship, otherwise go for a
//! power-up, otherwise drift back to the middle.

use crate::sim::{GameState, Hazard, TickInput};

/// How far above the ship a hazard counts as a threat (px)
const LOOKAHEAD: f32 = 220.0;
/// Extra clearance on each side of the ship (px)
const MARGIN: f32 = 12.0;

/// Input for the next step of `state`
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = &state.player;
    let center_x = player.center().x;
    let mut input = TickInput::default();

    let threats: Vec<&Hazard> = if player.invincible {
        Vec::new()
    } else {
        state.hazards.iter().filter(|h| is_threat(state, h)).collect()
    };

    // Nearest threat: smallest vertical gap to the ship
    let nearest = threats.iter().min_by(|a, b| {
        gap(state, a)
            .partial_cmp(&gap(state, b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(hazard) = nearest {
        let max_x = (state.play_width - player.size).max(0.0);
        let mut go_left = hazard.center().x >= center_x;
        if go_left && player.pos.x <= 0.0 {
            go_left = false;
        } else if !go_left && player.pos.x >= max_x {
            go_left = true;
        }
        input.left = go_left;
        input.right = !go_left;
        input.special = player.special_ready();
        return input;
    }

    let target_x = state
        .power_ups
        .iter()
        .min_by(|a, b| {
            let da = a.center().distance_squared(player.center());
            let db = b.center().distance_squared(player.center());
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.center().x)
        .unwrap_or(state.play_width / 2.0);

    // Dead zone so the ship doesn't jitter around the target
    let dx = target_x - center_x;
    if dx > player.speed / 2.0 {
        input.right = true;
    } else if dx < -player.speed / 2.0 {
        input.left = true;
    }
    input
}

/// Hazard still above the ship, close, and overlapping its column
fn is_threat(state: &GameState, hazard: &Hazard) -> bool {
    let player = &state.player;
    let overlaps_column = hazard.pos.x - MARGIN < player.pos.x + player.size
        && hazard.pos.x + hazard.size + MARGIN > player.pos.x;
    let g = gap(state, hazard);
    overlaps_column && (-player.size..LOOKAHEAD).contains(&g)
}

/// Vertical distance from the hazard's bottom edge to the ship's top edge
fn gap(state: &GameState, hazard: &Hazard) -> f32 {
    state.player.pos.y - (hazard.pos.y + hazard.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPECIAL_CHARGE_MAX;
    use crate::sim::{HazardKind, PowerUp, PowerUpKind, tick};
    use glam::Vec2;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(11);
        state.spawn_rate = 0.0;
        state
    }

    fn hazard_above(state: &GameState, dx: f32) -> Hazard {
        let pos = state.player.pos + Vec2::new(dx, -120.0);
        Hazard::new(HazardKind::Asteroid, pos, 0.0)
    }

    #[test]
    fn test_dodges_away_from_threat() {
        let mut state = quiet_state();
        let hazard = hazard_above(&state, 20.0);
        state.hazards.push(hazard);
        let input = autopilot_input(&state);
        assert!(input.left && !input.right);

        state.hazards[0].pos.x = state.player.pos.x - 20.0;
        let input = autopilot_input(&state);
        assert!(input.right && !input.left);
    }

    #[test]
    fn test_ignores_distant_and_passed_hazards() {
        let mut state = quiet_state();
        let far = hazard_above(&state, 300.0);
        state.hazards.push(far);
        let mut passed = hazard_above(&state, 0.0);
        passed.pos.y = state.player.pos.y + 2.0 * state.player.size;
        state.hazards.push(passed);
        state.player.pos.x = (state.play_width - state.player.size) / 2.0;

        // Centred with nothing overhead: no input
        assert_eq!(autopilot_input(&state), TickInput::default());
    }

    #[test]
    fn test_turns_back_at_wall() {
        let mut state = quiet_state();
        state.player.pos.x = 0.0;
        let hazard = hazard_above(&state, 10.0);
        state.hazards.push(hazard);
        assert!(autopilot_input(&state).right);
    }

    #[test]
    fn test_chases_power_up_when_safe() {
        let mut state = quiet_state();
        let pos = Vec2::new(state.player.pos.x + 200.0, 100.0);
        state.power_ups.push(PowerUp::new(PowerUpKind::Shield, pos));
        assert!(autopilot_input(&state).right);
    }

    #[test]
    fn test_fires_special_only_when_charged_and_threatened() {
        let mut state = quiet_state();
        let hazard = hazard_above(&state, 0.0);
        state.hazards.push(hazard);
        assert!(!autopilot_input(&state).special);

        state.player.special_charge = SPECIAL_CHARGE_MAX;
        assert!(autopilot_input(&state).special);

        state.hazards.clear();
        assert!(!autopilot_input(&state).special);
    }

    #[test]
    fn test_invincible_ignores_threats() {
        let mut state = quiet_state();
        state.player.invincible = true;
        let hazard = hazard_above(&state, 20.0);
        state.hazards.push(hazard);
        let input = autopilot_input(&state);
        assert!(!input.left || !input.right);
        assert!(!input.special);
    }

    #[test]
    fn test_autopilot_run_is_deterministic() {
        let run = |seed| {
            let mut state = GameState::new(seed);
            for _ in 0..1800 {
                let input = autopilot_input(&state);
                if tick(&mut state, &input, crate::consts::SIM_DT).is_some() {
                    break;
                }
            }
            (state.frame, state.score, state.player.pos)
        };
        assert_eq!(run(99), run(99));
    }
}
