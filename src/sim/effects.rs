//! Timed power-up effects
//!
//! One countdown per duration-bearing power-up kind, measured in seconds of
//! simulated time so effect lengths do not depend on the step rate.

use glam::Vec2;

use super::entity::{PowerUp, PowerUpKind};
use crate::consts::*;

/// Remaining time below this counts as expired (absorbs float drift)
const EXPIRY_EPSILON: f32 = 1e-3;

/// Countdown registry, at most one active instance per kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectTimers {
    remaining: [f32; PowerUpKind::ALL.len()],
}

impl EffectTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the timer for `kind`. Re-pickup resets, never stacks.
    ///
    /// Returns false for kinds without a duration.
    pub fn start(&mut self, kind: PowerUpKind) -> bool {
        match kind.duration() {
            Some(secs) => {
                self.remaining[kind as usize] = secs;
                true
            }
            None => false,
        }
    }

    /// Seconds left on `kind` (0 when inactive)
    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        self.remaining[kind as usize]
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining[kind as usize] > 0.0
    }

    /// Active timed effects with their remaining seconds
    pub fn active(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .filter(|&kind| self.is_active(kind))
            .map(|kind| (kind, self.remaining(kind)))
    }

    /// Count every active timer down by `dt` seconds
    ///
    /// Returns the kinds that expired during this call.
    pub fn advance(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = &mut self.remaining[kind as usize];
            if *slot <= 0.0 {
                continue;
            }
            *slot -= dt;
            if *slot <= EXPIRY_EPSILON {
                *slot = 0.0;
                expired.push(kind);
            }
        }
        expired
    }
}

/// Pull power-ups within MAGNET_RADIUS toward `target`
pub fn apply_magnet(power_ups: &mut [PowerUp], target: Vec2) {
    for power_up in power_ups.iter_mut() {
        let delta = target - power_up.pos;
        let dist = delta.length();
        if dist > 0.0 && dist < MAGNET_RADIUS {
            power_up.pos += delta / dist * MAGNET_PULL;
        }
    }
}
