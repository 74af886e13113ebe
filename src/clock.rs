//! Fixed-step frame clock
//!
//! Turns variable wall-clock frame times into a whole number of fixed
//! simulation steps, carrying the remainder to the next frame.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap honoured (e.g. after a window drag or breakpoint)
pub const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    /// Total steps handed out
    steps: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            steps: 0,
        }
    }

    /// Seconds per step
    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn total_steps(&self) -> u64 {
        self.steps
    }

    /// Feed `elapsed` seconds of wall-clock time; returns how many steps to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        // Small tolerance so an exact multiple of the step isn't lost to rounding
        while self.accumulator + self.step * 1e-3 >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        if substeps == self.max_substeps && self.accumulator >= self.step {
            // Too far behind; drop the backlog instead of spiralling
            self.accumulator = 0.0;
        }
        self.steps += substeps as u64;
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_per_matching_frame() {
        let mut clock = FrameClock::default();
        for _ in 0..120 {
            assert_eq!(clock.advance(SIM_DT), 1);
        }
        assert_eq!(clock.total_steps(), 120);
    }

    #[test]
    fn test_slow_frames_run_multiple_steps() {
        let mut clock = FrameClock::default();
        // 30 fps render loop -> two steps per frame
        let steps: u32 = (0..60).map(|_| clock.advance(2.0 * SIM_DT)).sum();
        assert_eq!(steps, 120);
    }

    #[test]
    fn test_fast_frames_accumulate() {
        let mut clock = FrameClock::default();
        // 120 fps render loop -> a step every other frame
        let steps: u32 = (0..120).map(|_| clock.advance(SIM_DT / 2.0)).sum();
        assert_eq!(steps, 60);
    }

    #[test]
    fn test_huge_gap_is_capped() {
        let mut clock = FrameClock::new(SIM_DT, 4);
        assert_eq!(clock.advance(10.0), 4);
        // Backlog dropped
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-1.0), 0);
    }
}
