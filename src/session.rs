//! Run lifecycle and the presentation contract
//!
//! A [`Session`] owns the score store and at most one run at a time:
//! Idle -> Running -> GameOver -> (Running | Idle). Every run that ends is
//! written to the store before the session reports GameOver.

use crate::clock::FrameClock;
use crate::highscores::{NO_TIMESTAMP, ScoreEntry, ScoreStore};
use crate::settings::Settings;
use crate::sim::starfield::Starfield;
use crate::sim::{
    ActiveEffect, GameEvent, GameState, Hazard, Particle, Player, PowerUp, RunSummary, TickInput,
    tick,
};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No run yet (title screen)
    Idle,
    Running,
    /// Last run finished and was handed to the store
    GameOver,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug)]
pub struct FrameView<'a> {
    pub player: &'a Player,
    pub hazards: &'a [Hazard],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub stars: &'a Starfield,
    pub events: &'a [GameEvent],
    pub score: u64,
    pub level: u32,
    pub level_name: &'static str,
    pub active_effects: Vec<ActiveEffect>,
    pub high_score: u64,
}

/// Game-over screen data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub top: Vec<ScoreEntry>,
    pub best: ScoreEntry,
}

impl Leaderboard {
    fn empty() -> Self {
        Self {
            top: Vec::new(),
            best: ScoreEntry {
                score: 0,
                timestamp: NO_TIMESTAMP.to_string(),
            },
        }
    }
}

/// Rendering side of the game loop
pub trait Presenter {
    /// Called once per rendered frame while a run is active
    fn draw(&mut self, view: &FrameView<'_>);

    /// Called once when a run ends, after its score was stored
    fn game_over(&mut self, _summary: &RunSummary, _leaderboard: &Leaderboard) {}
}

pub struct Session<S: ScoreStore> {
    settings: Settings,
    store: S,
    phase: RunPhase,
    state: Option<GameState>,
    clock: FrameClock,
    high_score: u64,
    last_summary: Option<RunSummary>,
    runs: u32,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(settings: Settings, store: S) -> Self {
        let high_score = store.max_score().unwrap_or_else(|e| {
            log::warn!("Could not read high score: {e}");
            0
        });
        let clock = FrameClock::new(settings.sim_dt(), settings.max_substeps);
        Self {
            settings,
            store,
            phase: RunPhase::Idle,
            state: None,
            clock,
            high_score,
            last_summary: None,
            runs: 0,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Best score known to this session (stored or just achieved)
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    /// Runs started so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Begin a fresh run, discarding any finished one
    ///
    /// A run still in progress is ended as a quit first, so its score is stored.
    pub fn start_run(&mut self, seed: u64) {
        if self.phase == RunPhase::Running {
            log::warn!("start_run called during a run; ending it as a quit");
            let quit = TickInput {
                quit: true,
                ..Default::default()
            };
            self.step(&quit);
        }
        let mut state =
            GameState::with_play_area(seed, self.settings.play_width, self.settings.play_height);
        state.max_particles = self.settings.max_particles();
        self.state = Some(state);
        self.clock.reset();
        self.phase = RunPhase::Running;
        self.runs += 1;
        log::info!("Run {} started (seed {seed})", self.runs);
    }

    /// Run exactly one simulation step
    pub fn step(&mut self, input: &TickInput) -> Option<RunSummary> {
        if self.phase != RunPhase::Running {
            return None;
        }
        let dt = self.clock.step();
        let summary = tick(self.state.as_mut()?, input, dt)?;
        self.finish_run(summary);
        Some(summary)
    }

    /// Feed wall-clock `elapsed` seconds: run the due steps, then draw once
    ///
    /// Held keys in `input` apply to every step run this frame.
    pub fn advance(
        &mut self,
        elapsed: f32,
        input: &TickInput,
        presenter: &mut impl Presenter,
    ) -> Option<RunSummary> {
        if self.phase != RunPhase::Running {
            return None;
        }

        let mut ended = None;
        if input.quit {
            ended = self.step(input);
        } else {
            for _ in 0..self.clock.advance(elapsed) {
                if let Some(summary) = self.step(input) {
                    ended = Some(summary);
                    break;
                }
            }
        }

        if let Some(view) = self.view() {
            presenter.draw(&view);
        }
        if let Some(summary) = &ended {
            presenter.game_over(summary, &self.leaderboard());
        }
        ended
    }

    /// Snapshot of the current run for drawing
    pub fn view(&self) -> Option<FrameView<'_>> {
        let state = self.state.as_ref()?;
        Some(FrameView {
            player: &state.player,
            hazards: &state.hazards,
            power_ups: &state.power_ups,
            particles: &state.particles,
            stars: &state.stars,
            events: &state.events,
            score: state.score,
            level: state.level,
            level_name: state.level_name(),
            active_effects: state.active_effects(),
            high_score: self.high_score.max(state.score),
        })
    }

    /// Top scores and the all-time best; empty if the store is unreadable
    pub fn leaderboard(&self) -> Leaderboard {
        let top = self.store.top_n(self.settings.top_scores_shown);
        let best = self.store.top_one();
        match (top, best) {
            (Ok(top), Ok(best)) => Leaderboard { top, best },
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Could not read leaderboard: {e}");
                Leaderboard::empty()
            }
        }
    }

    /// Leave the game-over screen without starting another run
    pub fn return_to_idle(&mut self) {
        self.state = None;
        self.phase = RunPhase::Idle;
    }

    fn finish_run(&mut self, summary: RunSummary) {
        if let Err(e) = self.store.insert(summary.score) {
            log::warn!("Score {} not recorded: {e}", summary.score);
        }
        if summary.score > self.high_score {
            log::info!("New high score: {}", summary.score);
            self.high_score = summary.score;
        }
        self.last_summary = Some(summary);
        self.phase = RunPhase::GameOver;
    }
}
