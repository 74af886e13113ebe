//! Space Dodger - native headless driver
//!
//! Plays a few attract-mode runs with the autopilot, records them in the
//! score store and prints the leaderboard.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use space_dodger::autopilot::autopilot_input;
use space_dodger::backdrop::Backdrop;
use space_dodger::highscores::{format_entry, format_timestamp};
use space_dodger::session::Leaderboard;
use space_dodger::sim::{GameEvent, RunSummary, TickInput};
use space_dodger::{FrameView, Presenter, Session, Settings, SqliteScoreStore};

/// Attract-mode runs per launch
const DEMO_RUNS: u32 = 3;
/// Seconds of play before a demo run is ended with a quit
const DEMO_SECONDS: u64 = 120;

/// Presenter that narrates the run through the logger
struct LogPresenter {
    frames: u64,
    /// Frames between HUD lines
    hud_every: u64,
}

impl Presenter for LogPresenter {
    fn draw(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        for event in view.events {
            match event {
                GameEvent::LevelUp { .. } | GameEvent::SpecialActivated { .. } => {
                    log::info!("{event:?}")
                }
                _ => log::debug!("{event:?}"),
            }
        }

        if self.frames % self.hud_every == 0 {
            let effects: Vec<&str> = view.active_effects.iter().map(|e| e.kind.as_str()).collect();
            log::debug!(
                "score {} | high {} | health {} | {} | effects {:?}",
                view.score,
                view.high_score,
                view.player.health,
                view.level_name,
                effects
            );
        }
    }

    fn game_over(&mut self, summary: &RunSummary, leaderboard: &Leaderboard) {
        log::info!(
            "Game over: {:?} with {} points at level {} after {} frames",
            summary.reason,
            summary.score,
            summary.level + 1,
            summary.frames
        );
        log::debug!("{} scores on the board", leaderboard.top.len());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Dodger (headless) starting...");

    let settings_path =
        std::env::var("SPACE_DODGER_SETTINGS").unwrap_or_else(|_| "settings.json".to_string());
    let settings = Settings::load(&settings_path);

    let base_seed = settings.seed.unwrap_or_else(clock_seed);
    let mut rng = Pcg32::seed_from_u64(base_seed);
    let backdrop = Backdrop::resolve(
        &settings.background_path,
        settings.play_width,
        settings.play_height,
        &mut rng,
    );
    log::debug!("Placeholder backdrop: {}", backdrop.is_placeholder());

    let store = match SqliteScoreStore::open(&settings.database_path) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("{e}; scores will not survive this session");
            match SqliteScoreStore::open_in_memory() {
                Ok(store) => store,
                Err(e) => {
                    log::error!("No score store available: {e}");
                    std::process::exit(1);
                }
            }
        }
    };

    let mut session = Session::new(settings, store);
    let dt = session.settings().sim_dt();
    let max_frames = session.settings().steps_in(DEMO_SECONDS);
    let mut presenter = LogPresenter {
        frames: 0,
        // HUD once a second
        hud_every: session.settings().steps_in(1),
    };

    for run in 0..DEMO_RUNS {
        session.start_run(base_seed.wrapping_add(run as u64));
        loop {
            let Some(state) = session.state() else { break };
            let input = if state.frame >= max_frames {
                TickInput {
                    quit: true,
                    ..Default::default()
                }
            } else {
                autopilot_input(state)
            };
            if session.advance(dt, &input, &mut presenter).is_some() {
                break;
            }
        }
    }
    session.return_to_idle();

    let leaderboard = session.leaderboard();
    println!("\nTop scores:");
    for (i, entry) in leaderboard.top.iter().enumerate() {
        println!("  {}", format_entry(i + 1, entry));
    }
    println!(
        "Best: {} ({})",
        leaderboard.best.score,
        format_timestamp(&leaderboard.best.timestamp)
    );
}

/// Seed from the wall clock when none is configured
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
