//! Bounce Climb entry point
//!
//! Runs headless autoplay sessions: loads config and high scores, lets the
//! demo policy throw until each run ends, then records the results.
//!
//! Usage: `bounce-climb [NAME] [RUNS]`

use bounce_climb::consts::SIM_DT;
use bounce_climb::persistence::KeyValueStore;
use bounce_climb::platform;
use bounce_climb::sim::{GameEvent, Run, TickInput};
use bounce_climb::{Config, HighScores};

/// Give up on a session after this much simulated time
const MAX_SESSION_SECS: f32 = 600.0;

#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> Option<Box<dyn KeyValueStore>> {
    let dir = std::env::var_os("BOUNCE_CLIMB_DATA")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("bounce_climb"));
    match bounce_climb::persistence::FileStore::open(&dir) {
        Ok(store) => Some(Box::new(store)),
        Err(e) => {
            log::warn!("Storage at {} unavailable: {e}", dir.display());
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_store() -> Option<Box<dyn KeyValueStore>> {
    match bounce_climb::persistence::LocalStore::open() {
        Ok(store) => Some(Box::new(store)),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

fn player_name() -> String {
    std::env::args().nth(1).unwrap_or_else(|| "Autoplay".to_string())
}

/// Number of back-to-back runs to play (second argument, default 1)
fn run_count() -> u32 {
    std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Play one run to completion (or the session limit)
fn play(run: &mut Run) {
    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let mut elapsed = 0.0;
    while !run.is_over() && elapsed < MAX_SESSION_SECS {
        run.step(&input, SIM_DT);
        elapsed += SIM_DT;

        for event in run.drain_events() {
            match event {
                GameEvent::HumanLanded { y } => log::info!("Climbed to {y:.2}m"),
                GameEvent::ProjectileConsumed { feature, .. } => {
                    log::info!("Projectile caught by {feature}")
                }
                GameEvent::RunEnded {
                    score,
                    max_altitude,
                } => log::info!("Run ended: {score:.2}m (hero peak {max_altitude:.2}m)"),
                other => log::debug!("{other:?}"),
            }
        }
    }

    if !run.is_over() {
        log::warn!("Session hit the {MAX_SESSION_SECS}s limit before the run ended");
    }
}

fn main() {
    platform::init_logging();
    log::info!("Bounce Climb (headless) starting...");

    let mut store = open_store();
    let config = store
        .as_deref()
        .map(|s| Config::load(s))
        .unwrap_or_default();
    let mut scores = store
        .as_deref()
        .map(|s| HighScores::load(s))
        .unwrap_or_default();

    let name = player_name();
    let mut run = Run::new(config, platform::random_seed());

    for round in 1..=run_count() {
        if round > 1 {
            run.reset_with_seed(platform::random_seed());
        }
        play(&mut run);

        println!("Run {round}: {:.2}m", run.score());
        if let Some(rank) = scores.potential_rank(run.score()) {
            log::info!("Run {round} would place #{rank}");
        }
        if let Some(rank) = run.submit_score(&name, platform::now_ms(), &mut scores) {
            println!("New high score, rank #{rank}");
        }
    }

    if let Some(store) = store.as_deref_mut() {
        if let Err(e) = scores.save(store) {
            log::warn!("Failed to save high scores: {e}");
        }
    }

    for (i, entry) in scores.entries.iter().enumerate() {
        println!("{:>2}. {:<16} {:>7.2}m", i + 1, entry.name, entry.score);
    }
}
