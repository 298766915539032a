//! Parallax Arcade - headless native runner
//!
//! Drives the simulation at 60 Hz under the autopilot: menu → character
//! select → play until the run is lost or the time limit is hit. Snapshots
//! are logged as JSON at debug level (`RUST_LOG=debug`).
//!
//! Environment:
//! - `PARALLAX_SETTINGS`: path to a JSON settings file
//! - `PARALLAX_SEED`: run seed (defaults to the system time)
//! - `PARALLAX_BACKDROP`: background image to try loading
//! - `PARALLAX_DEMO_SECS`: time limit in seconds (default 30)

use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use parallax_arcade::Settings;
use parallax_arcade::consts::TICK_HZ;
use parallax_arcade::platform::{Clock, FramePacer, InputMapper};
use parallax_arcade::renderer::Backdrop;
use parallax_arcade::sim::{GameState, Screen, tick};

const DEFAULT_DEMO_SECS: u64 = 30;
const DEFAULT_BACKDROP: &str = "assets/background.png";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Parallax Arcade (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let settings = load_settings()?;
    let seed = load_seed()?;
    let demo_secs = match std::env::var("PARALLAX_DEMO_SECS") {
        Ok(s) => parse_var("PARALLAX_DEMO_SECS", &s)?,
        Err(_) => DEFAULT_DEMO_SECS,
    };

    let backdrop_path =
        std::env::var("PARALLAX_BACKDROP").unwrap_or_else(|_| DEFAULT_BACKDROP.to_string());
    let backdrop = Backdrop::load(&backdrop_path, |path| std::fs::read(path));
    log::debug!("Clear color {:?}", backdrop.clear_color());

    let mut state = GameState::new(settings, seed)?;
    log::info!("Game initialized with seed: {}", seed);

    let clock = Clock::new();
    let mut pacer = FramePacer::new();
    let mut input = InputMapper::new(true);
    let deadline_ms = demo_secs * 1000;

    loop {
        let now_ms = clock.now_ms();
        for _ in 0..pacer.due_ticks(now_ms) {
            let tick_input = input.map(&[], &[]);
            tick(&mut state, &tick_input, clock.now_ms());

            if state.time_ticks % TICK_HZ as u64 == 0 {
                let snapshot = state.snapshot(clock.now_ms());
                log::debug!("{}", serde_json::to_string(&snapshot)?);
            }
        }

        if state.quit_requested {
            log::info!("Quit requested");
            break;
        }
        if state.screen.current() == Screen::Lost {
            break;
        }
        if now_ms >= deadline_ms {
            log::info!("Demo time limit reached");
            break;
        }
        std::thread::sleep(Duration::from_millis(pacer.until_next_ms()));
    }

    let snapshot = state.snapshot(clock.now_ms());
    log::info!(
        "Final score {} as {} (lives {}, x{:.2}) after {} ticks",
        snapshot.score,
        snapshot.character_name,
        snapshot.lives,
        snapshot.multiplier,
        state.time_ticks
    );
    Ok(())
}

fn load_settings() -> Result<Settings> {
    let Ok(path) = std::env::var("PARALLAX_SETTINGS") else {
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading settings {path}"))?;
    let settings =
        Settings::from_json(&json).with_context(|| format!("invalid settings {path}"))?;
    log::info!("Loaded settings from {path}");
    Ok(settings)
}

fn load_seed() -> Result<u64> {
    if let Ok(s) = std::env::var("PARALLAX_SEED") {
        return parse_var("PARALLAX_SEED", &s);
    }
    let since_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(since_epoch.as_millis() as u64)
}

/// Parse an environment variable's value, naming the variable on failure
fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{name}={value:?} is not a valid number"))
}
