//! Parallax Arcade - A side-scrolling space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, screens)
//! - `settings`: Data-driven game balance and character roster
//! - `platform`: Monotonic clock, frame pacing and key mapping
//! - `renderer`: Render-side helpers that don't touch pixel data

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{CharacterSpec, HullShape, Settings, SettingsError, WeaponSpec};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICK_HZ: u32 = 60;
    /// Nominal tick length in milliseconds
    pub const TICK_MS: u64 = 1000 / TICK_HZ as u64;

    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 1240.0;
    pub const FIELD_HEIGHT: f32 = 760.0;

    /// Hazards enter this far past the right edge
    pub const SPAWN_OFFSET_X: f32 = 50.0;

    /// Default starting lives
    pub const STARTING_LIVES: u8 = 3;
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
