//! Platform layer
//!
//! Keeps host concerns out of the simulation:
//! - Monotonic millisecond clock and fixed-rate frame pacing
//! - Raw key → `TickInput` mapping

pub mod input;
pub mod time;

pub use input::{InputMapper, Key};
pub use time::{Clock, FramePacer};
