//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed-rate tick per frame
//! - A single seeded RNG stream
//! - Stable iteration order (insertion order of the entity vectors)
//! - No rendering or platform dependencies
//!
//! Time-based rules (cooldowns, beam lifetime, fades) take the caller's
//! monotonic millisecond clock as an argument.

pub mod collision;
pub mod difficulty;
pub mod geom;
pub mod kinematics;
pub mod screen;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::Outcome;
pub use difficulty::{Difficulty, DifficultyCurve};
pub use geom::Rect;
pub use screen::{Screen, ScreenMachine, Transition};
pub use snapshot::{RenderSnapshot, ShipPose};
pub use spawner::Spawner;
pub use state::{
    GameState, Hazard, HazardKind, Projectile, ProjectileKind, Session, Ship, Star, Weapon,
    SHIP_SPAWN_X,
};
pub use tick::{HeldKeys, TickInput, tick};
