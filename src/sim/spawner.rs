//! Hazard spawning
//!
//! A frame counter emits one hazard every `spawn_interval_ticks`. One spawn
//! in five (by default) is debris, the rest are asteroids.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::{Hazard, HazardKind};
use crate::consts::SPAWN_OFFSET_X;
use crate::settings::Settings;

/// Tick-counting hazard spawner
#[derive(Debug, Clone, Default, Serialize)]
pub struct Spawner {
    counter: u32,
}

impl Spawner {
    /// Advance one tick; returns a new hazard when the interval elapses
    pub fn tick<R: Rng>(
        &mut self,
        rng: &mut R,
        settings: &Settings,
        multiplier: f32,
    ) -> Option<Hazard> {
        self.counter += 1;
        if self.counter < settings.spawn_interval_ticks {
            return None;
        }
        self.counter = 0;
        Some(spawn_hazard(rng, settings, multiplier))
    }
}

/// Roll a hazard just off the right edge of the field
///
/// Speed is `base × multiplier` and stays fixed for the hazard's lifetime.
/// The vertical center is kept out of the top and bottom sixth of the field
/// so every spawn is reachable.
pub fn spawn_hazard<R: Rng>(rng: &mut R, settings: &Settings, multiplier: f32) -> Hazard {
    let margin = settings.field_height / 6.0;
    let center_y = rng.random_range(margin..=settings.field_height - margin);
    let angle = rng.random_range(0.0..360.0);

    let (kind, size, base_speed) = if rng.random_bool(settings.debris_chance) {
        let (lo, hi) = (settings.debris_spin_min, settings.debris_spin_max);
        let spin = if hi > lo { rng.random_range(lo..hi) } else { lo };
        (
            HazardKind::Debris { spin },
            settings.debris_size,
            settings.debris_speed,
        )
    } else {
        let size = rng.random_range(settings.asteroid_size_min..=settings.asteroid_size_max);
        (HazardKind::Asteroid, size, settings.asteroid_speed)
    };

    let hazard = Hazard {
        kind,
        pos: Vec2::new(
            settings.field_width + SPAWN_OFFSET_X,
            center_y - size / 2.0,
        ),
        size,
        speed: base_speed * multiplier,
        angle,
    };
    log::debug!(
        "Spawned {} at y={:.0} size={:.0} speed={:.2}",
        kind.name(),
        center_y,
        size,
        hazard.speed
    );
    hazard
}
