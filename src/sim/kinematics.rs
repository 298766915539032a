//! Per-tick motion for stars, hazards, projectiles and the ship

use glam::Vec2;
use rand::Rng;

use super::geom::Rect;
use super::state::{Hazard, HazardKind, Projectile, ProjectileKind, Ship, Star};
use crate::wrap_degrees;

/// Star speeds; a star's size matches its speed so faster stars read as closer
const STAR_SPEEDS: [f32; 3] = [1.0, 2.0, 3.0];

/// Scatter `count` stars uniformly over `field`
pub fn scatter_stars<R: Rng>(rng: &mut R, field: &Rect, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| {
            let speed = STAR_SPEEDS[rng.random_range(0..STAR_SPEEDS.len())];
            Star {
                pos: Vec2::new(
                    rng.random_range(field.left()..=field.right()),
                    rng.random_range(field.top()..=field.bottom()),
                ),
                speed,
                size: speed,
            }
        })
        .collect()
}

/// Scroll stars left; stars leaving on the left re-enter on the right at a
/// fresh random height
pub fn update_stars<R: Rng>(stars: &mut [Star], rng: &mut R, field: &Rect, multiplier: f32) {
    for star in stars.iter_mut() {
        star.pos.x -= star.speed * multiplier;
        if star.pos.x < field.left() {
            star.pos.x = field.right();
            star.pos.y = rng.random_range(field.top()..=field.bottom());
        }
    }
}

/// Move hazards left at their spawn-time speed and spin debris
pub fn update_hazards(hazards: &mut [Hazard], growth_per_tick: f32) {
    for hazard in hazards.iter_mut() {
        hazard.pos.x -= hazard.speed;
        if growth_per_tick > 0.0 {
            // Grow around the center so the lane doesn't drift
            hazard.pos -= Vec2::splat(growth_per_tick / 2.0);
            hazard.size += growth_per_tick;
        }
        if let HazardKind::Debris { spin } = hazard.kind {
            hazard.angle = wrap_degrees(hazard.angle + spin);
        }
    }
}

/// Advance bullets and drop anything that left the field or expired
pub fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    bullet_speed: f32,
    field: &Rect,
    now_ms: u64,
) {
    for p in projectiles.iter_mut() {
        if let ProjectileKind::Bullet = p.kind {
            p.rect = p.rect.translated(Vec2::new(bullet_speed, 0.0));
        }
    }
    projectiles.retain(|p| match p.kind {
        ProjectileKind::Bullet => p.rect.left() <= field.right(),
        ProjectileKind::Beam { expires_at_ms } => now_ms < expires_at_ms,
    });
}

/// Move the ship by its speed along `direction` (components in -1..=1),
/// then keep it inside the play area
pub fn move_ship(ship: &mut Ship, direction: Vec2, field: &Rect, inset_factor: f32) {
    let moved = ship.rect.translated(direction * ship.speed);
    ship.rect = moved.clamped_into(&ship.play_area(field, inset_factor));
}
