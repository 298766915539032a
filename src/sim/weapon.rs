//! Weapon triggering and beam upkeep
//!
//! Cooldowns and beam lifetimes are wall-clock based (milliseconds from a
//! monotonic clock) so they hold up when frame pacing drifts.

use glam::Vec2;

use super::geom::Rect;
use super::state::{Projectile, ProjectileKind, Ship, Weapon};

/// Handle a fire event; returns true if the weapon actually fired
///
/// Bullet weapons honor the event once `cooldown_ms` has passed since the
/// last shot. Beam weapons honor it only when no beam is live and the
/// cooldown since the previous trigger has passed. Anything else is a silent
/// no-op.
pub fn fire(ship: &mut Ship, projectiles: &mut Vec<Projectile>, field: &Rect, now_ms: u64) -> bool {
    let muzzle = ship.muzzle();
    match &mut ship.weapon {
        Weapon::Bullet {
            cooldown_ms,
            size,
            last_shot_ms,
            ..
        } => {
            if !cooled_down(*last_shot_ms, *cooldown_ms, now_ms) {
                return false;
            }
            *last_shot_ms = Some(now_ms);
            projectiles.push(Projectile {
                kind: ProjectileKind::Bullet,
                rect: Rect::new(muzzle.x, muzzle.y - size.y / 2.0, size.x, size.y),
            });
            true
        }
        Weapon::Beam {
            cooldown_ms,
            duration_ms,
            thickness,
            active,
            started_ms,
        } => {
            let live = *active && started_ms.is_some_and(|s| now_ms < s + *duration_ms);
            if live || !cooled_down(*started_ms, *cooldown_ms, now_ms) {
                return false;
            }
            *active = true;
            *started_ms = Some(now_ms);
            emit_beam(
                projectiles,
                beam_rect(muzzle, *thickness, field),
                now_ms + *duration_ms,
            );
            log::debug!("Beam triggered at {now_ms} ms");
            true
        }
    }
}

/// Keep a live beam attached to the ship, or retire it once expired
///
/// Call once per tick after the ship has moved.
pub fn sustain_beam(ship: &mut Ship, projectiles: &mut Vec<Projectile>, field: &Rect, now_ms: u64) {
    let muzzle = ship.muzzle();
    let Weapon::Beam {
        duration_ms,
        thickness,
        active,
        started_ms,
        ..
    } = &mut ship.weapon
    else {
        return;
    };
    if !*active {
        return;
    }

    let expires_at_ms = started_ms.map_or(now_ms, |s| s + *duration_ms);
    if now_ms >= expires_at_ms {
        *active = false;
        projectiles.retain(|p| !p.is_beam());
        return;
    }
    emit_beam(projectiles, beam_rect(muzzle, *thickness, field), expires_at_ms);
}

/// Replace any existing beam with a fresh one; only one beam may exist
fn emit_beam(projectiles: &mut Vec<Projectile>, rect: Rect, expires_at_ms: u64) {
    projectiles.retain(|p| !p.is_beam());
    projectiles.push(Projectile {
        kind: ProjectileKind::Beam { expires_at_ms },
        rect,
    });
}

/// Beam geometry: from the muzzle to the right edge of the field
fn beam_rect(muzzle: Vec2, thickness: f32, field: &Rect) -> Rect {
    Rect::new(
        muzzle.x,
        muzzle.y - thickness / 2.0,
        field.right() - muzzle.x,
        thickness,
    )
}

#[inline]
fn cooled_down(last_ms: Option<u64>, cooldown_ms: u64, now_ms: u64) -> bool {
    last_ms.is_none_or(|last| now_ms.saturating_sub(last) >= cooldown_ms)
}
