//! Collision detection and resolution
//!
//! Everything is rectangle overlap against trimmed hitboxes. Removal uses
//! mark-and-compact: hits are flagged during the scan and the collections are
//! compacted afterwards, never mutated mid-iteration.

use super::state::{Hazard, Projectile, Session, Ship};
use crate::settings::Settings;

/// Whether the run survived a pass that can cost lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Survived,
    /// Lives hit zero; the pass stopped right there
    Defeated,
}

/// Projectile vs hazard pass
///
/// Each projectile destroys at most one hazard per tick (first match wins).
/// Bullets are consumed by the hit; beams keep going. Returns the number of
/// hazards destroyed.
///
/// A beam spanning several hazards clears one of them per tick.
pub fn resolve_projectile_hits(
    projectiles: &mut Vec<Projectile>,
    hazards: &mut Vec<Hazard>,
    settings: &Settings,
) -> u32 {
    if projectiles.is_empty() || hazards.is_empty() {
        return 0;
    }

    let hitboxes: Vec<_> = hazards.iter().map(|h| h.hitbox(settings)).collect();
    let mut destroyed = vec![false; hazards.len()];
    let mut count = 0;

    projectiles.retain(|p| {
        let hit = (0..hitboxes.len()).find(|&i| !destroyed[i] && p.rect.overlaps(&hitboxes[i]));
        match hit {
            Some(i) => {
                destroyed[i] = true;
                count += 1;
                p.persists_through_hits()
            }
            None => true,
        }
    });

    compact(hazards, &destroyed);
    count
}

/// Ship vs hazard pass
///
/// Every hazard touching the ship's hitbox is removed and costs a life. The
/// scan stops as soon as the last life is gone, leaving the remaining
/// hazards untouched.
pub fn resolve_ship_hits(
    ship: &Ship,
    hazards: &mut Vec<Hazard>,
    lives: &mut u8,
    settings: &Settings,
) -> Outcome {
    let ship_box = ship.hitbox(settings.ship_hitbox_shrink);
    drain_costly(hazards, lives, |h| ship_box.overlaps(&h.hitbox(settings)), |h| {
        log::debug!("Ship hit by {}", h.kind.name());
        true
    })
}

/// Escape pass
///
/// Hazards past `settings.escape_x` are removed. Debris getting through costs
/// a life; asteroids leave for free.
pub fn resolve_escapes(hazards: &mut Vec<Hazard>, lives: &mut u8, settings: &Settings) -> Outcome {
    drain_costly(hazards, lives, |h| h.pos.x < settings.escape_x, |h| {
        let costly = h.kind.penalizes_escape();
        if costly {
            log::debug!("{} escaped", h.kind.name());
        }
        costly
    })
}

/// Run all three passes for a session in tick order (escapes, projectile
/// hits, ship hits), adding points for destroyed hazards
pub fn resolve_all(session: &mut Session, settings: &Settings) -> Outcome {
    if resolve_escapes(&mut session.hazards, &mut session.lives, settings) == Outcome::Defeated {
        return Outcome::Defeated;
    }

    let destroyed =
        resolve_projectile_hits(&mut session.projectiles, &mut session.hazards, settings);
    session.score += destroyed as u64 * settings.points_per_hit;

    resolve_ship_hits(&session.ship, &mut session.hazards, &mut session.lives, settings)
}

/// Remove hazards matching `hit`; each removal for which `costs_life`
/// returns true takes a life. Stops at zero lives.
fn drain_costly(
    hazards: &mut Vec<Hazard>,
    lives: &mut u8,
    hit: impl Fn(&Hazard) -> bool,
    costs_life: impl Fn(&Hazard) -> bool,
) -> Outcome {
    let mut removed = vec![false; hazards.len()];
    let mut outcome = Outcome::Survived;

    for (i, hazard) in hazards.iter().enumerate() {
        if !hit(hazard) {
            continue;
        }
        removed[i] = true;
        if costs_life(hazard) {
            *lives = lives.saturating_sub(1);
            if *lives == 0 {
                outcome = Outcome::Defeated;
                break;
            }
        }
    }

    compact(hazards, &removed);
    outcome
}

/// Drop every hazard whose flag is set
fn compact(hazards: &mut Vec<Hazard>, flags: &[bool]) {
    let mut index = 0;
    hazards.retain(|_| {
        let keep = !flags[index];
        index += 1;
        keep
    });
}
