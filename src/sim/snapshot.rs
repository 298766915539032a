//! Read-only view of the game for renderers
//!
//! Drawing code never touches `GameState` directly; it gets a snapshot
//! built after the tick. Everything here is plain data and serializable so
//! the headless binary can dump it as JSON.

use serde::Serialize;

use super::geom::Rect;
use super::screen::Screen;
use super::state::{GameState, Hazard, Projectile, Star};
use crate::settings::HullShape;

/// What a renderer needs to draw the ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShipPose {
    pub rect: Rect,
    pub hull: HullShape,
    pub beam_active: bool,
}

/// Everything visible this frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub screen: Screen,
    /// Fade overlay opacity, `None` when no transition is running
    pub fade_alpha: Option<f32>,
    /// Roster cursor on the select screen
    pub selected_character: usize,
    pub character_name: String,
    pub ship: Option<ShipPose>,
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
    pub stars: Vec<Star>,
    pub score: u64,
    pub lives: u8,
    pub multiplier: f32,
}

impl GameState {
    /// Capture the current frame
    ///
    /// Outside a run the ship and entity lists are empty, lives read as the
    /// configured starting count and the multiplier is 1.
    pub fn snapshot(&self, now_ms: u64) -> RenderSnapshot {
        let session = self.session.as_ref();
        let character_name = match session {
            Some(s) => self.settings.roster[s.character].name.clone(),
            None => self.selected_character().name.clone(),
        };

        RenderSnapshot {
            screen: self.screen.current(),
            fade_alpha: self.screen.fade_alpha(now_ms),
            selected_character: self.selected,
            character_name,
            ship: session.map(|s| ShipPose {
                rect: s.ship.rect,
                hull: s.ship.hull,
                beam_active: s.ship.beam_active(),
            }),
            projectiles: session.map(|s| s.projectiles.clone()).unwrap_or_default(),
            hazards: session.map(|s| s.hazards.clone()).unwrap_or_default(),
            stars: self.stars.clone(),
            score: session.map_or(0, |s| s.score),
            lives: session.map_or(self.settings.starting_lives, |s| s.lives),
            multiplier: session.map_or(1.0, |s| s.difficulty.multiplier()),
        }
    }
}
