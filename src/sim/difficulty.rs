//! Score-driven difficulty curve
//!
//! The multiplier is a step function of score: every `score_per_level`
//! points adds `step` to a base of 1.0. It feeds hazard speed at spawn time
//! and star scroll speed. Each new level also nudges the ship's speed once.

use serde::{Deserialize, Serialize};

/// Difficulty tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Points needed per difficulty level
    pub score_per_level: u64,
    /// Multiplier increase per level
    pub step: f32,
    /// Ship speed added once per level gained
    pub ship_speed_nudge: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            score_per_level: 100,
            step: 0.25,
            ship_speed_nudge: 0.5,
        }
    }
}

impl DifficultyCurve {
    /// Difficulty level reached at `score` (0-based)
    #[inline]
    pub fn level(&self, score: u64) -> u32 {
        // score_per_level is validated non-zero by Settings
        (score / self.score_per_level.max(1)).min(u32::MAX as u64) as u32
    }

    /// `1 + floor(score / score_per_level) * step`
    #[inline]
    pub fn multiplier(&self, score: u64) -> f32 {
        1.0 + self.level(score) as f32 * self.step
    }
}

/// Per-session difficulty tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    level: u32,
    multiplier: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            level: 0,
            multiplier: 1.0,
        }
    }
}

impl Difficulty {
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Recompute from the current score
    ///
    /// Returns how many levels were gained since the last call, so the caller
    /// can apply the one-time per-level ship speed nudge. Score never
    /// decreases within a session, so the level never drops.
    pub fn update(&mut self, score: u64, curve: &DifficultyCurve) -> u32 {
        let level = curve.level(score);
        let gained = level.saturating_sub(self.level);
        if gained > 0 {
            self.level = level;
            self.multiplier = curve.multiplier(score);
            log::info!(
                "Difficulty level {} (multiplier {:.2}) at score {}",
                self.level,
                self.multiplier,
                score
            );
        }
        gained
    }
}
