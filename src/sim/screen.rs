//! Screen state machine with fade transitions
//!
//! A requested screen change fades out, swaps at the midpoint and fades back
//! in. Only one transition runs at a time; requests made while one is in
//! flight are dropped. Input is ignored while fading out.

use serde::{Deserialize, Serialize};

/// Top-level game screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    CharacterSelect,
    Playing,
    Paused,
    /// Run ended (no lives left)
    Lost,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "Menu",
            Screen::CharacterSelect => "CharacterSelect",
            Screen::Playing => "Playing",
            Screen::Paused => "Paused",
            Screen::Lost => "Lost",
        }
    }
}

/// Fade progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transition {
    Idle,
    /// Darkening toward `target`; the swap happens when this phase ends
    FadingOut { target: Screen, started_ms: u64 },
    /// New screen is live and brightening
    FadingIn { started_ms: u64 },
}

/// Current screen plus any fade in flight
#[derive(Debug, Clone)]
pub struct ScreenMachine {
    current: Screen,
    transition: Transition,
    /// Length of each fade phase
    fade_ms: u64,
}

impl ScreenMachine {
    pub fn new(fade_ms: u64) -> Self {
        Self {
            current: Screen::Menu,
            transition: Transition::Idle,
            fade_ms,
        }
    }

    #[inline]
    pub fn current(&self) -> Screen {
        self.current
    }

    #[inline]
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Input is dropped during fade-out so nothing acts on a screen that is
    /// about to disappear
    #[inline]
    pub fn accepts_input(&self) -> bool {
        !matches!(self.transition, Transition::FadingOut { .. })
    }

    /// Queue a change to `target`; returns false if a transition is already
    /// running
    pub fn request(&mut self, target: Screen, now_ms: u64) -> bool {
        if self.transition != Transition::Idle {
            log::debug!(
                "Dropped transition request {} -> {} (transition in flight)",
                self.current.as_str(),
                target.as_str()
            );
            return false;
        }
        self.transition = Transition::FadingOut {
            target,
            started_ms: now_ms,
        };
        true
    }

    /// Step the fade clock
    ///
    /// Returns `Some((from, to))` on the tick the swap takes effect; on-enter
    /// work for the new screen must run only then.
    pub fn advance(&mut self, now_ms: u64) -> Option<(Screen, Screen)> {
        match self.transition {
            Transition::FadingOut { target, started_ms } => {
                if now_ms.saturating_sub(started_ms) < self.fade_ms {
                    return None;
                }
                let from = self.current;
                self.current = target;
                // Fade-in starts at the boundary, not at whenever we noticed it
                let boundary = started_ms + self.fade_ms;
                self.transition = if now_ms.saturating_sub(boundary) >= self.fade_ms {
                    Transition::Idle
                } else {
                    Transition::FadingIn {
                        started_ms: boundary,
                    }
                };
                log::info!("Screen {} -> {}", from.as_str(), target.as_str());
                Some((from, target))
            }
            Transition::FadingIn { started_ms } => {
                if now_ms.saturating_sub(started_ms) >= self.fade_ms {
                    self.transition = Transition::Idle;
                }
                None
            }
            Transition::Idle => None,
        }
    }

    /// Swap immediately, cancelling any transition in flight, then fade in
    pub fn force(&mut self, target: Screen, now_ms: u64) {
        log::info!("Screen {} -> {} (forced)", self.current.as_str(), target.as_str());
        self.current = target;
        self.transition = if self.fade_ms == 0 {
            Transition::Idle
        } else {
            Transition::FadingIn { started_ms: now_ms }
        };
    }

    /// Opacity of the fade overlay (0 = clear, 1 = black), `None` when idle
    pub fn fade_alpha(&self, now_ms: u64) -> Option<f32> {
        let progress = |started_ms: u64| {
            if self.fade_ms == 0 {
                1.0
            } else {
                (now_ms.saturating_sub(started_ms) as f32 / self.fade_ms as f32).min(1.0)
            }
        };
        match self.transition {
            Transition::Idle => None,
            Transition::FadingOut { started_ms, .. } => Some(progress(started_ms)),
            Transition::FadingIn { started_ms } => Some(1.0 - progress(started_ms)),
        }
    }
}
