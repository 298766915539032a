//! Background image with a solid-color fallback

use std::fmt::Display;

use super::colors;

/// Screen background
///
/// `H` is whatever handle the host's image loader produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Backdrop<H> {
    Image(H),
    Solid([f32; 4]),
}

impl<H> Backdrop<H> {
    /// Run `loader` for `name`; a failing load is logged and degrades to the
    /// plain background color instead of aborting
    pub fn load<E, F>(name: &str, loader: F) -> Self
    where
        E: Display,
        F: FnOnce(&str) -> Result<H, E>,
    {
        match loader(name) {
            Ok(handle) => {
                log::info!("Loaded backdrop {name}");
                Backdrop::Image(handle)
            }
            Err(e) => {
                log::warn!("Backdrop {name} unavailable ({e}), using solid background");
                Backdrop::Solid(colors::BACKGROUND)
            }
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Backdrop::Solid(_))
    }

    /// Color to clear with before drawing the image (or instead of it)
    pub fn clear_color(&self) -> [f32; 4] {
        match self {
            Backdrop::Image(_) => [0.0, 0.0, 0.0, 1.0],
            Backdrop::Solid(color) => *color,
        }
    }
}
