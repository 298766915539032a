//! Render-side helpers
//!
//! Nothing here touches pixels. Hosts pull a `RenderSnapshot` from the
//! simulation and use these helpers to decide what to draw with.

pub mod backdrop;
pub mod palette;

pub use backdrop::Backdrop;
pub use palette::colors;
