//! Colors for game elements

use crate::settings::HullShape;
use crate::sim::HazardKind;

pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const STAR: [f32; 4] = [0.9, 0.9, 1.0, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const BEAM: [f32; 4] = [0.4, 0.9, 1.0, 0.85];
    pub const ASTEROID: [f32; 4] = [0.55, 0.45, 0.4, 1.0];
    pub const DEBRIS: [f32; 4] = [0.7, 0.7, 0.8, 1.0];
    pub const HULL_SQUARE: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const HULL_CIRCLE: [f32; 4] = [0.4, 0.7, 1.0, 1.0];
    pub const HULL_TRIANGLE: [f32; 4] = [1.0, 0.4, 0.2, 1.0];
    pub const FADE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

pub fn hull_color(hull: HullShape) -> [f32; 4] {
    match hull {
        HullShape::Square => colors::HULL_SQUARE,
        HullShape::Circle => colors::HULL_CIRCLE,
        HullShape::Triangle => colors::HULL_TRIANGLE,
    }
}

pub fn hazard_color(kind: &HazardKind) -> [f32; 4] {
    match kind {
        HazardKind::Asteroid => colors::ASTEROID,
        HazardKind::Debris { .. } => colors::DEBRIS,
    }
}

/// Far (slow) stars are dimmer so the layers read as depth
pub fn star_color(speed: f32) -> [f32; 4] {
    let [r, g, b, _] = colors::STAR;
    let alpha = (0.35 + 0.2 * speed).clamp(0.0, 1.0);
    [r, g, b, alpha]
}

/// Overlay for a fade at `alpha` (0 = clear, 1 = black)
pub fn fade_overlay(alpha: f32) -> [f32; 4] {
    let [r, g, b, _] = colors::FADE;
    [r, g, b, alpha.clamp(0.0, 1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_depth_shading() {
        assert!(star_color(1.0)[3] < star_color(3.0)[3]);
        assert!(star_color(3.0)[3] <= 1.0);
    }

    #[test]
    fn test_fade_overlay_clamped() {
        assert_eq!(fade_overlay(1.5)[3], 1.0);
        assert_eq!(fade_overlay(0.25)[3], 0.25);
    }

    #[test]
    fn test_hazard_colors_by_kind() {
        assert_eq!(hazard_color(&HazardKind::Asteroid), colors::ASTEROID);
        assert_eq!(hazard_color(&HazardKind::Debris { spin: 3.0 }), colors::DEBRIS);
    }

    #[test]
    fn test_hull_colors_distinct() {
        assert_ne!(hull_color(HullShape::Square), hull_color(HullShape::Triangle));
    }
}
