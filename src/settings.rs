//! Game settings and balance
//!
//! Every tuning constant lives here so a run can be reconfigured from JSON
//! without touching the simulation. Settings are validated before a
//! `GameState` is built; a malformed file is rejected up front.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, STARTING_LIVES};
use crate::sim::difficulty::DifficultyCurve;
use crate::sim::geom::Rect;

/// Ship silhouette drawn by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HullShape {
    #[default]
    Square,
    Circle,
    Triangle,
}

impl HullShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            HullShape::Square => "Square",
            HullShape::Circle => "Circle",
            HullShape::Triangle => "Triangle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" | "quad" => Some(HullShape::Square),
            "circle" => Some(HullShape::Circle),
            "triangle" | "tri" => Some(HullShape::Triangle),
            _ => None,
        }
    }
}

/// Weapon a character flies with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeaponSpec {
    /// Single shots, rate-limited by `cooldown_ms`
    Bullet {
        cooldown_ms: u64,
        /// Pixels per tick
        speed: f32,
        width: f32,
        height: f32,
    },
    /// Full-width beam held for `duration_ms` after each trigger
    Beam {
        cooldown_ms: u64,
        duration_ms: u64,
        thickness: f32,
    },
}

/// A selectable ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub name: String,
    #[serde(default)]
    pub hull: HullShape,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick per held direction
    pub speed: f32,
    pub weapon: WeaponSpec,
}

/// Default roster: a bullet ship, a beam ship and a light fast ship
pub fn default_roster() -> Vec<CharacterSpec> {
    vec![
        CharacterSpec {
            name: "Falcon".to_string(),
            hull: HullShape::Square,
            width: 40.0,
            height: 20.0,
            speed: 5.0,
            weapon: WeaponSpec::Bullet {
                cooldown_ms: 250,
                speed: 10.0,
                width: 10.0,
                height: 4.0,
            },
        },
        CharacterSpec {
            name: "Lancer".to_string(),
            hull: HullShape::Triangle,
            width: 48.0,
            height: 26.0,
            speed: 4.5,
            weapon: WeaponSpec::Beam {
                cooldown_ms: 1000,
                duration_ms: 1125,
                thickness: 10.0,
            },
        },
        CharacterSpec {
            name: "Wisp".to_string(),
            hull: HullShape::Circle,
            width: 30.0,
            height: 30.0,
            speed: 6.0,
            weapon: WeaponSpec::Bullet {
                cooldown_ms: 150,
                speed: 12.0,
                width: 8.0,
                height: 3.0,
            },
        },
    ]
}

/// Game settings/balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Background parallax stars
    pub star_count: usize,

    // === Spawning ===
    /// Ticks between hazard spawns
    pub spawn_interval_ticks: u32,
    /// Probability that a spawn is debris rather than an asteroid
    pub debris_chance: f64,
    pub asteroid_size_min: f32,
    pub asteroid_size_max: f32,
    pub debris_size: f32,
    /// Base speeds (pixels per tick), scaled by difficulty at spawn
    pub asteroid_speed: f32,
    pub debris_speed: f32,
    /// Debris spin range (degrees per tick)
    pub debris_spin_min: f32,
    pub debris_spin_max: f32,
    /// Size added per tick to fake depth (0 = constant size)
    pub hazard_growth_per_tick: f32,
    /// Hazards whose x drops below this are gone
    pub escape_x: f32,

    // === Hitboxes (fraction of the sprite box trimmed away) ===
    pub asteroid_hitbox_shrink: f32,
    pub debris_hitbox_shrink: f32,
    pub ship_hitbox_shrink: f32,
    /// Play-area inset, as a multiple of the ship's height
    pub play_area_inset: f32,

    // === Session ===
    pub starting_lives: u8,
    pub points_per_hit: u64,
    pub difficulty: DifficultyCurve,

    // === Screens ===
    /// Duration of each fade phase
    pub fade_ms: u64,

    pub roster: Vec<CharacterSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            star_count: 50,

            spawn_interval_ticks: 60,
            debris_chance: 0.2,
            asteroid_size_min: 64.0,
            asteroid_size_max: 96.0,
            debris_size: 65.0,
            asteroid_speed: 3.0,
            debris_speed: 4.0,
            debris_spin_min: 2.0,
            debris_spin_max: 4.0,
            hazard_growth_per_tick: 0.0,
            escape_x: -100.0,

            asteroid_hitbox_shrink: 0.42,
            debris_hitbox_shrink: 0.35,
            ship_hitbox_shrink: 0.28,
            play_area_inset: 0.5,

            starting_lives: STARTING_LIVES,
            points_per_hit: 10,
            difficulty: DifficultyCurve::default(),

            fade_ms: 350,

            roster: default_roster(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// The full playfield
    pub fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.field_width, self.field_height)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        if self.spawn_interval_ticks == 0 {
            return Err(SettingsError::out_of_range(
                "spawn_interval_ticks",
                0.0,
                "at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.debris_chance) {
            return Err(SettingsError::out_of_range(
                "debris_chance",
                self.debris_chance,
                "between 0 and 1",
            ));
        }
        positive("asteroid_size_min", self.asteroid_size_min)?;
        positive("asteroid_size_max", self.asteroid_size_max)?;
        if self.asteroid_size_max < self.asteroid_size_min {
            return Err(SettingsError::out_of_range(
                "asteroid_size_max",
                self.asteroid_size_max as f64,
                "not below asteroid_size_min",
            ));
        }
        positive("debris_size", self.debris_size)?;
        positive("asteroid_speed", self.asteroid_speed)?;
        positive("debris_speed", self.debris_speed)?;
        non_negative("debris_spin_min", self.debris_spin_min)?;
        if !(self.debris_spin_max >= self.debris_spin_min) {
            return Err(SettingsError::out_of_range(
                "debris_spin_max",
                self.debris_spin_max as f64,
                "not below debris_spin_min",
            ));
        }
        non_negative("hazard_growth_per_tick", self.hazard_growth_per_tick)?;
        if !self.escape_x.is_finite() || self.escape_x > 0.0 {
            return Err(SettingsError::out_of_range(
                "escape_x",
                self.escape_x as f64,
                "at or left of the field's left edge",
            ));
        }
        fraction("asteroid_hitbox_shrink", self.asteroid_hitbox_shrink)?;
        fraction("debris_hitbox_shrink", self.debris_hitbox_shrink)?;
        fraction("ship_hitbox_shrink", self.ship_hitbox_shrink)?;
        non_negative("play_area_inset", self.play_area_inset)?;
        if self.starting_lives == 0 {
            return Err(SettingsError::out_of_range(
                "starting_lives",
                0.0,
                "at least 1",
            ));
        }
        if self.difficulty.score_per_level == 0 {
            return Err(SettingsError::out_of_range(
                "difficulty.score_per_level",
                0.0,
                "at least 1",
            ));
        }
        non_negative("difficulty.step", self.difficulty.step)?;
        non_negative("difficulty.ship_speed_nudge", self.difficulty.ship_speed_nudge)?;

        if self.roster.is_empty() {
            return Err(SettingsError::EmptyRoster);
        }
        for (index, character) in self.roster.iter().enumerate() {
            validate_character(index, character)?;
        }
        Ok(())
    }
}

fn validate_character(index: usize, c: &CharacterSpec) -> Result<(), SettingsError> {
    let invalid = |reason| SettingsError::InvalidCharacter {
        index,
        name: c.name.clone(),
        reason,
    };

    if !(c.width > 0.0 && c.height > 0.0) {
        return Err(invalid("ship size must be positive"));
    }
    if !(c.speed > 0.0) {
        return Err(invalid("ship speed must be positive"));
    }
    match c.weapon {
        WeaponSpec::Bullet {
            speed,
            width,
            height,
            ..
        } => {
            if !(speed > 0.0) {
                return Err(invalid("bullet speed must be positive"));
            }
            if !(width > 0.0 && height > 0.0) {
                return Err(invalid("bullet size must be positive"));
            }
        }
        WeaponSpec::Beam {
            duration_ms,
            thickness,
            ..
        } => {
            if duration_ms == 0 {
                return Err(invalid("beam duration must be at least 1 ms"));
            }
            if !(thickness > 0.0) {
                return Err(invalid("beam thickness must be positive"));
            }
        }
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::out_of_range(field, value as f64, "positive"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::out_of_range(field, value as f64, "zero or more"))
    }
}

fn fraction(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::out_of_range(field, value as f64, "in [0, 1)"))
    }
}

/// Why a set of settings was rejected
#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    EmptyRoster,
    InvalidCharacter {
        index: usize,
        name: String,
        reason: &'static str,
    },
}

impl SettingsError {
    fn out_of_range(field: &'static str, value: f64, expected: &'static str) -> Self {
        Self::OutOfRange {
            field,
            value,
            expected,
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "settings are not valid JSON: {e}"),
            Self::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} = {value} is out of range (expected {expected})"),
            Self::EmptyRoster => write!(f, "roster must contain at least one character"),
            Self::InvalidCharacter {
                index,
                name,
                reason,
            } => write!(f, "character #{index} ({name}): {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.roster.len(), 3);
        assert_eq!(settings.starting_lives, 3);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "star_count": 10, "fade_ms": 0 }"#).unwrap();
        assert_eq!(settings.star_count, 10);
        assert_eq!(settings.fade_ms, 0);
        assert_eq!(settings.spawn_interval_ticks, 60);
        assert_eq!(settings.roster, default_roster());
    }

    #[test]
    fn test_from_json_roster() {
        let json = r#"{
            "roster": [{
                "name": "Test",
                "hull": "circle",
                "width": 10, "height": 10, "speed": 2,
                "weapon": { "kind": "beam", "cooldown_ms": 500, "duration_ms": 900, "thickness": 4 }
            }]
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.roster[0].hull, HullShape::Circle);
        assert!(matches!(
            settings.roster[0].weapon,
            WeaponSpec::Beam { duration_ms: 900, .. }
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Settings::from_json(r#"{ "debris_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "debris_chance",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "spawn_interval_ticks": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("spawn_interval_ticks"));

        let settings = Settings {
            asteroid_size_min: 90.0,
            asteroid_size_max: 50.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_roster() {
        let err = Settings::from_json(r#"{ "roster": [] }"#).unwrap_err();
        assert!(matches!(err, SettingsError::EmptyRoster));
    }

    #[test]
    fn test_rejects_bad_character() {
        let mut settings = Settings::default();
        settings.roster[1].weapon = WeaponSpec::Beam {
            cooldown_ms: 100,
            duration_ms: 0,
            thickness: 5.0,
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, SettingsError::InvalidCharacter { index: 1, .. }));
        assert!(err.to_string().contains("Lancer"));
    }

    #[test]
    fn test_hull_from_str() {
        assert_eq!(HullShape::from_str("TRI"), Some(HullShape::Triangle));
        assert_eq!(HullShape::from_str("hexagon"), None);
        assert_eq!(HullShape::Circle.as_str(), "Circle");
    }
}
