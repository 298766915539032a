//! Game state and core simulation types
//!
//! `GameState` owns everything the tick function mutates: the screen machine,
//! the decorative starfield, the RNG stream and (while a run exists) the
//! `Session` with the ship, entity collections, score and lives.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::difficulty::Difficulty;
use super::geom::Rect;
use super::kinematics::scatter_stars;
use super::screen::ScreenMachine;
use super::spawner::Spawner;
use crate::settings::{CharacterSpec, HullShape, Settings, SettingsError, WeaponSpec};

/// Ship spawn x (left side of the field, facing right)
pub const SHIP_SPAWN_X: f32 = 100.0;

/// Runtime weapon state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Weapon {
    Bullet {
        cooldown_ms: u64,
        speed: f32,
        size: Vec2,
        /// Time of the last honored shot
        last_shot_ms: Option<u64>,
    },
    Beam {
        cooldown_ms: u64,
        duration_ms: u64,
        thickness: f32,
        active: bool,
        /// Time of the last honored trigger
        started_ms: Option<u64>,
    },
}

impl From<WeaponSpec> for Weapon {
    fn from(spec: WeaponSpec) -> Self {
        match spec {
            WeaponSpec::Bullet {
                cooldown_ms,
                speed,
                width,
                height,
            } => Weapon::Bullet {
                cooldown_ms,
                speed,
                size: Vec2::new(width, height),
                last_shot_ms: None,
            },
            WeaponSpec::Beam {
                cooldown_ms,
                duration_ms,
                thickness,
            } => Weapon::Beam {
                cooldown_ms,
                duration_ms,
                thickness,
                active: false,
                started_ms: None,
            },
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize)]
pub struct Ship {
    pub rect: Rect,
    /// Pixels per tick per held direction (grows with difficulty)
    pub speed: f32,
    pub hull: HullShape,
    pub weapon: Weapon,
}

impl Ship {
    /// Build a ship for `spec`, vertically centered at the left of `field`
    pub fn new(spec: &CharacterSpec, field: &Rect) -> Self {
        let y = field.center().y - spec.height / 2.0;
        Self {
            rect: Rect::new(SHIP_SPAWN_X, y, spec.width, spec.height),
            speed: spec.speed,
            hull: spec.hull,
            weapon: spec.weapon.into(),
        }
    }

    /// Where projectiles leave the hull (nose, vertically centered)
    #[inline]
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.right(), self.rect.center().y)
    }

    /// Collision box, trimmed to the visible silhouette
    #[inline]
    pub fn hitbox(&self, shrink: f32) -> Rect {
        self.rect.shrunk(shrink)
    }

    /// Region the ship may occupy: the field inset by a margin proportional
    /// to the ship's height so it never covers the HUD strips
    pub fn play_area(&self, field: &Rect, inset_factor: f32) -> Rect {
        field.inset(self.rect.size.y * inset_factor)
    }

    /// Whether a beam is currently held
    pub fn beam_active(&self) -> bool {
        matches!(self.weapon, Weapon::Beam { active: true, .. })
    }
}

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectileKind {
    /// Moves right, consumed on hit
    Bullet,
    /// Stationary relative to the ship, survives hits, expires at a timestamp
    Beam { expires_at_ms: u64 },
}

/// A projectile entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub rect: Rect,
}

impl Projectile {
    #[inline]
    pub fn is_beam(&self) -> bool {
        matches!(self.kind, ProjectileKind::Beam { .. })
    }

    /// Beams keep going after destroying a hazard; bullets don't
    #[inline]
    pub fn persists_through_hits(&self) -> bool {
        self.is_beam()
    }
}

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardKind {
    /// Round rock, harmless if it gets past
    Asteroid,
    /// Tumbling junk; letting it through costs a life
    Debris {
        /// Degrees per tick
        spin: f32,
    },
}

impl HazardKind {
    /// Whether escaping off the left edge costs a life
    #[inline]
    pub fn penalizes_escape(&self) -> bool {
        matches!(self, HazardKind::Debris { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            HazardKind::Asteroid => "asteroid",
            HazardKind::Debris { .. } => "debris",
        }
    }
}

/// A hazard entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hazard {
    pub kind: HazardKind,
    /// Top-left corner of the sprite box
    pub pos: Vec2,
    /// Side length of the (square) sprite box
    pub size: f32,
    /// Pixels per tick, fixed at spawn
    pub speed: f32,
    /// Visual rotation in degrees
    pub angle: f32,
}

impl Hazard {
    /// Sprite bounding box
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Collision box; rounder shapes get trimmed more
    pub fn hitbox(&self, settings: &Settings) -> Rect {
        let shrink = match self.kind {
            HazardKind::Asteroid => settings.asteroid_hitbox_shrink,
            HazardKind::Debris { .. } => settings.debris_hitbox_shrink,
        };
        self.bounds().shrunk(shrink)
    }
}

/// A background star (purely cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub pos: Vec2,
    /// Pixels per tick before the difficulty multiplier
    pub speed: f32,
    pub size: f32,
}

/// One run, from character selection until defeat or quitting to the menu
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Roster index the run was started with
    pub character: usize,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
    pub spawner: Spawner,
    pub difficulty: Difficulty,
    pub score: u64,
    pub lives: u8,
}

impl Session {
    pub fn new(character: usize, spec: &CharacterSpec, settings: &Settings) -> Self {
        Self {
            character,
            ship: Ship::new(spec, &settings.field()),
            projectiles: Vec::new(),
            hazards: Vec::new(),
            spawner: Spawner::default(),
            difficulty: Difficulty::default(),
            score: 0,
            lives: settings.starting_lives,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated settings this state was built with
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    /// The single RNG stream every random decision draws from
    pub(crate) rng: Pcg32,
    /// Current screen and any fade in flight
    pub screen: ScreenMachine,
    /// Character highlighted on the select screen
    pub selected: usize,
    /// Background parallax stars (survive across runs)
    pub stars: Vec<Star>,
    /// The active run, if any
    pub session: Option<Session>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set when the player cancels out of the main menu
    pub quit_requested: bool,
}

impl GameState {
    /// Create a new game state, rejecting settings the simulation can't run
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = scatter_stars(&mut rng, &settings.field(), settings.star_count);
        let screen = ScreenMachine::new(settings.fade_ms);

        Ok(Self {
            settings,
            seed,
            rng,
            screen,
            selected: 0,
            stars,
            session: None,
            time_ticks: 0,
            quit_requested: false,
        })
    }

    /// Character currently highlighted on the select screen
    pub fn selected_character(&self) -> &CharacterSpec {
        &self.settings.roster[self.selected]
    }

    /// Move the select-screen cursor, wrapping around the roster
    pub fn cycle_selection(&mut self, forward: bool) {
        let len = self.settings.roster.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    /// Begin a fresh run with the highlighted character
    pub fn start_session(&mut self) {
        let spec = &self.settings.roster[self.selected];
        log::info!("Starting run as {} ({})", spec.name, spec.hull.as_str());
        self.session = Some(Session::new(self.selected, spec, &self.settings));
    }

    /// Drop the current run: ship, entities, score, lives and difficulty
    pub fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!(
                "Run cleared (score {}, lives {})",
                session.score,
                session.lives
            );
        }
    }
}
