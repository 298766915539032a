//! Per-frame simulation tick
//!
//! Order within a tick: input → ship motion/weapon → spawner → kinematics →
//! collisions → difficulty → screen transition check. Losing the last life
//! switches to `Lost` on the spot and skips whatever is left of the tick.

use glam::Vec2;

use super::collision::{self, Outcome};
use super::kinematics;
use super::screen::Screen;
use super::state::{GameState, Weapon};
use super::weapon;

/// Directions held down this tick (arrow keys and WASD already merged)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Unit step per axis (-1, 0 or 1); opposite keys cancel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Input for a single tick
///
/// `held` is sampled state; the remaining flags are key-down events that
/// happened since the previous tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Enter / select
    pub confirm: bool,
    /// Escape / back
    pub cancel: bool,
    /// Menu navigation (up/left)
    pub nav_prev: bool,
    /// Menu navigation (down/right)
    pub nav_next: bool,
    /// Fire / beam trigger
    pub fire: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game by one frame
///
/// `now_ms` comes from a monotonic clock and drives cooldowns, beam expiry
/// and fades.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.time_ticks += 1;

    let mut input = if state.screen.accepts_input() {
        input.clone()
    } else {
        TickInput::default()
    };
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    handle_screen_input(state, &input, now_ms);

    match state.screen.current() {
        Screen::Playing => play(state, &input, now_ms),
        // Frozen while paused
        Screen::Paused => {}
        Screen::Menu | Screen::CharacterSelect | Screen::Lost => {
            let field = state.settings.field();
            kinematics::update_stars(&mut state.stars, &mut state.rng, &field, 1.0);
        }
    }

    if let Some((from, to)) = state.screen.advance(now_ms) {
        enter_screen(state, from, to);
    }
}

/// Turn key-down events into transition requests for the current screen
fn handle_screen_input(state: &mut GameState, input: &TickInput, now_ms: u64) {
    let screen = state.screen.current();
    match screen {
        Screen::Menu => {
            if input.confirm {
                state.screen.request(Screen::CharacterSelect, now_ms);
            } else if input.cancel {
                log::info!("Quit requested from menu");
                state.quit_requested = true;
            }
        }
        Screen::CharacterSelect => {
            if input.nav_prev {
                state.cycle_selection(false);
            }
            if input.nav_next {
                state.cycle_selection(true);
            }
            if input.confirm {
                state.screen.request(Screen::Playing, now_ms);
            } else if input.cancel {
                state.screen.request(Screen::Menu, now_ms);
            }
        }
        Screen::Playing => {
            if input.cancel {
                state.screen.request(Screen::Paused, now_ms);
            }
        }
        Screen::Paused => {
            if input.confirm {
                state.screen.request(Screen::Playing, now_ms);
            } else if input.cancel {
                state.screen.request(Screen::Menu, now_ms);
            }
        }
        Screen::Lost => {
            if input.confirm {
                state.screen.request(Screen::CharacterSelect, now_ms);
            } else if input.cancel {
                state.screen.request(Screen::Menu, now_ms);
            }
        }
    }
}

/// On-enter effects, applied only once a swap has actually happened
fn enter_screen(state: &mut GameState, from: Screen, to: Screen) {
    match to {
        Screen::Playing => {
            if from == Screen::CharacterSelect || state.session.is_none() {
                state.start_session();
            }
        }
        Screen::Menu | Screen::CharacterSelect => state.end_session(),
        Screen::Paused | Screen::Lost => {}
    }
}

/// One gameplay frame
fn play(state: &mut GameState, input: &TickInput, now_ms: u64) {
    let GameState {
        settings,
        rng,
        screen,
        stars,
        session,
        ..
    } = state;
    let Some(session) = session.as_mut() else {
        log::warn!("Playing without a session");
        return;
    };
    let field = settings.field();

    // Ship motion and weapon trigger
    kinematics::move_ship(
        &mut session.ship,
        input.held.direction(),
        &field,
        settings.play_area_inset,
    );
    if input.fire {
        weapon::fire(&mut session.ship, &mut session.projectiles, &field, now_ms);
    }
    weapon::sustain_beam(&mut session.ship, &mut session.projectiles, &field, now_ms);

    // Spawner
    let multiplier = session.difficulty.multiplier();
    if let Some(hazard) = session.spawner.tick(rng, settings, multiplier) {
        session.hazards.push(hazard);
    }

    // Kinematics
    let bullet_speed = match session.ship.weapon {
        Weapon::Bullet { speed, .. } => speed,
        Weapon::Beam { .. } => 0.0,
    };
    kinematics::update_stars(stars, rng, &field, multiplier);
    kinematics::update_hazards(&mut session.hazards, settings.hazard_growth_per_tick);
    kinematics::update_projectiles(&mut session.projectiles, bullet_speed, &field, now_ms);

    // Collisions
    if collision::resolve_all(session, settings) == Outcome::Defeated {
        log::info!("Out of lives - final score {}", session.score);
        screen.force(Screen::Lost, now_ms);
        return;
    }

    // Difficulty
    let gained = session.difficulty.update(session.score, &settings.difficulty);
    if gained > 0 {
        session.ship.speed += gained as f32 * settings.difficulty.ship_speed_nudge;
    }
}

/// Demo driver: clears menus, steers toward the nearest incoming hazard's
/// lane and keeps the trigger held
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.screen.current() {
        Screen::Menu | Screen::CharacterSelect => input.confirm = true,
        Screen::Playing => {
            let Some(session) = &state.session else {
                return;
            };
            let ship = &session.ship;
            let nose = ship.rect.right();
            let target = session
                .hazards
                .iter()
                .filter(|h| h.bounds().right() > nose)
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

            if let Some(hazard) = target {
                let dy = hazard.bounds().center().y - ship.rect.center().y;
                input.held.up = dy < -ship.speed;
                input.held.down = dy > ship.speed;
            }
            input.fire = true;
        }
        Screen::Paused | Screen::Lost => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::geom::Rect;
    use crate::sim::state::{Hazard, HazardKind, Projectile, ProjectileKind};
    use proptest::prelude::*;

    const DT: u64 = crate::consts::TICK_MS;

    fn press_confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn press_cancel() -> TickInput {
        TickInput {
            cancel: true,
            ..Default::default()
        }
    }

    fn instant_settings() -> Settings {
        Settings {
            fade_ms: 0,
            ..Default::default()
        }
    }

    /// Menu → select → playing with the given roster index
    fn playing_state(settings: Settings, character: usize) -> GameState {
        let mut state = GameState::new(settings, 1234).unwrap();
        tick(&mut state, &press_confirm(), 0);
        state.selected = character;
        tick(&mut state, &press_confirm(), DT);
        assert_eq!(state.screen.current(), Screen::Playing);
        state
    }

    fn debris_at(x: f32, y: f32) -> Hazard {
        Hazard {
            kind: HazardKind::Debris { spin: 2.0 },
            pos: Vec2::new(x, y),
            size: 65.0,
            speed: 4.0,
            angle: 0.0,
        }
    }

    #[test]
    fn test_menu_to_playing() {
        let state = playing_state(instant_settings(), 0);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.lives, 3);
        assert_eq!(session.score, 0);
        assert_eq!(session.character, 0);
    }

    #[test]
    fn test_fade_delays_swap_and_ignores_input() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        tick(&mut state, &press_confirm(), 0);
        assert_eq!(state.screen.current(), Screen::Menu);

        // Cancel during fade-out must not quit
        tick(&mut state, &press_cancel(), 100);
        assert!(!state.quit_requested);

        tick(&mut state, &TickInput::default(), 350);
        assert_eq!(state.screen.current(), Screen::CharacterSelect);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_session_created_only_at_swap() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        tick(&mut state, &press_confirm(), 0);
        tick(&mut state, &TickInput::default(), 350);
        tick(&mut state, &TickInput::default(), 700);
        assert_eq!(state.screen.current(), Screen::CharacterSelect);

        tick(&mut state, &press_confirm(), 1000);
        assert!(state.session.is_none());
        tick(&mut state, &TickInput::default(), 1350);
        assert_eq!(state.screen.current(), Screen::Playing);
        assert!(state.session.is_some());
    }

    #[test]
    fn test_select_navigation_wraps() {
        let mut state = GameState::new(instant_settings(), 1).unwrap();
        tick(&mut state, &press_confirm(), 0);
        let prev = TickInput {
            nav_prev: true,
            ..Default::default()
        };
        tick(&mut state, &prev, DT);
        assert_eq!(state.selected, 2);
        assert_eq!(state.selected_character().name, "Wisp");
    }

    #[test]
    fn test_quit_from_menu() {
        let mut state = GameState::new(instant_settings(), 1).unwrap();
        tick(&mut state, &press_cancel(), 0);
        assert!(state.quit_requested);
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut state = playing_state(instant_settings(), 0);
        state.session.as_mut().unwrap().hazards.push(debris_at(600.0, 300.0));

        tick(&mut state, &press_cancel(), 2 * DT);
        assert_eq!(state.screen.current(), Screen::Paused);
        let frozen_x = state.session.as_ref().unwrap().hazards[0].pos.x;

        for i in 0..10 {
            tick(&mut state, &TickInput::default(), (3 + i) * DT);
        }
        assert_eq!(state.session.as_ref().unwrap().hazards[0].pos.x, frozen_x);

        tick(&mut state, &press_confirm(), 20 * DT);
        assert_eq!(state.screen.current(), Screen::Playing);
        // Same run resumed
        assert_eq!(state.session.as_ref().unwrap().hazards.len(), 1);
    }

    #[test]
    fn test_pause_to_menu_resets_session() {
        let mut state = playing_state(instant_settings(), 0);
        state.session.as_mut().unwrap().score = 120;

        tick(&mut state, &press_cancel(), 2 * DT);
        tick(&mut state, &press_cancel(), 3 * DT);
        assert_eq!(state.screen.current(), Screen::Menu);
        assert!(state.session.is_none());

        tick(&mut state, &press_confirm(), 4 * DT);
        tick(&mut state, &press_confirm(), 5 * DT);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.difficulty.multiplier(), 1.0);
        assert!(session.hazards.is_empty());
    }

    #[test]
    fn test_debris_escape_scenario() {
        let mut state = playing_state(instant_settings(), 0);
        state.session.as_mut().unwrap().hazards.push(debris_at(-150.0, 300.0));

        tick(&mut state, &TickInput::default(), 2 * DT);
        let session = state.session.as_ref().unwrap();
        assert!(session.hazards.is_empty());
        assert_eq!(session.lives, 2);
        assert_eq!(state.screen.current(), Screen::Playing);
    }

    #[test]
    fn test_last_life_forces_lost_and_aborts_tick() {
        let mut state = playing_state(instant_settings(), 0);
        {
            let session = state.session.as_mut().unwrap();
            session.lives = 1;
            session.hazards.push(debris_at(-150.0, 300.0));
            // Would be hit by this bullet if the tick went on
            session.hazards.push(Hazard {
                kind: HazardKind::Asteroid,
                pos: Vec2::new(500.0, 300.0),
                size: 80.0,
                speed: 3.0,
                angle: 0.0,
            });
            session.projectiles.push(Projectile {
                kind: ProjectileKind::Bullet,
                rect: Rect::new(525.0, 338.0, 10.0, 4.0),
            });
        }

        tick(&mut state, &TickInput::default(), 2 * DT);
        assert_eq!(state.screen.current(), Screen::Lost);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.lives, 0);
        assert_eq!(session.score, 0);
        assert_eq!(session.hazards.len(), 1);

        assert_eq!(session.hazards[0].pos.x, 497.0);

        // Lost screen is frozen
        tick(&mut state, &TickInput::default(), 3 * DT);
        assert_eq!(state.session.as_ref().unwrap().hazards[0].pos.x, 497.0);
    }

    #[test]
    fn test_lost_confirm_returns_to_select_with_reset() {
        let mut state = playing_state(instant_settings(), 0);
        state.session.as_mut().unwrap().lives = 1;
        state.session.as_mut().unwrap().hazards.push(debris_at(-150.0, 300.0));
        tick(&mut state, &TickInput::default(), 2 * DT);
        assert_eq!(state.screen.current(), Screen::Lost);

        tick(&mut state, &press_confirm(), 3 * DT);
        assert_eq!(state.screen.current(), Screen::CharacterSelect);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_score_milestones_nudge_ship_speed() {
        let mut state = playing_state(instant_settings(), 0);
        let base_speed = state.session.as_ref().unwrap().ship.speed;
        let nudge = state.settings.difficulty.ship_speed_nudge;

        for (i, score) in [100u64, 150, 200, 300].into_iter().enumerate() {
            state.session.as_mut().unwrap().score = score;
            tick(&mut state, &TickInput::default(), (2 + i as u64) * DT);
        }

        let session = state.session.as_ref().unwrap();
        assert_eq!(session.difficulty.multiplier(), 1.75);
        assert!((session.ship.speed - (base_speed + 3.0 * nudge)).abs() < 1e-5);
    }

    #[test]
    fn test_fire_spawns_bullet() {
        let mut state = playing_state(instant_settings(), 0);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 1000);
        tick(&mut state, &fire, 1050);
        assert_eq!(state.session.as_ref().unwrap().projectiles.len(), 1);
        tick(&mut state, &fire, 1300);
        assert_eq!(state.session.as_ref().unwrap().projectiles.len(), 2);
    }

    #[test]
    fn test_beam_lifecycle_through_tick() {
        let mut state = playing_state(instant_settings(), 1);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        tick(&mut state, &fire, 1000);
        let session = state.session.as_ref().unwrap();
        assert!(session.ship.beam_active());
        assert_eq!(session.projectiles.iter().filter(|p| p.is_beam()).count(), 1);

        // Held through its lifetime, never more than one
        for t in (1016..2125).step_by(16) {
            tick(&mut state, &fire, t);
            let beams = state
                .session
                .as_ref()
                .unwrap()
                .projectiles
                .iter()
                .filter(|p| p.is_beam())
                .count();
            assert!(beams <= 1);
        }

        tick(&mut state, &TickInput::default(), 2125);
        let session = state.session.as_ref().unwrap();
        assert!(!session.ship.beam_active());
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn test_hazards_spawn_during_play() {
        let mut state = playing_state(instant_settings(), 0);
        for i in 0..60 {
            tick(&mut state, &TickInput::default(), (2 + i) * DT);
        }
        assert_eq!(state.session.as_ref().unwrap().hazards.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::new(instant_settings(), 99999).unwrap();
            let input = TickInput {
                idle_mode: true,
                ..Default::default()
            };
            for i in 0..1200 {
                tick(&mut state, &input, i * DT);
            }
            state
        };
        let a = run();
        let b = run();

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.screen.current(), b.screen.current());
        let (sa, sb) = (a.session.unwrap(), b.session.unwrap());
        assert_eq!(sa.score, sb.score);
        assert_eq!(sa.lives, sb.lives);
        assert_eq!(sa.hazards, sb.hazards);
        assert_eq!(a.stars, b.stars);
    }

    #[test]
    fn test_autopilot_starts_and_scores() {
        let mut state = GameState::new(Settings::default(), 7).unwrap();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for i in 0..(60 * 30) {
            tick(&mut state, &input, i * DT);
        }
        assert!(state.session.is_some());
        assert!(state.session.as_ref().unwrap().score > 0);
    }

    #[test]
    fn test_held_direction() {
        let held = HeldKeys {
            up: true,
            down: true,
            left: false,
            right: true,
        };
        assert_eq!(held.direction(), Vec2::new(1.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_lives_bounded_and_zero_means_lost(
            seed in any::<u64>(),
            moves in proptest::collection::vec((0u8..16, any::<bool>()), 200..600),
        ) {
            let mut state = GameState::new(instant_settings(), seed).unwrap();
            tick(&mut state, &press_confirm(), 0);
            tick(&mut state, &press_confirm(), DT);

            for (i, (dir, fire)) in moves.into_iter().enumerate() {
                let input = TickInput {
                    held: HeldKeys {
                        up: dir & 1 != 0,
                        down: dir & 2 != 0,
                        left: dir & 4 != 0,
                        right: dir & 8 != 0,
                    },
                    fire,
                    ..Default::default()
                };
                tick(&mut state, &input, (i as u64 + 2) * DT);

                let session = state.session.as_ref().unwrap();
                prop_assert!(session.lives <= 3);
                if session.lives == 0 {
                    prop_assert_eq!(state.screen.current(), Screen::Lost);
                } else {
                    prop_assert_eq!(state.screen.current(), Screen::Playing);
                }
            }
        }
    }
}
