//! Keyboard → `TickInput` mapping
//!
//! Hosts report which keys are down and which went down since the last
//! frame; the mapper turns that into one `TickInput`. Arrows and WASD are
//! interchangeable.

use crate::sim::{HeldKeys, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Enter,
    Space,
    Escape,
    /// Toggles the autopilot
    I,
}

impl Key {
    /// Parse a host key name (`KeyboardEvent.key`-style or plain letters)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            "Enter" => Some(Key::Enter),
            " " | "Space" => Some(Key::Space),
            "Escape" | "Esc" => Some(Key::Escape),
            "i" | "I" => Some(Key::I),
            _ => None,
        }
    }

    fn is_up(self) -> bool {
        matches!(self, Key::Up | Key::W)
    }

    fn is_down(self) -> bool {
        matches!(self, Key::Down | Key::S)
    }

    fn is_left(self) -> bool {
        matches!(self, Key::Left | Key::A)
    }

    fn is_right(self) -> bool {
        matches!(self, Key::Right | Key::D)
    }
}

/// Stateful mapper; remembers the autopilot toggle between frames
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    idle_mode: bool,
}

impl InputMapper {
    pub fn new(idle_mode: bool) -> Self {
        Self { idle_mode }
    }

    /// Build the input for one tick
    ///
    /// `held` is every key currently down, `pressed` the keys that went down
    /// since the previous call. Space counts while held so bullet weapons
    /// repeat at their cooldown.
    pub fn map(&mut self, held: &[Key], pressed: &[Key]) -> TickInput {
        if pressed.contains(&Key::I) {
            self.idle_mode = !self.idle_mode;
            log::info!("Idle mode: {}", self.idle_mode);
        }

        let any_held = |f: fn(Key) -> bool| held.iter().any(|&k| f(k));
        let any_pressed = |f: fn(Key) -> bool| pressed.iter().any(|&k| f(k));

        TickInput {
            held: HeldKeys {
                up: any_held(Key::is_up),
                down: any_held(Key::is_down),
                left: any_held(Key::is_left),
                right: any_held(Key::is_right),
            },
            confirm: pressed.contains(&Key::Enter),
            cancel: pressed.contains(&Key::Escape),
            nav_prev: any_pressed(|k| k.is_up() || k.is_left()),
            nav_next: any_pressed(|k| k.is_down() || k.is_right()),
            fire: held.contains(&Key::Space) || pressed.contains(&Key::Space),
            idle_mode: self.idle_mode,
        }
    }
}
