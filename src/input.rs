/// Input boundary: a full key-state snapshot plus the last pointer position.
///
/// The front end keeps one `InputSnapshot` up to date from its event stream
/// and hands it to `compute::tick` once per frame.

use std::collections::HashSet;

use crate::entities::PlayerSlot;

/// Keys the simulation reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Player 1
    W,
    A,
    S,
    D,
    Space,
    // Player 2
    Up,
    Down,
    Left,
    Right,
    L,
}

/// Pointer position in world units, relative to the play surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pressed: HashSet<Key>,
    /// Origin until the first pointer event arrives.
    pub pointer: Pointer,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Pointer { x, y };
    }

    /// Builder-style helper, mostly for tests.
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut snapshot = Self::new();
        for &k in keys {
            snapshot.press(k);
        }
        snapshot
    }
}

/// Key binding of one player slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerControls {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub fire: Key,
}

impl PlayerControls {
    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => PlayerControls {
                up: Key::W,
                down: Key::S,
                left: Key::A,
                right: Key::D,
                fire: Key::Space,
            },
            PlayerSlot::Two => PlayerControls {
                up: Key::Up,
                down: Key::Down,
                left: Key::Left,
                right: Key::Right,
                fire: Key::L,
            },
        }
    }
}
