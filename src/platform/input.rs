//! Keyboard input queries
//!
//! The host translates its native events into `KeyboardState` (or implements
//! `InputState` itself); the core only ever asks "held?" and "pressed this
//! frame?".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Escape,
    P,
    Space,
    Enter,
    Num1,
    Num2,
    Num3,
    /// Menu shortcut: play
    J,
    /// Menu shortcut: tutorial
    T,
    /// Menu shortcut: options
    O,
}

pub trait InputState {
    /// Key is currently held
    fn is_pressed(&self, key: Key) -> bool;
    /// Key went down this frame
    fn is_just_pressed(&self, key: Key) -> bool;

    /// Left arrow or A
    fn left_held(&self) -> bool {
        self.is_pressed(Key::Left) || self.is_pressed(Key::A)
    }

    /// Right arrow or D
    fn right_held(&self) -> bool {
        self.is_pressed(Key::Right) || self.is_pressed(Key::D)
    }
}

/// Plain held / just-pressed sets
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Press and release within the same frame
    pub fn tap(&mut self, key: Key) {
        self.just_pressed.insert(key);
    }

    /// Clear edge-triggered state; call once per processed frame
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }
}

impl InputState for KeyboardState {
    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }
}
