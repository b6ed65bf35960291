//! Keyboard state and per-player key bindings

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Number of keyboard binding slots (players sharing one keyboard)
pub const MAX_KEYBOARD_CONFIGS: usize = 2;

/// A held key starts repeating after this long
pub const KEY_REPEAT_DELAY_MS: u64 = 500;
/// Interval between repeats once repeating
pub const KEY_REPEAT_INTERVAL_MS: u64 = 100;

/// Keys bound to one player's commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputKeys {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub button1: KeyCode,
    pub button2: KeyCode,
}

impl InputKeys {
    /// Default bindings for a keyboard slot
    pub fn default_for_slot(slot: usize) -> Self {
        match slot {
            0 => Self {
                left: KeyCode::ArrowLeft,
                right: KeyCode::ArrowRight,
                up: KeyCode::ArrowUp,
                down: KeyCode::ArrowDown,
                button1: KeyCode::ControlRight,
                button2: KeyCode::ShiftRight,
            },
            _ => Self {
                left: KeyCode::KeyA,
                right: KeyCode::KeyD,
                up: KeyCode::KeyW,
                down: KeyCode::KeyS,
                button1: KeyCode::ControlLeft,
                button2: KeyCode::ShiftLeft,
            },
        }
    }
}

/// Tracks keyboard state per frame, with edge detection and key repeat
pub struct Keyboard {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys that transitioned to pressed (or repeated) this frame
    keys_pressed: HashSet<KeyCode>,
    /// Keys held at the start of this poll
    keys_previous: HashSet<KeyCode>,
    /// First key pressed during this poll, for blocking prompts
    first_pressed: Option<KeyCode>,
    /// Next tick at which each held key repeats
    repeat_at: HashMap<KeyCode, u64>,

    /// Binding slots, indexed by a player's keyboard device index
    pub player_keys: [InputKeys; MAX_KEYBOARD_CONFIGS],
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_previous: HashSet::new(),
            first_pressed: None,
            repeat_at: HashMap::new(),
            player_keys: [InputKeys::default_for_slot(0), InputKeys::default_for_slot(1)],
        }
    }

    /// Create a keyboard with the given binding slots
    pub fn with_bindings(player_keys: [InputKeys; MAX_KEYBOARD_CONFIGS]) -> Self {
        Self {
            player_keys,
            ..Self::new()
        }
    }

    /// Forget all key state, keeping bindings
    pub fn reset(&mut self) {
        self.keys_down.clear();
        self.keys_pressed.clear();
        self.keys_previous.clear();
        self.first_pressed = None;
        self.repeat_at.clear();
    }

    /// Snapshot state before draining events
    pub fn pre_poll(&mut self) {
        self.keys_previous = self.keys_down.clone();
        self.keys_pressed.clear();
        self.first_pressed = None;
    }

    /// Process a key press event
    pub fn on_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.insert(key);
            if self.first_pressed.is_none() {
                self.first_pressed = Some(key);
            }
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn on_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.repeat_at.remove(&key);
    }

    /// Apply key repeat once events are drained
    pub fn post_poll(&mut self, ticks: u64) {
        self.repeat_at.retain(|key, _| self.keys_down.contains(key));
        for key in &self.keys_down {
            match self.repeat_at.entry(*key) {
                Entry::Vacant(entry) => {
                    entry.insert(ticks + KEY_REPEAT_DELAY_MS);
                }
                Entry::Occupied(mut entry) => {
                    if ticks >= *entry.get() {
                        entry.insert(ticks + KEY_REPEAT_INTERVAL_MS);
                        self.keys_pressed.insert(*key);
                    }
                }
            }
        }
    }

    // --- Query methods ---

    /// Is a key currently held down?
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed (or repeated) this frame?
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Was a key held during the previous frame?
    pub fn was_down(&self, key: KeyCode) -> bool {
        self.keys_previous.contains(&key)
    }

    /// The first key newly pressed during the last poll
    pub fn pressed_key(&self) -> Option<KeyCode> {
        self.first_pressed
    }
}

/// Human readable key name
pub fn key_name(key: KeyCode) -> String {
    format!("{key:?}")
}
