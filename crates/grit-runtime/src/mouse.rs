//! Mouse state

use grit_core::Vec2i;
use std::collections::HashSet;

/// The cursor counts as idle after this long without motion
pub const CURSOR_IDLE_MS: u64 = 2000;

/// Mouse buttons, with wheel steps reported as momentary buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    WheelUp,
    WheelDown,
}

impl MouseButton {
    fn is_wheel(self) -> bool {
        matches!(self, MouseButton::WheelUp | MouseButton::WheelDown)
    }
}

/// Tracks mouse buttons and cursor position per frame
pub struct Mouse {
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,

    /// Cursor position in logical screen pixels
    pub current_pos: Vec2i,
    /// Cursor position at the start of the last poll
    pub previous_pos: Vec2i,
    last_moved_ticks: u64,

    /// Keep the cursor hidden regardless of motion
    pub hide_cursor: bool,
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Mouse {
    pub fn new(hide_cursor: bool) -> Self {
        Self {
            buttons_down: HashSet::new(),
            buttons_pressed: HashSet::new(),
            current_pos: Vec2i::ZERO,
            previous_pos: Vec2i::ZERO,
            last_moved_ticks: 0,
            hide_cursor,
        }
    }

    /// Forget button state; the cursor stays where it is
    pub fn reset(&mut self) {
        self.buttons_down.clear();
        self.buttons_pressed.clear();
        self.previous_pos = self.current_pos;
    }

    /// Snapshot state before draining events
    pub fn pre_poll(&mut self) {
        self.previous_pos = self.current_pos;
        self.buttons_pressed.clear();
        self.buttons_down.retain(|b| !b.is_wheel());
    }

    pub fn on_button_down(&mut self, button: MouseButton) {
        if !self.buttons_down.contains(&button) {
            self.buttons_pressed.insert(button);
        }
        self.buttons_down.insert(button);
    }

    pub fn on_button_up(&mut self, button: MouseButton) {
        self.buttons_down.remove(&button);
    }

    pub fn on_motion(&mut self, pos: Vec2i) {
        self.current_pos = pos;
    }

    /// Record motion timing once events are drained
    pub fn post_poll(&mut self, ticks: u64) {
        if self.current_pos != self.previous_pos {
            self.last_moved_ticks = ticks;
        }
    }

    // --- Query methods ---

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Cursor movement during the last poll
    pub fn delta(&self) -> Vec2i {
        self.current_pos - self.previous_pos
    }

    /// Whether the cursor should be drawn at `ticks`
    pub fn is_cursor_visible(&self, ticks: u64) -> bool {
        !self.hide_cursor && ticks.saturating_sub(self.last_moved_ticks) < CURSOR_IDLE_MS
    }
}
