//! Per-frame event poll
//!
//! [`EventHandlers`] aggregates every input device and the window flags.
//! It is polled exactly once per frame, before any command is derived.

use crate::clock::Clock;
use crate::event::{EventSource, PlatformEvent};
use crate::joystick::Joysticks;
use crate::keyboard::{InputKeys, Keyboard, MAX_KEYBOARD_CONFIGS};
use crate::mouse::Mouse;
use grit_core::Vec2i;
use std::time::Duration;
use winit::keyboard::KeyCode;

/// Poll interval while blocking on a key press
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Input devices plus quit/resize flags
pub struct EventHandlers {
    pub keyboard: Keyboard,
    pub mouse: Mouse,
    pub joysticks: Joysticks,
    /// Sticky until [`EventHandlers::clear_quit`]
    pub has_quit: bool,
    /// Only valid during the frame whose poll raised it
    pub has_resolution_changed: bool,
    pub has_focus: bool,
    scale_factor: u32,
    resolution: Option<Vec2i>,
}

impl Default for EventHandlers {
    fn default() -> Self {
        Self::new(1, false)
    }
}

impl EventHandlers {
    pub fn new(scale_factor: u32, hide_mouse: bool) -> Self {
        Self {
            keyboard: Keyboard::new(),
            mouse: Mouse::new(hide_mouse),
            joysticks: Joysticks::new(),
            has_quit: false,
            has_resolution_changed: false,
            has_focus: true,
            scale_factor: scale_factor.max(1),
            resolution: None,
        }
    }

    pub fn with_bindings(mut self, keys: [InputKeys; MAX_KEYBOARD_CONFIGS]) -> Self {
        self.keyboard.player_keys = keys;
        self
    }

    /// Clear device state between sessions. The quit flag survives.
    pub fn reset(&mut self) {
        self.has_resolution_changed = false;
        self.keyboard.reset();
        self.joysticks.reset();
        self.mouse.reset();
    }

    pub fn clear_quit(&mut self) {
        self.has_quit = false;
    }

    pub fn terminate(&mut self) {
        self.joysticks.terminate();
    }

    pub fn scale_factor(&self) -> u32 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, scale_factor: u32) {
        self.scale_factor = scale_factor.max(1);
    }

    /// Logical resolution requested by the last resize, if any
    pub fn resolution(&self) -> Option<Vec2i> {
        self.resolution
    }

    /// Drain every pending event from `source` and update device state
    pub fn poll(&mut self, source: &mut dyn EventSource, ticks: u64) {
        self.has_resolution_changed = false;
        self.keyboard.pre_poll();
        self.joysticks.pre_poll();
        self.mouse.pre_poll();

        while let Some(event) = source.poll_event() {
            self.handle(event);
        }

        self.keyboard.post_poll(ticks);
        self.joysticks.post_poll();
        self.mouse.post_poll(ticks);
    }

    fn handle(&mut self, event: PlatformEvent) {
        let scale = self.scale_factor as f64;
        match event {
            PlatformEvent::KeyDown(key) => self.keyboard.on_key_down(key),
            PlatformEvent::KeyUp(key) => self.keyboard.on_key_up(key),
            PlatformEvent::MouseButtonDown(button) => self.mouse.on_button_down(button),
            PlatformEvent::MouseButtonUp(button) => self.mouse.on_button_up(button),
            PlatformEvent::MouseMoved { x, y } => self
                .mouse
                .on_motion(Vec2i::new((x / scale) as i32, (y / scale) as i32)),
            PlatformEvent::JoystickAdded { index, name } => self.joysticks.on_added(index, &name),
            PlatformEvent::JoystickRemoved { index } => self.joysticks.on_removed(index),
            PlatformEvent::JoystickButton {
                index,
                button,
                pressed,
            } => {
                if let Some(joy) = self.joysticks.get_mut(index) {
                    joy.on_button(button, pressed);
                }
            }
            PlatformEvent::JoystickAxis { index, axis, value } => {
                if let Some(joy) = self.joysticks.get_mut(index) {
                    joy.on_axis(axis, value);
                }
            }
            PlatformEvent::Resized { width, height } => {
                let resolution = Vec2i::new(
                    (width / self.scale_factor) as i32,
                    (height / self.scale_factor) as i32,
                );
                log::debug!("Resolution changed to {}", resolution);
                self.resolution = Some(resolution);
                self.has_resolution_changed = true;
            }
            PlatformEvent::Focus(focused) => self.has_focus = focused,
            PlatformEvent::Quit => self.has_quit = true,
        }
    }

    /// Block until a key is pressed. Returns `None` once quit is raised.
    pub fn wait_for_key(
        &mut self,
        source: &mut dyn EventSource,
        clock: &mut dyn Clock,
    ) -> Option<KeyCode> {
        loop {
            self.poll(source, clock.now_ms());
            if let Some(key) = self.keyboard.pressed_key() {
                return Some(key);
            }
            if self.has_quit {
                return None;
            }
            clock.sleep(WAIT_POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::command::Cmd;
    use crate::event::EventQueue;
    use crate::joystick::JoyButton;
    use crate::mouse::MouseButton;

    #[test]
    fn test_poll_routes_keys_and_buttons() {
        let mut handlers = EventHandlers::default();
        let mut queue = EventQueue::new();
        queue.push(PlatformEvent::KeyDown(KeyCode::Space));
        queue.push(PlatformEvent::MouseButtonDown(MouseButton::Right));
        handlers.poll(&mut queue, 0);

        assert!(handlers.keyboard.is_pressed(KeyCode::Space));
        assert!(handlers.mouse.is_pressed(MouseButton::Right));
        assert!(queue.is_empty());

        handlers.poll(&mut queue, 16);
        assert!(handlers.keyboard.is_down(KeyCode::Space));
        assert!(!handlers.keyboard.is_pressed(KeyCode::Space));
    }

    #[test]
    fn test_resize_flag_lasts_one_poll() {
        let mut handlers = EventHandlers::new(2, false);
        let mut queue = EventQueue::new();
        queue.push(PlatformEvent::Resized {
            width: 640,
            height: 480,
        });
        handlers.poll(&mut queue, 0);
        assert!(handlers.has_resolution_changed);
        assert_eq!(handlers.resolution(), Some(Vec2i::new(320, 240)));

        handlers.poll(&mut queue, 16);
        assert!(!handlers.has_resolution_changed);
        assert_eq!(handlers.resolution(), Some(Vec2i::new(320, 240)));
    }

    #[test]
    fn test_quit_is_sticky() {
        let mut handlers = EventHandlers::default();
        let mut queue = EventQueue::new();
        queue.push(PlatformEvent::Quit);
        handlers.poll(&mut queue, 0);
        assert!(handlers.has_quit);

        handlers.poll(&mut queue, 16);
        handlers.reset();
        assert!(handlers.has_quit);

        handlers.clear_quit();
        assert!(!handlers.has_quit);
    }

    #[test]
    fn test_mouse_motion_scaled() {
        let mut handlers = EventHandlers::new(2, false);
        let mut queue = EventQueue::new();
        queue.push(PlatformEvent::MouseMoved { x: 200.0, y: 101.0 });
        handlers.poll(&mut queue, 0);
        assert_eq!(handlers.mouse.current_pos, Vec2i::new(100, 50));
    }

    #[test]
    fn test_joystick_lifecycle() {
        let mut handlers = EventHandlers::default();
        let mut queue = EventQueue::new();
        queue.push(PlatformEvent::JoystickAdded {
            index: 0,
            name: "pad".to_string(),
        });
        queue.push(PlatformEvent::JoystickButton {
            index: 0,
            button: JoyButton::South,
            pressed: true,
        });
        // Events for unknown pads are ignored
        queue.push(PlatformEvent::JoystickButton {
            index: 3,
            button: JoyButton::South,
            pressed: true,
        });
        handlers.poll(&mut queue, 0);

        assert_eq!(handlers.joysticks.count(), 1);
        let joy = handlers.joysticks.get(0).unwrap();
        assert!(joy.is_pressed(Cmd::BUTTON1));

        queue.push(PlatformEvent::JoystickRemoved { index: 0 });
        handlers.poll(&mut queue, 16);
        assert_eq!(handlers.joysticks.count(), 0);
        assert!(handlers.joysticks.get(0).is_none());
    }

    #[test]
    fn test_wait_for_key() {
        let mut handlers = EventHandlers::default();
        let mut clock = ManualClock::new();
        let mut queue = EventQueue::new();
        queue.push(PlatformEvent::MouseButtonDown(MouseButton::Left));
        queue.push(PlatformEvent::KeyDown(KeyCode::KeyQ));
        assert_eq!(
            handlers.wait_for_key(&mut queue, &mut clock),
            Some(KeyCode::KeyQ)
        );

        queue.push(PlatformEvent::Quit);
        assert_eq!(handlers.wait_for_key(&mut queue, &mut clock), None);
    }
}
