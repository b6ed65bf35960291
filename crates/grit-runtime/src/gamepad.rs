//! Gamepad event source backed by gilrs

use crate::event::{EventSource, PlatformEvent};
use crate::joystick::{JoyAxis, JoyButton};
use gilrs::{Axis, Button, EventType, Gilrs};
use std::collections::VecDeque;

/// Drains gilrs into [`PlatformEvent`]s.
///
/// Pads already connected at startup are reported as added before any
/// other event. If the backend fails to start the source stays empty.
pub struct GamepadEvents {
    gilrs: Option<Gilrs>,
    pending: VecDeque<PlatformEvent>,
}

impl GamepadEvents {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                log::warn!("Gamepad support unavailable: {}", e);
                None
            }
        };

        let mut pending = VecDeque::new();
        if let Some(gilrs) = &gilrs {
            for (id, pad) in gilrs.gamepads() {
                pending.push_back(PlatformEvent::JoystickAdded {
                    index: usize::from(id),
                    name: pad.name().to_string(),
                });
            }
        }

        Self { gilrs, pending }
    }

    /// Source that never yields anything
    pub fn disabled() -> Self {
        Self {
            gilrs: None,
            pending: VecDeque::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.gilrs.is_some()
    }
}

impl Default for GamepadEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for GamepadEvents {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        let gilrs = self.gilrs.as_mut()?;
        while let Some(event) = gilrs.next_event() {
            let index = usize::from(event.id);
            let converted = match event.event {
                EventType::Connected => Some(PlatformEvent::JoystickAdded {
                    index,
                    name: gilrs.gamepad(event.id).name().to_string(),
                }),
                EventType::Disconnected => Some(PlatformEvent::JoystickRemoved { index }),
                EventType::ButtonPressed(button, _) => {
                    map_button(button).map(|button| PlatformEvent::JoystickButton {
                        index,
                        button,
                        pressed: true,
                    })
                }
                EventType::ButtonReleased(button, _) => {
                    map_button(button).map(|button| PlatformEvent::JoystickButton {
                        index,
                        button,
                        pressed: false,
                    })
                }
                EventType::AxisChanged(axis, value, _) => {
                    map_axis(axis).map(|axis| PlatformEvent::JoystickAxis { index, axis, value })
                }
                _ => None,
            };
            if converted.is_some() {
                return converted;
            }
        }
        None
    }
}

/// Map a gilrs button to an engine button
pub fn map_button(button: Button) -> Option<JoyButton> {
    match button {
        Button::DPadUp => Some(JoyButton::DPadUp),
        Button::DPadDown => Some(JoyButton::DPadDown),
        Button::DPadLeft => Some(JoyButton::DPadLeft),
        Button::DPadRight => Some(JoyButton::DPadRight),
        Button::South => Some(JoyButton::South),
        Button::East => Some(JoyButton::East),
        Button::West => Some(JoyButton::West),
        Button::North => Some(JoyButton::North),
        Button::Start => Some(JoyButton::Start),
        _ => None,
    }
}

/// Map a gilrs axis to an engine axis. Only the left stick steers.
pub fn map_axis(axis: Axis) -> Option<JoyAxis> {
    match axis {
        Axis::LeftStickX => Some(JoyAxis::X),
        Axis::LeftStickY => Some(JoyAxis::Y),
        _ => None,
    }
}
