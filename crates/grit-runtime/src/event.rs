//! Platform events and the sources they are drained from

use crate::joystick::{JoyAxis, JoyButton};
use crate::mouse::MouseButton;
use std::collections::VecDeque;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A raw input or window event, already stripped of backend details
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
    /// Cursor position in physical window pixels
    MouseMoved { x: f64, y: f64 },
    JoystickAdded { index: usize, name: String },
    JoystickRemoved { index: usize },
    JoystickButton { index: usize, button: JoyButton, pressed: bool },
    JoystickAxis { index: usize, axis: JoyAxis, value: f32 },
    /// Window resized, in physical pixels
    Resized { width: u32, height: u32 },
    Focus(bool),
    Quit,
}

/// Something that yields pending platform events without blocking
pub trait EventSource {
    fn poll_event(&mut self) -> Option<PlatformEvent>;
}

impl<T: EventSource + ?Sized> EventSource for &mut T {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        (**self).poll_event()
    }
}

/// Two sources drained in order: all of the first, then the second
impl<A: EventSource, B: EventSource> EventSource for (A, B) {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.0.poll_event().or_else(|| self.1.poll_event())
    }
}

/// FIFO of events pushed by a windowing callback and drained by the poll
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<PlatformEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PlatformEvent) {
        self.events.push_back(event);
    }

    /// Convert and enqueue a winit window event.
    ///
    /// Returns false for events the engine ignores.
    pub fn push_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => self.push(PlatformEvent::Quit),
            WindowEvent::Resized(size) => self.push(PlatformEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::Focused(focused) => self.push(PlatformEvent::Focus(*focused)),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return false;
                };
                match event.state {
                    ElementState::Pressed => self.push(PlatformEvent::KeyDown(code)),
                    ElementState::Released => self.push(PlatformEvent::KeyUp(code)),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_mouse_button(*button) else {
                    return false;
                };
                match state {
                    ElementState::Pressed => self.push(PlatformEvent::MouseButtonDown(button)),
                    ElementState::Released => self.push(PlatformEvent::MouseButtonUp(button)),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let Some(button) = wheel_button(*delta) else {
                    return false;
                };
                // A wheel step is a press and release in the same poll
                self.push(PlatformEvent::MouseButtonDown(button));
                self.push(PlatformEvent::MouseButtonUp(button));
            }
            WindowEvent::CursorMoved { position, .. } => self.push(PlatformEvent::MouseMoved {
                x: position.x,
                y: position.y,
            }),
            _ => return false,
        }
        true
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for EventQueue {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.events.pop_front()
    }
}

/// Map a winit mouse button to an engine button
pub fn map_mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Map a wheel delta to a wheel step button. Positive y scrolls up.
pub fn wheel_button(delta: MouseScrollDelta) -> Option<MouseButton> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(pos) => pos.y,
    };
    if y > 0.0 {
        Some(MouseButton::WheelUp)
    } else if y < 0.0 {
        Some(MouseButton::WheelDown)
    } else {
        None
    }
}
