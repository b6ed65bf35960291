//! Joystick (gamepad) state
//!
//! Each joystick reduces its buttons and left stick to command bits, so
//! edge/level queries work on [`Cmd`] flags directly.

use crate::command::Cmd;
use std::collections::HashSet;

/// Stick deflection needed to count as a direction
pub const AXIS_DEAD_ZONE: f32 = 0.5;

/// Gamepad buttons the engine understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoyButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    South,
    East,
    West,
    North,
    Start,
}

impl JoyButton {
    /// The command bit this button drives
    pub fn cmd(self) -> Cmd {
        match self {
            JoyButton::DPadUp => Cmd::UP,
            JoyButton::DPadDown => Cmd::DOWN,
            JoyButton::DPadLeft => Cmd::LEFT,
            JoyButton::DPadRight => Cmd::RIGHT,
            JoyButton::South => Cmd::BUTTON1,
            JoyButton::East => Cmd::BUTTON2,
            JoyButton::West => Cmd::BUTTON3,
            JoyButton::North | JoyButton::Start => Cmd::BUTTON4,
        }
    }
}

/// Left stick axes. Positive X is right, positive Y is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoyAxis {
    X,
    Y,
}

/// State of one joystick
#[derive(Debug, Clone, Default)]
pub struct Joystick {
    pub name: String,
    pub present: bool,
    buttons: HashSet<JoyButton>,
    axes: [f32; 2],
    previous: Cmd,
    current: Cmd,
    pressed: Cmd,
}

impl Joystick {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            present: true,
            ..Default::default()
        }
    }

    fn clear(&mut self) {
        self.buttons.clear();
        self.axes = [0.0; 2];
        self.previous = Cmd::NONE;
        self.current = Cmd::NONE;
        self.pressed = Cmd::NONE;
    }

    pub fn pre_poll(&mut self) {
        self.previous = self.current;
    }

    pub fn on_button(&mut self, button: JoyButton, pressed: bool) {
        if pressed {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    pub fn on_axis(&mut self, axis: JoyAxis, value: f32) {
        match axis {
            JoyAxis::X => self.axes[0] = value,
            JoyAxis::Y => self.axes[1] = value,
        }
    }

    /// Fold buttons and stick into command bits and derive edges
    pub fn post_poll(&mut self) {
        let mut cmd = Cmd::NONE;
        for button in &self.buttons {
            cmd |= button.cmd();
        }
        let [x, y] = self.axes;
        if x < -AXIS_DEAD_ZONE {
            cmd |= Cmd::LEFT;
        } else if x > AXIS_DEAD_ZONE {
            cmd |= Cmd::RIGHT;
        }
        if y > AXIS_DEAD_ZONE {
            cmd |= Cmd::UP;
        } else if y < -AXIS_DEAD_ZONE {
            cmd |= Cmd::DOWN;
        }
        self.current = cmd;
        self.pressed = cmd & !self.previous;
    }

    /// Is the command bit currently held?
    pub fn is_down(&self, cmd: Cmd) -> bool {
        self.current.contains(cmd)
    }

    /// Did the command bit become held this frame?
    pub fn is_pressed(&self, cmd: Cmd) -> bool {
        self.pressed.contains(cmd)
    }
}

/// All known joysticks, indexed by device index
#[derive(Debug, Clone, Default)]
pub struct Joysticks {
    joys: Vec<Joystick>,
}

impl Joysticks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Joystick> {
        self.joys.get(index).filter(|j| j.present)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Joystick> {
        self.joys.get_mut(index).filter(|j| j.present)
    }

    /// Number of connected joysticks
    pub fn count(&self) -> usize {
        self.joys.iter().filter(|j| j.present).count()
    }

    pub fn on_added(&mut self, index: usize, name: &str) {
        if self.joys.len() <= index {
            self.joys.resize_with(index + 1, Joystick::default);
        }
        log::info!("Joystick {index} connected: {name}");
        self.joys[index] = Joystick::new(name);
    }

    pub fn on_removed(&mut self, index: usize) {
        if let Some(joy) = self.joys.get_mut(index) {
            log::info!("Joystick {index} disconnected: {}", joy.name);
            joy.clear();
            joy.present = false;
        }
    }

    /// Clear input state, keeping connected devices
    pub fn reset(&mut self) {
        for joy in &mut self.joys {
            joy.clear();
        }
    }

    /// Forget every device
    pub fn terminate(&mut self) {
        self.joys.clear();
    }

    pub fn pre_poll(&mut self) {
        for joy in &mut self.joys {
            joy.pre_poll();
        }
    }

    pub fn post_poll(&mut self) {
        for joy in &mut self.joys {
            joy.post_poll();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges() {
        let mut joy = Joystick::new("pad");

        joy.pre_poll();
        joy.on_button(JoyButton::South, true);
        joy.post_poll();
        assert!(joy.is_down(Cmd::BUTTON1));
        assert!(joy.is_pressed(Cmd::BUTTON1));

        joy.pre_poll();
        joy.post_poll();
        assert!(joy.is_down(Cmd::BUTTON1));
        assert!(!joy.is_pressed(Cmd::BUTTON1));

        joy.pre_poll();
        joy.on_button(JoyButton::South, false);
        joy.post_poll();
        assert!(!joy.is_down(Cmd::BUTTON1));
    }

    #[test]
    fn test_stick_directions() {
        let mut joy = Joystick::new("pad");
        joy.on_axis(JoyAxis::X, -0.9);
        joy.on_axis(JoyAxis::Y, 0.8);
        joy.post_poll();
        assert!(joy.is_down(Cmd::LEFT));
        assert!(joy.is_down(Cmd::UP));
        assert!(!joy.is_down(Cmd::RIGHT));

        joy.pre_poll();
        joy.on_axis(JoyAxis::X, 0.2);
        joy.on_axis(JoyAxis::Y, -0.7);
        joy.post_poll();
        assert!(!joy.is_down(Cmd::LEFT));
        assert!(joy.is_down(Cmd::DOWN));
        assert!(joy.is_pressed(Cmd::DOWN));
    }

    #[test]
    fn test_north_and_start_share_button4() {
        let mut joy = Joystick::new("pad");
        joy.on_button(JoyButton::North, true);
        joy.on_button(JoyButton::Start, true);
        joy.on_button(JoyButton::Start, false);
        joy.post_poll();
        assert!(joy.is_down(Cmd::BUTTON4));
    }

    #[test]
    fn test_hotplug() {
        let mut joys = Joysticks::new();
        assert_eq!(joys.count(), 0);
        assert!(joys.get(1).is_none());

        joys.on_added(1, "Gamepad");
        assert_eq!(joys.count(), 1);
        assert!(joys.get(0).is_none());
        assert_eq!(joys.get(1).map(|j| j.name.as_str()), Some("Gamepad"));

        joys.on_removed(1);
        assert_eq!(joys.count(), 0);
        assert!(joys.get(1).is_none());
    }
}
