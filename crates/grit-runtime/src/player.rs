//! Player input device assignment

use crate::handlers::EventHandlers;
use crate::joystick::Joysticks;
use crate::keyboard::key_name;
use serde::{Deserialize, Serialize};

/// Maximum number of players on one machine
pub const MAX_LOCAL_PLAYERS: usize = 4;

/// Which kind of device drives a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputDevice {
    #[default]
    Unset,
    Keyboard,
    Mouse,
    Joystick,
    Ai,
}

/// One entry of the player registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub name: String,
    pub input_device: InputDevice,
    /// Keyboard binding slot or joystick index, depending on the device
    pub device_index: usize,
    pub is_local: bool,
}

impl PlayerData {
    pub fn local(name: impl Into<String>, input_device: InputDevice, device_index: usize) -> Self {
        Self {
            name: name.into(),
            input_device,
            device_index,
            is_local: true,
        }
    }

    pub fn remote(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_device: InputDevice::Unset,
            device_index: 0,
            is_local: false,
        }
    }
}

/// Human readable device name
pub fn input_device_name(device: InputDevice, index: usize, joysticks: &Joysticks) -> String {
    match device {
        InputDevice::Unset => "Unset".to_string(),
        InputDevice::Keyboard => format!("Keyboard {}", index + 1),
        InputDevice::Mouse => "Mouse".to_string(),
        InputDevice::Joystick => match joysticks.get(index) {
            Some(joy) if !joy.name.is_empty() => joy.name.clone(),
            _ => format!("Joystick {}", index + 1),
        },
        InputDevice::Ai => "AI".to_string(),
    }
}

/// Short description of the controls a player uses, e.g. for a lobby screen
pub fn controls_hint(player: &PlayerData, handlers: &EventHandlers) -> String {
    match player.input_device {
        InputDevice::Keyboard => {
            let Some(keys) = handlers.keyboard.player_keys.get(player.device_index) else {
                return format!("(keyboard slot {} unbound)", player.device_index);
            };
            format!(
                "({}, {}, {}, {}, {} and {})",
                key_name(keys.left),
                key_name(keys.right),
                key_name(keys.up),
                key_name(keys.down),
                key_name(keys.button1),
                key_name(keys.button2)
            )
        }
        InputDevice::Mouse => "(mouse wheel to scroll, left and right click)".to_string(),
        device => format!(
            "({})",
            input_device_name(device, player.device_index, &handlers.joysticks)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_names() {
        let mut joysticks = Joysticks::new();
        assert_eq!(input_device_name(InputDevice::Joystick, 1, &joysticks), "Joystick 2");

        joysticks.on_added(1, "Arcade Stick");
        assert_eq!(input_device_name(InputDevice::Joystick, 1, &joysticks), "Arcade Stick");
        assert_eq!(input_device_name(InputDevice::Keyboard, 0, &joysticks), "Keyboard 1");
        assert_eq!(input_device_name(InputDevice::Ai, 0, &joysticks), "AI");
    }

    #[test]
    fn test_keyboard_hint_uses_slot_bindings() {
        let handlers = EventHandlers::default();
        let player = PlayerData::local("Jones", InputDevice::Keyboard, 1);
        assert_eq!(
            controls_hint(&player, &handlers),
            "(KeyA, KeyD, KeyW, KeyS, ControlLeft and ShiftLeft)"
        );

        let player = PlayerData::local("Ice", InputDevice::Keyboard, 7);
        assert!(controls_hint(&player, &handlers).contains("unbound"));
    }

    #[test]
    fn test_mouse_and_ai_hints() {
        let handlers = EventHandlers::default();
        let mouse = PlayerData::local("Jones", InputDevice::Mouse, 0);
        assert!(controls_hint(&mouse, &handlers).starts_with("(mouse wheel"));

        let ai = PlayerData::local("Bot", InputDevice::Ai, 0);
        assert_eq!(controls_hint(&ai, &handlers), "(AI)");
    }

    #[test]
    fn test_device_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            device: InputDevice,
        }
        let w: Wrapper = toml::from_str("device = \"joystick\"").unwrap();
        assert_eq!(w.device, InputDevice::Joystick);
    }
}
