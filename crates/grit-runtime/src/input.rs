//! Command derivation
//!
//! Turns polled device state into per-player [`Cmd`] bitmasks. Keyboard and
//! joystick never report both directions of one axis (left wins over right,
//! up over down). Mouse movement steers by cursor offset and may report a
//! diagonal, but still only one bit per axis.

use crate::command::Cmd;
use crate::handlers::EventHandlers;
use crate::joystick::Joystick;
use crate::keyboard::Keyboard;
use crate::mouse::{Mouse, MouseButton};
use crate::player::{InputDevice, PlayerData, MAX_LOCAL_PLAYERS};
use grit_core::Vec2i;
use winit::keyboard::KeyCode;

/// Cursor offset from the player, in pixels, that still counts as centred
pub const MOUSE_MOVE_DEAD_ZONE: i32 = 12;

/// Whether a command reports edges or levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Just transitioned to down this frame
    Pressed,
    /// Currently held
    Held,
}

fn key_active(keyboard: &Keyboard, key: KeyCode, mode: InputMode) -> bool {
    match mode {
        InputMode::Pressed => keyboard.is_pressed(key),
        InputMode::Held => keyboard.is_down(key),
    }
}

fn mouse_active(mouse: &Mouse, button: MouseButton, mode: InputMode) -> bool {
    match mode {
        InputMode::Pressed => mouse.is_pressed(button),
        InputMode::Held => mouse.is_down(button),
    }
}

fn joy_active(joystick: &Joystick, cmd: Cmd, mode: InputMode) -> bool {
    match mode {
        InputMode::Pressed => joystick.is_pressed(cmd),
        InputMode::Held => joystick.is_down(cmd),
    }
}

/// Command from one keyboard binding slot. Unknown slots yield nothing.
pub fn keyboard_cmd(keyboard: &Keyboard, slot: usize, mode: InputMode) -> Cmd {
    let Some(keys) = keyboard.player_keys.get(slot) else {
        return Cmd::NONE;
    };
    let active = |key| key_active(keyboard, key, mode);

    let mut cmd = Cmd::NONE;
    if active(keys.left) {
        cmd |= Cmd::LEFT;
    } else if active(keys.right) {
        cmd |= Cmd::RIGHT;
    }
    if active(keys.up) {
        cmd |= Cmd::UP;
    } else if active(keys.down) {
        cmd |= Cmd::DOWN;
    }
    if active(keys.button1) {
        cmd |= Cmd::BUTTON1;
    }
    if active(keys.button2) {
        cmd |= Cmd::BUTTON2;
    }
    cmd
}

/// Command from the mouse.
///
/// With `movement` set to the player's screen position, directions come
/// from the cursor offset. Otherwise the wheel scrolls up and down.
/// Buttons map to BUTTON1..3 either way.
pub fn mouse_cmd(mouse: &Mouse, mode: InputMode, movement: Option<Vec2i>) -> Cmd {
    let mut cmd = Cmd::NONE;

    match movement {
        Some(pos) => {
            let cursor = mouse.current_pos;
            let dx = (cursor.x - pos.x).abs();
            let dy = (cursor.y - pos.y).abs();
            if dx > MOUSE_MOVE_DEAD_ZONE || dy > MOUSE_MOVE_DEAD_ZONE {
                if 2 * dx > dy {
                    if cursor.x > pos.x {
                        cmd |= Cmd::RIGHT;
                    } else if cursor.x < pos.x {
                        cmd |= Cmd::LEFT;
                    }
                }
                if 2 * dy > dx {
                    if cursor.y > pos.y {
                        cmd |= Cmd::DOWN;
                    } else if cursor.y < pos.y {
                        cmd |= Cmd::UP;
                    }
                }
            }
        }
        None => {
            if mouse_active(mouse, MouseButton::WheelUp, mode) {
                cmd |= Cmd::UP;
            } else if mouse_active(mouse, MouseButton::WheelDown, mode) {
                cmd |= Cmd::DOWN;
            }
        }
    }

    if mouse_active(mouse, MouseButton::Left, mode) {
        cmd |= Cmd::BUTTON1;
    }
    if mouse_active(mouse, MouseButton::Right, mode) {
        cmd |= Cmd::BUTTON2;
    }
    if mouse_active(mouse, MouseButton::Middle, mode) {
        cmd |= Cmd::BUTTON3;
    }
    cmd
}

/// Command from one joystick
pub fn joystick_cmd(joystick: &Joystick, mode: InputMode) -> Cmd {
    let active = |bit| joy_active(joystick, bit, mode);

    let mut cmd = Cmd::NONE;
    if active(Cmd::LEFT) {
        cmd |= Cmd::LEFT;
    } else if active(Cmd::RIGHT) {
        cmd |= Cmd::RIGHT;
    }
    if active(Cmd::UP) {
        cmd |= Cmd::UP;
    } else if active(Cmd::DOWN) {
        cmd |= Cmd::DOWN;
    }
    for button in [Cmd::BUTTON1, Cmd::BUTTON2, Cmd::BUTTON3, Cmd::BUTTON4] {
        if active(button) {
            cmd |= button;
        }
    }
    cmd
}

/// In-game command for a player, using held state.
///
/// A mouse player steers towards the cursor relative to `player_pos`.
pub fn game_cmd(handlers: &EventHandlers, player: &PlayerData, player_pos: Vec2i) -> Cmd {
    match player.input_device {
        InputDevice::Keyboard => keyboard_cmd(&handlers.keyboard, player.device_index, InputMode::Held),
        InputDevice::Mouse => mouse_cmd(&handlers.mouse, InputMode::Held, Some(player_pos)),
        InputDevice::Joystick => handlers
            .joysticks
            .get(player.device_index)
            .map_or(Cmd::NONE, |joy| joystick_cmd(joy, InputMode::Held)),
        InputDevice::Unset | InputDevice::Ai => Cmd::NONE,
    }
}

/// Command for a device, with the mouse in scroll mode
pub fn one_player_cmd(
    handlers: &EventHandlers,
    mode: InputMode,
    device: InputDevice,
    device_index: usize,
) -> Cmd {
    match device {
        InputDevice::Keyboard => keyboard_cmd(&handlers.keyboard, device_index, mode),
        InputDevice::Mouse => mouse_cmd(&handlers.mouse, mode, None),
        InputDevice::Joystick => handlers
            .joysticks
            .get(device_index)
            .map_or(Cmd::NONE, |joy| joystick_cmd(joy, mode)),
        InputDevice::Unset | InputDevice::Ai => Cmd::NONE,
    }
}

/// Pressed commands for every local player, packed by local slot.
///
/// Remote players take no slot. Local players past [`MAX_LOCAL_PLAYERS`]
/// are ignored.
pub fn player_cmds(handlers: &EventHandlers, players: &[PlayerData]) -> [Cmd; MAX_LOCAL_PLAYERS] {
    let mut cmds = [Cmd::NONE; MAX_LOCAL_PLAYERS];
    let locals = players.iter().filter(|p| p.is_local);
    for (slot, player) in cmds.iter_mut().zip(locals) {
        *slot = one_player_cmd(
            handlers,
            InputMode::Pressed,
            player.input_device,
            player.device_index,
        );
    }
    cmds
}

/// Menu navigation command.
///
/// Escape wins outright. Otherwise the first non-empty of: keyboard slot 0,
/// raw arrows with Enter/Backspace, joystick 0, mouse.
pub fn menu_cmd(handlers: &EventHandlers) -> Cmd {
    let kb = &handlers.keyboard;
    let joy0_escape = handlers
        .joysticks
        .get(0)
        .is_some_and(|joy| joy.is_pressed(Cmd::BUTTON4));
    if kb.is_pressed(KeyCode::Escape) || joy0_escape {
        return Cmd::ESC;
    }

    let mut cmd = one_player_cmd(handlers, InputMode::Pressed, InputDevice::Keyboard, 0);
    if cmd.is_empty() {
        if kb.is_pressed(KeyCode::ArrowLeft) {
            cmd |= Cmd::LEFT;
        } else if kb.is_pressed(KeyCode::ArrowRight) {
            cmd |= Cmd::RIGHT;
        }
        if kb.is_pressed(KeyCode::ArrowUp) {
            cmd |= Cmd::UP;
        } else if kb.is_pressed(KeyCode::ArrowDown) {
            cmd |= Cmd::DOWN;
        }
        if kb.is_pressed(KeyCode::Enter) {
            cmd |= Cmd::BUTTON1;
        }
        if kb.is_pressed(KeyCode::Backspace) {
            cmd |= Cmd::BUTTON2;
        }
    }
    if cmd.is_empty() && handlers.joysticks.count() > 0 {
        cmd = one_player_cmd(handlers, InputMode::Pressed, InputDevice::Joystick, 0);
    }
    if cmd.is_empty() {
        cmd = one_player_cmd(handlers, InputMode::Pressed, InputDevice::Mouse, 0);
    }
    cmd
}

/// Whether anyone asked to back out this frame
pub fn is_escape(handlers: &EventHandlers, cmds: &[Cmd], menu_cmd: Cmd) -> bool {
    cmds.iter().any(|cmd| cmd.contains(Cmd::BUTTON4))
        || handlers.keyboard.is_pressed(KeyCode::Escape)
        || handlers.has_quit
        || menu_cmd.contains(Cmd::BUTTON4)
}
