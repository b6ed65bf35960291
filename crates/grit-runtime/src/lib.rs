//! Grit Runtime - input and frame loop
//!
//! Provides the per-frame building blocks of the engine:
//! - `EventHandlers`: keyboard, mouse and joystick state, polled once per frame
//! - `Cmd`: per-player command bitmask derived from device state
//! - `GameLoop`: fixed-timestep driver with frame skip
//! - `EventQueue` / `GamepadEvents`: platform event sources for winit and gilrs

mod clock;
mod command;
mod config;
mod event;
mod game_loop;
mod gamepad;
mod handlers;
mod input;
mod joystick;
mod keyboard;
mod mouse;
mod player;
mod wait;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::Cmd;
pub use config::{keyboard_bindings, GraphicsConfig, LoopConfig};
pub use event::{map_mouse_button, wheel_button, EventQueue, EventSource, PlatformEvent};
pub use game_loop::{GameLoop, GameState, LoopStats, Platform, UpdateResult};
pub use gamepad::GamepadEvents;
pub use handlers::EventHandlers;
pub use input::{
    game_cmd, is_escape, joystick_cmd, keyboard_cmd, menu_cmd, mouse_cmd, one_player_cmd,
    player_cmds, InputMode, MOUSE_MOVE_DEAD_ZONE,
};
pub use joystick::{JoyAxis, JoyButton, Joystick, Joysticks, AXIS_DEAD_ZONE};
pub use keyboard::{
    key_name, InputKeys, Keyboard, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS,
    MAX_KEYBOARD_CONFIGS,
};
pub use mouse::{Mouse, MouseButton, CURSOR_IDLE_MS};
pub use player::{controls_hint, input_device_name, InputDevice, PlayerData, MAX_LOCAL_PLAYERS};
pub use wait::WaitForAnyKeyOrButton;

// Re-export for downstream crates that convert window events
pub use winit::keyboard::KeyCode;
