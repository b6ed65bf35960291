//! Input command: opens a window and reports player commands as they change

use crate::config::GritConfig;
use anyhow::Result;
use grit_core::Vec2i;
use grit_runtime::{
    controls_hint, game_cmd, is_escape, menu_cmd, player_cmds, Cmd, EventHandlers, EventQueue,
    EventSource, GameLoop, GameState, GamepadEvents, InputDevice, Platform, PlatformEvent,
    PlayerData, UpdateResult, MAX_KEYBOARD_CONFIGS, MAX_LOCAL_PLAYERS,
};
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

pub struct InputArgs {
    pub players: usize,
    pub mouse: bool,
}

/// Window events first, then gamepads
struct WindowPlatform {
    queue: EventQueue,
    gamepads: GamepadEvents,
}

impl EventSource for WindowPlatform {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.queue
            .poll_event()
            .or_else(|| self.gamepads.poll_event())
    }
}

impl Platform for WindowPlatform {}

/// Assigns keyboard slots first, then joysticks. With `mouse`, player 1 uses the mouse.
fn local_players(count: usize, mouse: bool) -> Vec<PlayerData> {
    (0..count.min(MAX_LOCAL_PLAYERS))
        .map(|i| {
            let name = format!("Player {}", i + 1);
            if mouse && i == 0 {
                PlayerData::local(name, InputDevice::Mouse, 0)
            } else if i < MAX_KEYBOARD_CONFIGS {
                PlayerData::local(name, InputDevice::Keyboard, i)
            } else {
                PlayerData::local(name, InputDevice::Joystick, i - MAX_KEYBOARD_CONFIGS)
            }
        })
        .collect()
}

/// Prints every change in the derived commands; escape or closing the window exits
struct InputMonitor {
    players: Vec<PlayerData>,
    last_cmds: [Cmd; MAX_LOCAL_PLAYERS],
    last_steer: Cmd,
    last_menu: Cmd,
}

impl InputMonitor {
    fn new(players: Vec<PlayerData>) -> Self {
        Self {
            players,
            last_cmds: [Cmd::NONE; MAX_LOCAL_PLAYERS],
            last_steer: Cmd::NONE,
            last_menu: Cmd::NONE,
        }
    }
}

impl GameState for InputMonitor {
    fn update(&mut self, events: &EventHandlers) -> UpdateResult {
        let cmds = player_cmds(events, &self.players);
        for (slot, (cmd, last)) in cmds.iter().zip(self.last_cmds.iter()).enumerate() {
            if cmd != last {
                println!("{:<10} {}", self.players[slot].name, cmd);
            }
        }
        self.last_cmds = cmds;

        if let Some(player) = self
            .players
            .iter()
            .find(|p| p.input_device == InputDevice::Mouse)
        {
            let center = events
                .resolution()
                .map_or(Vec2i::ZERO, |res| Vec2i::new(res.x / 2, res.y / 2));
            let steer = game_cmd(events, player, center);
            if steer != self.last_steer {
                println!("{:<10} steer {}", player.name, steer);
                self.last_steer = steer;
            }
        }

        let menu = menu_cmd(events);
        if menu != self.last_menu && !menu.is_empty() {
            println!("{:<10} {}", "menu", menu);
        }
        self.last_menu = menu;

        if is_escape(events, &cmds, menu) {
            UpdateResult::Exit
        } else {
            UpdateResult::Ok
        }
    }
}

struct InputApp {
    window: Option<Window>,
    platform: WindowPlatform,
    events: EventHandlers,
    game_loop: GameLoop,
    state: InputMonitor,
    period: Duration,
    next_frame: Instant,
}

impl ApplicationHandler for InputApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("Grit Input")
            .with_inner_size(PhysicalSize::new(640, 480));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                window.set_cursor_visible(!self.events.mouse.hide_cursor);
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.platform.queue.push_window_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            let result = self
                .game_loop
                .step(&mut self.events, &mut self.platform, &mut self.state);
            if result == UpdateResult::Exit {
                event_loop.exit();
                return;
            }
            self.next_frame += self.period;
            if self.next_frame < now {
                self.next_frame = now + self.period;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

pub fn run(config: &GritConfig, args: InputArgs) -> Result<()> {
    let players = local_players(args.players, args.mouse);
    let events = EventHandlers::new(config.graphics.scale_factor, config.graphics.hide_mouse)
        .with_bindings(config.key_bindings());

    println!("Controls:");
    for player in &players {
        println!("  {:<10} {}", player.name, controls_hint(player, &events));
    }
    println!("  Escape     - Exit");
    println!();

    let gamepads = GamepadEvents::new();
    if !gamepads.is_available() {
        log::info!("Joysticks unavailable");
    }

    let event_loop = EventLoop::new()?;
    let period = Duration::from_millis(config.game_loop.period_ms());
    let mut app = InputApp {
        window: None,
        platform: WindowPlatform {
            queue: EventQueue::new(),
            gamepads,
        },
        events,
        game_loop: GameLoop::new(config.game_loop),
        state: InputMonitor::new(players),
        period,
        next_frame: Instant::now(),
    };
    event_loop.run_app(&mut app)?;

    Ok(())
}
