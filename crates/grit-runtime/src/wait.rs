//! Loop state that waits for any player to confirm or back out

use crate::command::Cmd;
use crate::game_loop::{GameState, UpdateResult};
use crate::handlers::EventHandlers;
use crate::input::{is_escape, menu_cmd, player_cmds};
use crate::player::PlayerData;

/// Exits on the first BUTTON1/BUTTON2 press from any local player or menu
/// input, or on escape.
///
/// After the loop exits, `is_ok` is `Some(true)` for a confirm and
/// `Some(false)` for escape.
pub struct WaitForAnyKeyOrButton<'a> {
    players: &'a [PlayerData],
    pub is_ok: Option<bool>,
}

impl<'a> WaitForAnyKeyOrButton<'a> {
    pub fn new(players: &'a [PlayerData]) -> Self {
        Self {
            players,
            is_ok: None,
        }
    }

    fn finish(&mut self, ok: bool) -> UpdateResult {
        self.is_ok = Some(ok);
        UpdateResult::Exit
    }
}

impl GameState for WaitForAnyKeyOrButton<'_> {
    fn update(&mut self, events: &EventHandlers) -> UpdateResult {
        let confirm = Cmd::BUTTON1 | Cmd::BUTTON2;
        let cmds = player_cmds(events, self.players);
        if cmds.iter().any(|cmd| cmd.intersects(confirm)) {
            return self.finish(true);
        }

        let menu = menu_cmd(events);
        if menu.intersects(confirm) {
            return self.finish(true);
        }

        if is_escape(events, &cmds, menu) {
            return self.finish(false);
        }

        UpdateResult::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::LoopConfig;
    use crate::event::{EventQueue, PlatformEvent};
    use crate::game_loop::GameLoop;
    use crate::player::InputDevice;
    use winit::keyboard::KeyCode;

    fn run_with(players: &[PlayerData], events: Vec<PlatformEvent>) -> Option<bool> {
        let mut game_loop = GameLoop::with_clock(LoopConfig::default(), ManualClock::new());
        let mut handlers = EventHandlers::default();
        let mut queue = EventQueue::new();
        for event in events {
            queue.push(event);
        }
        let mut wait = WaitForAnyKeyOrButton::new(players);
        game_loop.run(&mut handlers, &mut queue, &mut wait);
        wait.is_ok
    }

    #[test]
    fn test_player_button_confirms() {
        let players = [PlayerData::local("p1", InputDevice::Keyboard, 1)];
        assert_eq!(
            run_with(&players, vec![PlatformEvent::KeyDown(KeyCode::ControlLeft)]),
            Some(true)
        );
    }

    #[test]
    fn test_menu_enter_confirms_without_players() {
        assert_eq!(
            run_with(&[], vec![PlatformEvent::KeyDown(KeyCode::Enter)]),
            Some(true)
        );
    }

    #[test]
    fn test_escape_and_quit_cancel() {
        assert_eq!(
            run_with(&[], vec![PlatformEvent::KeyDown(KeyCode::Escape)]),
            Some(false)
        );
        assert_eq!(run_with(&[], vec![PlatformEvent::Quit]), Some(false));
    }

    #[test]
    fn test_waits_while_idle() {
        let mut handlers = EventHandlers::default();
        let mut wait = WaitForAnyKeyOrButton::new(&[]);
        assert_eq!(wait.update(&handlers), UpdateResult::Ok);
        assert_eq!(wait.is_ok, None);

        handlers.has_quit = true;
        assert_eq!(wait.update(&handlers), UpdateResult::Exit);
        assert_eq!(wait.is_ok, Some(false));
    }
}
