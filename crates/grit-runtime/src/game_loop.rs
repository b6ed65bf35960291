//! Fixed-timestep frame loop with frame skip
//!
//! Each frame polls input, lets the network collaborators advance, then
//! updates the game state. Elapsed time accumulates as a debt that every
//! update pays down by one period. While the debt stays above one period
//! the loop skips drawing, up to `fps / 5` frames in a row, so a slow
//! renderer cannot starve the simulation.

use crate::clock::{Clock, SystemClock};
use crate::config::LoopConfig;
use crate::event::{EventQueue, EventSource};
use crate::handlers::EventHandlers;
use std::time::Duration;

/// What an update wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// Keep going; draw only if nothing has been drawn yet
    Ok,
    /// Keep going and draw this frame
    Draw,
    /// Leave the loop
    Exit,
}

/// A state driven by the loop, e.g. a menu or a running game
pub trait GameState {
    /// Called after each input poll
    fn input(&mut self, _events: &EventHandlers) {}

    fn update(&mut self, events: &EventHandlers) -> UpdateResult;

    fn draw(&mut self) {}
}

/// Host services the loop coordinates with
pub trait Platform: EventSource {
    /// Advance the network client without blocking
    fn poll_client(&mut self) {}

    /// Advance the network server without blocking
    fn poll_server(&mut self) {}

    /// Show the frame that was just drawn
    fn present(&mut self) {}
}

/// Headless platform: events come from the queue, nothing is shown
impl Platform for EventQueue {}

/// Counters from one run of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub updates: u64,
    pub draws: u64,
    pub skipped: u64,
    pub max_consecutive_skips: u32,
}

/// Drives a [`GameState`] at a fixed rate
pub struct GameLoop<C: Clock = SystemClock> {
    pub config: LoopConfig,
    clock: C,
    frames: u64,
    has_drawn_first: bool,
}

impl GameLoop<SystemClock> {
    pub fn new(config: LoopConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> GameLoop<C> {
    pub fn with_clock(config: LoopConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            frames: 0,
            has_drawn_first: false,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Frames updated so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn should_poll_input(&self) -> bool {
        self.frames & 1 == 1 || !self.config.input_every_second_frame
    }

    fn poll_input<P: Platform, S: GameState + ?Sized>(
        &mut self,
        events: &mut EventHandlers,
        platform: &mut P,
        state: &mut S,
        ticks: u64,
    ) {
        if self.should_poll_input() {
            events.poll(platform, ticks);
            state.input(events);
        }
        platform.poll_client();
        platform.poll_server();
    }

    /// Run until the state returns [`UpdateResult::Exit`]
    pub fn run<P: Platform, S: GameState + ?Sized>(
        &mut self,
        events: &mut EventHandlers,
        platform: &mut P,
        state: &mut S,
    ) -> LoopStats {
        events.reset();

        let period = self.config.period_ms() as i64;
        let max_frame_skip = self.config.max_frame_skip();
        let mut stats = LoopStats::default();
        let mut ticks_now = self.clock.now_ms();
        let mut debt: i64 = 0;
        let mut frames_skipped: u32 = 0;

        log::debug!(
            "Game loop starting at {} fps (max {} skipped frames)",
            self.config.fps,
            max_frame_skip
        );

        loop {
            let ticks_then = ticks_now;
            ticks_now = self.clock.now_ms();
            debt += ticks_now.saturating_sub(ticks_then) as i64;
            if debt < period {
                self.clock.sleep(Duration::from_millis((period - debt) as u64));
                continue;
            }

            self.poll_input(events, platform, state, ticks_now);

            let result = state.update(events);
            stats.updates += 1;
            let draw = result == UpdateResult::Draw || !self.has_drawn_first;

            debt -= period;
            self.frames += 1;

            if debt > period && frames_skipped < max_frame_skip {
                frames_skipped += 1;
                stats.skipped += 1;
                stats.max_consecutive_skips = stats.max_consecutive_skips.max(frames_skipped);
                if result == UpdateResult::Exit {
                    break;
                }
                continue;
            }
            frames_skipped = 0;

            if draw {
                state.draw();
                platform.present();
                self.has_drawn_first = true;
                stats.draws += 1;
            }

            if result == UpdateResult::Exit {
                break;
            }
        }

        log::debug!("Game loop finished: {:?}", stats);
        stats
    }

    /// One externally scheduled frame.
    ///
    /// For hosts that own the event loop and call back once per tick. There
    /// is no throttling or frame skip: every step updates, draws and
    /// presents.
    pub fn step<P: Platform, S: GameState + ?Sized>(
        &mut self,
        events: &mut EventHandlers,
        platform: &mut P,
        state: &mut S,
    ) -> UpdateResult {
        let ticks = self.clock.now_ms();
        self.poll_input(events, platform, state, ticks);

        self.frames += 1;
        let result = state.update(events);
        state.draw();
        platform.present();
        self.has_drawn_first = true;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::event::PlatformEvent;
    use winit::keyboard::KeyCode;

    /// Runs until the shared clock passes `until_ms`, charging `draw_cost_ms`
    /// per draw.
    struct Timed {
        clock: ManualClock,
        until_ms: u64,
        draw_cost_ms: u64,
        result: UpdateResult,
        draws: u64,
        inputs: u64,
    }

    impl Timed {
        fn new(clock: &ManualClock, until_ms: u64, result: UpdateResult) -> Self {
            Self {
                clock: clock.clone(),
                until_ms,
                draw_cost_ms: 0,
                result,
                draws: 0,
                inputs: 0,
            }
        }
    }

    impl GameState for Timed {
        fn input(&mut self, _events: &EventHandlers) {
            self.inputs += 1;
        }

        fn update(&mut self, _events: &EventHandlers) -> UpdateResult {
            if self.clock.now_ms() >= self.until_ms {
                UpdateResult::Exit
            } else {
                self.result
            }
        }

        fn draw(&mut self) {
            self.draws += 1;
            self.clock.advance(self.draw_cost_ms);
        }
    }

    #[derive(Default)]
    struct CountingPlatform {
        queue: EventQueue,
        client_polls: u64,
        server_polls: u64,
        presents: u64,
    }

    impl EventSource for CountingPlatform {
        fn poll_event(&mut self) -> Option<PlatformEvent> {
            self.queue.poll_event()
        }
    }

    impl Platform for CountingPlatform {
        fn poll_client(&mut self) {
            self.client_polls += 1;
        }

        fn poll_server(&mut self) {
            self.server_polls += 1;
        }

        fn present(&mut self) {
            self.presents += 1;
        }
    }

    #[test]
    fn test_draws_per_second_match_fps() {
        let clock = ManualClock::new();
        let mut game_loop = GameLoop::with_clock(LoopConfig::default(), clock.clone());
        let mut events = EventHandlers::default();
        let mut platform = CountingPlatform::default();
        let mut state = Timed::new(&clock, 1000, UpdateResult::Draw);

        let stats = game_loop.run(&mut events, &mut platform, &mut state);

        assert!((29..=31).contains(&stats.draws), "draws = {}", stats.draws);
        assert_eq!(stats.draws, state.draws);
        assert_eq!(stats.skipped, 0);
        assert_eq!(platform.presents, stats.draws);
        assert_eq!(platform.client_polls, stats.updates);
        assert_eq!(platform.server_polls, stats.updates);
        assert_eq!(state.inputs, stats.updates);
    }

    #[test]
    fn test_slow_draw_skip_streak_capped() {
        let clock = ManualClock::new();
        let mut game_loop = GameLoop::with_clock(LoopConfig::default(), clock.clone());
        let mut events = EventHandlers::default();
        let mut platform = EventQueue::new();
        let mut state = Timed::new(&clock, 5000, UpdateResult::Draw);
        state.draw_cost_ms = 400;

        let stats = game_loop.run(&mut events, &mut platform, &mut state);

        assert_eq!(stats.max_consecutive_skips, 6);
        assert!(stats.skipped > 0);
        assert!(stats.draws > 0);
        // Every update either draws or skips, except possibly the exiting one
        let accounted = stats.draws + stats.skipped;
        assert!(stats.updates == accounted || stats.updates == accounted + 1);
    }

    #[test]
    fn test_ok_result_draws_first_frame_only() {
        let clock = ManualClock::new();
        let mut game_loop = GameLoop::with_clock(LoopConfig::default(), clock.clone());
        let mut events = EventHandlers::default();
        let mut platform = EventQueue::new();
        let mut state = Timed::new(&clock, 500, UpdateResult::Ok);

        let stats = game_loop.run(&mut events, &mut platform, &mut state);

        assert_eq!(stats.draws, 1);
        assert!(stats.updates > 10);
    }

    #[test]
    fn test_input_every_second_frame() {
        let clock = ManualClock::new();
        let config = LoopConfig {
            fps: 30,
            input_every_second_frame: true,
        };
        let mut game_loop = GameLoop::with_clock(config, clock.clone());
        let mut events = EventHandlers::default();
        let mut platform = EventQueue::new();
        let mut state = Timed::new(&clock, 1000, UpdateResult::Draw);

        let stats = game_loop.run(&mut events, &mut platform, &mut state);

        assert_eq!(state.inputs, stats.updates / 2);
    }

    #[test]
    fn test_exit_on_first_update() {
        struct Quitter;
        impl GameState for Quitter {
            fn update(&mut self, _events: &EventHandlers) -> UpdateResult {
                UpdateResult::Exit
            }
        }

        let mut game_loop = GameLoop::with_clock(LoopConfig::default(), ManualClock::new());
        let mut events = EventHandlers::default();
        let mut platform = EventQueue::new();
        let stats = game_loop.run(&mut events, &mut platform, &mut Quitter);

        assert_eq!(stats.updates, 1);
        assert_eq!(stats.draws, 1);
    }

    #[test]
    fn test_step_always_draws() {
        struct Echo {
            saw_key: bool,
        }
        impl GameState for Echo {
            fn update(&mut self, events: &EventHandlers) -> UpdateResult {
                self.saw_key |= events.keyboard.is_pressed(KeyCode::Space);
                UpdateResult::Ok
            }
        }

        let mut game_loop = GameLoop::with_clock(LoopConfig::default(), ManualClock::new());
        let mut events = EventHandlers::default();
        let mut platform = CountingPlatform::default();
        platform.queue.push(PlatformEvent::KeyDown(KeyCode::Space));
        let mut state = Echo { saw_key: false };

        for _ in 0..3 {
            assert_eq!(
                game_loop.step(&mut events, &mut platform, &mut state),
                UpdateResult::Ok
            );
        }
        assert!(state.saw_key);
        assert_eq!(platform.presents, 3);
        assert_eq!(game_loop.frames(), 3);
    }
}
