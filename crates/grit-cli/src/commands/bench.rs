//! Bench command: runs the frame loop headless and reports statistics

use crate::config::GritConfig;
use anyhow::Result;
use grit_runtime::{
    Clock, EventHandlers, EventQueue, GameLoop, GameState, LoopConfig, SystemClock, UpdateResult,
};
use std::time::Duration;

pub struct BenchArgs {
    pub seconds: u64,
    pub draw_ms: u64,
    pub fps: Option<u32>,
}

/// Requests a draw every frame and stops after a fixed time
struct BenchState {
    clock: SystemClock,
    until_ms: u64,
    draw_cost: Duration,
}

impl GameState for BenchState {
    fn update(&mut self, _events: &EventHandlers) -> UpdateResult {
        if self.clock.now_ms() >= self.until_ms {
            UpdateResult::Exit
        } else {
            UpdateResult::Draw
        }
    }

    fn draw(&mut self) {
        if !self.draw_cost.is_zero() {
            std::thread::sleep(self.draw_cost);
        }
    }
}

pub fn run(config: &GritConfig, args: BenchArgs) -> Result<()> {
    let loop_config = LoopConfig {
        fps: args.fps.unwrap_or(config.game_loop.fps),
        ..config.game_loop
    };
    println!(
        "Running {} fps for {}s with {} ms draws",
        loop_config.fps, args.seconds, args.draw_ms
    );

    let mut game_loop = GameLoop::new(loop_config);
    let mut events = EventHandlers::new(config.graphics.scale_factor, true);
    let mut platform = EventQueue::new();
    let clock = SystemClock::new();
    let mut state = BenchState {
        until_ms: clock.now_ms() + args.seconds * 1000,
        clock,
        draw_cost: Duration::from_millis(args.draw_ms),
    };

    let stats = game_loop.run(&mut events, &mut platform, &mut state);

    let seconds = args.seconds.max(1) as f64;
    println!("updates:            {}", stats.updates);
    println!("draws:              {}", stats.draws);
    println!("skipped:            {}", stats.skipped);
    println!("longest skip run:   {}", stats.max_consecutive_skips);
    println!("draws per second:   {:.1}", stats.draws as f64 / seconds);
    println!("updates per second: {:.1}", stats.updates as f64 / seconds);
    Ok(())
}
