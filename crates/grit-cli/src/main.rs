//! Grit CLI - Command-line interface for the Grit engine

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{bench, input, play, sounds};
use config::GritConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grit")]
#[command(about = "Input, frame loop and positional audio toolkit for 2D arcade games", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file layered over ~/.grit/config.toml and ./grit.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sounds in a sound directory
    Sounds {
        /// Sound directory (defaults to [sound].directory)
        dir: Option<PathBuf>,
    },

    /// Play a sound at a position relative to a listener at the origin
    Play {
        /// Sound name (file name without extension)
        name: String,

        /// Sound position (comma-separated x,y)
        #[arg(long, value_parser = parse_vec2, default_value = "0,0")]
        at: [i32; 2],

        /// Extra distance added before attenuation
        #[arg(long, default_value = "0")]
        plus_distance: i32,

        /// Sight-blocking tile (comma-separated x,y), repeatable
        #[arg(long = "wall", value_parser = parse_vec2)]
        walls: Vec<[i32; 2]>,

        /// Tile size in pixels for --wall
        #[arg(long, default_value = "16")]
        tile_size: i32,
    },

    /// Run the frame loop headless and report timing statistics
    Bench {
        /// Seconds to run
        #[arg(long, default_value = "3")]
        seconds: u64,

        /// Simulated draw cost in milliseconds
        #[arg(long, default_value = "0")]
        draw_ms: u64,

        /// Override [game_loop].fps
        #[arg(long)]
        fps: Option<u32>,
    },

    /// Open a window and show the commands derived from live input
    Input {
        /// Number of local players to show (keyboard slots first, then joysticks)
        #[arg(long, default_value = "2")]
        players: usize,

        /// Steer player 1 with the mouse
        #[arg(long)]
        mouse: bool,
    },
}

fn parse_vec2(s: &str) -> Result<[i32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: i32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: i32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok([x, y])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = GritConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Sounds { dir } => {
            sounds::run(dir.as_deref().unwrap_or(config.sound.directory.as_path()))
        }
        Commands::Play {
            name,
            at,
            plus_distance,
            walls,
            tile_size,
        } => play::run(
            &config,
            play::PlayArgs {
                name,
                at,
                plus_distance,
                walls,
                tile_size,
            },
        ),
        Commands::Bench {
            seconds,
            draw_ms,
            fps,
        } => bench::run(
            &config,
            bench::BenchArgs {
                seconds,
                draw_ms,
                fps,
            },
        ),
        Commands::Input { players, mouse } => {
            input::run(&config, input::InputArgs { players, mouse })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec2() {
        assert_eq!(parse_vec2("10, -4"), Ok([10, -4]));
        assert!(parse_vec2("1,2,3").is_err());
        assert!(parse_vec2("a,2").is_err());
    }

    #[test]
    fn test_cli_parses_play() {
        let cli = Cli::try_parse_from([
            "grit", "play", "bang", "--at", "100,0", "--wall", "3,0", "--wall", "4,0",
        ])
        .unwrap();
        match cli.command {
            Commands::Play { name, at, walls, .. } => {
                assert_eq!(name, "bang");
                assert_eq!(at, [100, 0]);
                assert_eq!(walls, vec![[3, 0], [4, 0]]);
            }
            _ => panic!("expected play"),
        }
    }
}
