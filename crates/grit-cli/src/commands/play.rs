//! Play command: plays one sound through the positional audio engine

use crate::config::GritConfig;
use anyhow::{bail, Result};
use grit_audio::{locate, KiraMixer, PlayOutcome, SoundDevice};
use grit_core::{TileGrid, Vec2i};
use std::time::Duration;

pub struct PlayArgs {
    pub name: String,
    pub at: [i32; 2],
    pub plus_distance: i32,
    pub walls: Vec<[i32; 2]>,
    pub tile_size: i32,
}

pub fn run(config: &GritConfig, args: PlayArgs) -> Result<()> {
    let mixer = match KiraMixer::new() {
        Ok(mixer) => Some(mixer),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };
    let mut device = SoundDevice::initialize(mixer, config.sound.clone());
    if !device.is_initialised() {
        bail!("Sound device unavailable");
    }

    let Some(sound) = device.str_sound(&args.name) else {
        bail!(
            "No sound named '{}' in {}",
            args.name,
            config.sound.directory.display()
        );
    };

    let mut map = TileGrid::new(Vec2i::new(args.tile_size, args.tile_size));
    for [x, y] in &args.walls {
        map.block(Vec2i::new(*x, *y));
    }

    let pos = Vec2i::new(args.at[0], args.at[1]);
    device.set_ears(Vec2i::ZERO);
    let location = locate(device.ears(), pos, &map);
    println!(
        "'{}' at {}: distance {} bearing {}{}",
        args.name,
        pos,
        location.distance + args.plus_distance,
        location.bearing,
        if location.muffled { " (muffled)" } else { "" }
    );

    match device.play_at_plus_distance(Some(&sound), pos, args.plus_distance, &map) {
        PlayOutcome::Played => {
            std::thread::sleep(sound.duration() + Duration::from_millis(100));
        }
        PlayOutcome::Inaudible => println!("Too far away to hear"),
        outcome => println!("Not played: {:?}", outcome),
    }

    device.terminate(true);
    Ok(())
}
