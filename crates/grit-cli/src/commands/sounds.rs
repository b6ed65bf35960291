//! Sounds command: lists a sound directory the way the engine loads it

use anyhow::{Context, Result};
use grit_audio::SoundTable;
use std::path::Path;

/// Names the engine looks up for built-in effects
const RESERVED: [&str; 8] = [
    "footstep", "slide", "switch", "pickup", "health", "click", "key", "bang",
];

pub fn run(dir: &Path) -> Result<()> {
    let mut table = SoundTable::new();
    let count = table
        .load_directory(dir)
        .with_context(|| format!("Cannot open sound dir '{}'", dir.display()))?;

    println!("{} sounds in {}", count, dir.display());
    for name in table.names() {
        if let Some(sound) = table.get(name) {
            println!("  {:<20} {:>6} ms", name, sound.duration().as_millis());
        }
    }

    println!();
    for name in RESERVED {
        let mark = if table.contains(name) { "ok" } else { "missing" };
        println!("  {:<10} {}", name, mark);
    }
    let screams = (0..)
        .take_while(|i| table.contains(&format!("aargh{i}")))
        .count();
    println!("  {} scream variants", screams);

    Ok(())
}
