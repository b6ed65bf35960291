//! Named sound chunks and the tables that hold them

use crate::muffle::muffle;
use grit_core::Result;
use kira::sound::static_sound::{StaticSoundData, StaticSoundSettings};
use kira::Frame;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// A decoded sound with the name it is looked up by
#[derive(Debug, Clone)]
pub struct SoundChunk {
    name: String,
    data: StaticSoundData,
    /// Filtered copy of `data`, made on first muffled play
    muffled: OnceLock<StaticSoundData>,
}

/// Shared handle to a loaded sound
pub type Sound = Arc<SoundChunk>;

impl SoundChunk {
    pub fn new(name: impl Into<String>, data: StaticSoundData) -> Self {
        Self {
            name: name.into(),
            data,
            muffled: OnceLock::new(),
        }
    }

    /// Build a chunk from raw stereo frames
    pub fn from_frames(name: impl Into<String>, sample_rate: u32, frames: Vec<Frame>) -> Self {
        Self::new(
            name,
            StaticSoundData {
                sample_rate,
                frames: frames.into(),
                settings: StaticSoundSettings::default(),
                slice: None,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &StaticSoundData {
        &self.data
    }

    /// The muffled version of this chunk's audio
    pub fn muffled_data(&self) -> &StaticSoundData {
        self.muffled.get_or_init(|| muffle(&self.data))
    }

    pub fn duration(&self) -> Duration {
        self.data.duration()
    }
}

/// Name-indexed sound table
#[derive(Debug, Default)]
pub struct SoundTable {
    sounds: HashMap<String, Sound>,
}

impl SoundTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sound under its own name. The first sound added under a name wins.
    pub fn add(&mut self, sound: Sound) {
        self.sounds
            .entry(sound.name().to_string())
            .or_insert(sound);
    }

    pub fn get(&self, name: &str) -> Option<&Sound> {
        self.sounds.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn clear(&mut self) {
        self.sounds.clear();
    }

    /// Sorted sound names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sounds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load every regular file in `dir`, keyed by file name without extension.
    ///
    /// Files that fail to decode are skipped with a warning. Returns the
    /// number of sounds added. Fails only if the directory cannot be read.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match StaticSoundData::from_file(&path) {
                Ok(data) => {
                    log::debug!("Loaded sound '{}' from {}", name, path.display());
                    self.add(Arc::new(SoundChunk::new(name, data)));
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping sound {}: {}", path.display(), e),
            }
        }
        Ok(loaded)
    }
}
