//! `[sound]` configuration section

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Loudest value accepted for `sound_volume`
pub const MAX_VOLUME: u8 = 128;

/// Sound settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Directory whose files are loaded as named sounds
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Effect volume, 0..=128
    #[serde(default = "default_sound_volume")]
    pub sound_volume: u8,
}

fn default_directory() -> PathBuf {
    PathBuf::from("sounds")
}

fn default_sound_volume() -> u8 {
    64
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            sound_volume: default_sound_volume(),
        }
    }
}

impl SoundConfig {
    /// Volume clamped to the valid range
    pub fn volume(&self) -> u8 {
        self.sound_volume.min(MAX_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SoundConfig::default();
        assert_eq!(config.directory, PathBuf::from("sounds"));
        assert_eq!(config.volume(), 64);
    }

    #[test]
    fn test_parse_partial() {
        let config: SoundConfig = toml::from_str("sound_volume = 200").unwrap();
        assert_eq!(config.sound_volume, 200);
        assert_eq!(config.volume(), MAX_VOLUME);
    }
}
