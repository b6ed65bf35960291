//! Layered configuration
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. Environment variables: `GRIT_SOUND_DIR`, `GRIT_FPS`
//! 2. Explicit file: `--config <path>`
//! 3. Project-local: `./grit.toml`
//! 4. Global: `~/.grit/config.toml`
//!
//! Layers are merged table by table, so a later file only needs the keys it
//! changes. Arrays such as `[[keyboard]]` are replaced as a whole.

use grit_audio::SoundConfig;
use grit_core::{GritError, Result};
use grit_runtime::{keyboard_bindings, GraphicsConfig, InputKeys, LoopConfig, MAX_KEYBOARD_CONFIGS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GritConfig {
    #[serde(default)]
    pub game_loop: LoopConfig,
    #[serde(default)]
    pub graphics: GraphicsConfig,
    #[serde(default)]
    pub keyboard: Vec<InputKeys>,
    #[serde(default)]
    pub sound: SoundConfig,
}

impl GritConfig {
    /// Load config with layered precedence: global < project < explicit < env vars
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                merge_tables(&mut merged, Self::load_table(&global_path)?);
            }
        }

        let local_path = PathBuf::from("grit.toml");
        if local_path.exists() {
            merge_tables(&mut merged, Self::load_table(&local_path)?);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(GritError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            merge_tables(&mut merged, Self::load_table(path)?);
        }

        let mut config: GritConfig = toml::Value::Table(merged).try_into()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config: GritConfig = toml::Value::Table(Self::load_table(path)?).try_into()?;
        Ok(config)
    }

    /// Keyboard bindings for every slot
    pub fn key_bindings(&self) -> [InputKeys; MAX_KEYBOARD_CONFIGS] {
        keyboard_bindings(&self.keyboard)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".grit").join("config.toml"))
    }

    fn load_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        content.parse::<toml::Table>().map_err(|e| {
            GritError::TomlParseError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("GRIT_SOUND_DIR") {
            self.sound.directory = PathBuf::from(dir);
        }
        if let Ok(fps) = std::env::var("GRIT_FPS") {
            match fps.parse() {
                Ok(fps) => self.game_loop.fps = fps,
                Err(_) => log::warn!("Ignoring GRIT_FPS={fps}: not a number"),
            }
        }
    }
}

/// Merge `overlay` into `base`, recursing into tables present in both
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use winit::keyboard::KeyCode;

    fn temp_config(tag: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "grit_config_test_{}_{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_config(
            "full",
            r#"
[game_loop]
fps = 60

[graphics]
scale_factor = 3

[sound]
directory = "assets/sounds"
sound_volume = 96

[[keyboard]]
left = "KeyJ"
right = "KeyL"
up = "KeyI"
down = "KeyK"
button1 = "KeyU"
button2 = "KeyO"
"#,
        );
        let config = GritConfig::load_from_file(&path).unwrap();

        assert_eq!(config.game_loop.fps, 60);
        assert!(!config.game_loop.input_every_second_frame);
        assert_eq!(config.graphics.scale_factor, 3);
        assert_eq!(config.sound.directory, PathBuf::from("assets/sounds"));
        assert_eq!(config.sound.sound_volume, 96);

        let keys = config.key_bindings();
        assert_eq!(keys[0].up, KeyCode::KeyI);
        assert_eq!(keys[1], InputKeys::default_for_slot(1));

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let path = temp_config("bad", "[game_loop\nfps = ");
        let err = GritConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, GritError::TomlParseError(_)));

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_explicit_file() {
        let missing = std::env::temp_dir().join("grit_config_definitely_missing.toml");
        let err = GritConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, GritError::ConfigError(_)));
    }

    #[test]
    fn test_merge_overlays_nested_keys() {
        let mut base: toml::Table = r#"
[game_loop]
fps = 40
input_every_second_frame = true

[sound]
sound_volume = 10
"#
        .parse()
        .unwrap();
        let overlay: toml::Table = r#"
[game_loop]
fps = 25
"#
        .parse()
        .unwrap();
        merge_tables(&mut base, overlay);

        let config: GritConfig = toml::Value::Table(base).try_into().unwrap();
        assert_eq!(config.game_loop.fps, 25);
        assert!(config.game_loop.input_every_second_frame);
        assert_eq!(config.sound.sound_volume, 10);
    }
}
