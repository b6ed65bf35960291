//! Runtime configuration sections
//!
//! These deserialize from the `[game_loop]`, `[graphics]` and `[[keyboard]]`
//! tables of the engine config file. Every field has a default.

use crate::keyboard::{InputKeys, MAX_KEYBOARD_CONFIGS};
use serde::{Deserialize, Serialize};

/// Frame loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Poll input on odd frames only
    #[serde(default)]
    pub input_every_second_frame: bool,
}

fn default_fps() -> u32 {
    30
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            input_every_second_frame: false,
        }
    }
}

impl LoopConfig {
    pub fn with_fps(fps: u32) -> Self {
        Self {
            fps,
            ..Self::default()
        }
    }

    /// Milliseconds per frame
    pub fn period_ms(&self) -> u64 {
        1000 / self.fps.max(1) as u64
    }

    /// Longest run of frames that may skip drawing
    pub fn max_frame_skip(&self) -> u32 {
        self.fps / 5
    }
}

/// Display settings the event poll needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// Window pixels per logical pixel
    #[serde(default = "default_scale_factor")]
    pub scale_factor: u32,
    #[serde(default)]
    pub hide_mouse: bool,
}

fn default_scale_factor() -> u32 {
    1
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            scale_factor: default_scale_factor(),
            hide_mouse: false,
        }
    }
}

/// Keyboard bindings per slot, falling back to the defaults for slots the
/// config leaves out. Extra entries are ignored.
pub fn keyboard_bindings(configured: &[InputKeys]) -> [InputKeys; MAX_KEYBOARD_CONFIGS] {
    std::array::from_fn(|slot| {
        configured
            .get(slot)
            .copied()
            .unwrap_or_else(|| InputKeys::default_for_slot(slot))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[derive(Deserialize)]
    struct Sections {
        #[serde(default)]
        game_loop: LoopConfig,
        #[serde(default)]
        graphics: GraphicsConfig,
        #[serde(default)]
        keyboard: Vec<InputKeys>,
    }

    #[test]
    fn test_defaults() {
        let loop_config = LoopConfig::default();
        assert_eq!(loop_config.fps, 30);
        assert_eq!(loop_config.period_ms(), 33);
        assert_eq!(loop_config.max_frame_skip(), 6);
        assert_eq!(GraphicsConfig::default().scale_factor, 1);
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        let config = LoopConfig::with_fps(0);
        assert_eq!(config.period_ms(), 1000);
        assert_eq!(config.max_frame_skip(), 0);
    }

    #[test]
    fn test_parse_sections() {
        let sections: Sections = toml::from_str(
            r#"
[game_loop]
fps = 60
input_every_second_frame = true

[graphics]
scale_factor = 2

[[keyboard]]
left = "KeyJ"
right = "KeyL"
up = "KeyI"
down = "KeyK"
button1 = "KeyU"
button2 = "KeyO"
"#,
        )
        .unwrap();

        assert_eq!(sections.game_loop.fps, 60);
        assert!(sections.game_loop.input_every_second_frame);
        assert_eq!(sections.graphics.scale_factor, 2);
        assert!(!sections.graphics.hide_mouse);

        let bindings = keyboard_bindings(&sections.keyboard);
        assert_eq!(bindings[0].left, KeyCode::KeyJ);
        assert_eq!(bindings[1], InputKeys::default_for_slot(1));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let sections: Sections = toml::from_str("").unwrap();
        assert_eq!(sections.game_loop, LoopConfig::default());
        assert_eq!(sections.graphics, GraphicsConfig::default());
        assert_eq!(
            keyboard_bindings(&sections.keyboard),
            [InputKeys::default_for_slot(0), InputKeys::default_for_slot(1)]
        );
    }
}
