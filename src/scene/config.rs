use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{LightmixError, LightmixResult};
use crate::scene::task::ColorMode;
use std::path::{Path, PathBuf};

/// Generation settings for one dataset.
///
/// Every field has a default, so a JSON config only needs the keys it overrides:
///
/// ```json
/// { "image_size": [256, 256], "light_radius": 40, "generate_videos": false }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Dataset domain tag, used in task ids and output folder names.
    pub domain: String,
    /// Canvas `[width, height]` in pixels.
    pub image_size: [u32; 2],
    /// Outer radius of each light glow.
    pub light_radius: u32,
    /// Side length of the mixing zone square.
    ///
    /// Must fit inside the canvas; it is not checked and oversized zones are clipped.
    pub mixing_zone_size: u32,
    /// Number of nested 1px white outlines drawn around the zone.
    pub mixing_zone_border_width: u32,
    /// Render and encode an MP4 animation for every task.
    pub generate_videos: bool,
    /// Animation frame rate.
    pub video_fps: u32,
    /// How the two light colors are chosen.
    pub color_mode: ColorMode,
    /// Working directory for encoded animations. When unset, the generator uses a scratch
    /// directory that is removed when the generator is dropped.
    pub video_dir: Option<PathBuf>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            domain: "color_mixing_additive".to_string(),
            image_size: [512, 512],
            light_radius: 80,
            mixing_zone_size: 100,
            mixing_zone_border_width: 3,
            generate_videos: true,
            video_fps: 10,
            color_mode: ColorMode::Random,
            video_dir: None,
        }
    }
}

impl TaskConfig {
    /// Parse a JSON config.
    pub fn from_json_str(s: &str) -> LightmixResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_path(path: &Path) -> LightmixResult<Self> {
        use anyhow::Context as _;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            LightmixError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings nothing can be rendered or encoded with. Geometry that merely overflows
    /// the canvas is accepted.
    pub fn validate(&self) -> LightmixResult<()> {
        if self.image_size[0] == 0 || self.image_size[1] == 0 {
            return Err(LightmixError::validation(
                "image_size width/height must be non-zero",
            ));
        }
        if self.video_fps == 0 {
            return Err(LightmixError::validation("video_fps must be > 0"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.image_size[0],
            height: self.image_size[1],
        }
    }

    pub fn fps(&self) -> LightmixResult<Fps> {
        Fps::new(self.video_fps, 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
