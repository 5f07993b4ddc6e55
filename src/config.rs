//! Editor configuration.
//!
//! Every field has a default matching the stock editor, so an empty TOML
//! document (or no file at all) yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::time::Units;
use crate::media::kind::MediaKind;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Upload size ceilings per media kind, in bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeLimits {
    pub video: u64,
    pub image: u64,
    pub audio: u64,
}

impl SizeLimits {
    pub fn ceiling(&self, kind: MediaKind) -> u64 {
        match kind {
            MediaKind::Video => self.video,
            MediaKind::Image => self.image,
            MediaKind::Audio => self.audio,
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            video: 5 * 1024 * 1024,
            image: 1024 * 1024,
            audio: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 4.0,
            step: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Period of the playback tick
    pub tick_interval_ms: u64,
    /// Playhead advance per tick when no media clock is attached
    pub tick_increment: Units,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            tick_increment: 1.0,
        }
    }
}

/// Clip lengths used when a drag payload does not carry one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipDefaults {
    /// Used when a payload has no duration at all
    pub fallback: Units,
    pub video: Units,
    pub image: Units,
    pub audio: Units,
}

impl ClipDefaults {
    pub fn for_kind(&self, kind: MediaKind) -> Units {
        match kind {
            MediaKind::Video => self.video,
            MediaKind::Image => self.image,
            MediaKind::Audio => self.audio,
        }
    }
}

impl Default for ClipDefaults {
    fn default() -> Self {
        Self {
            fallback: 120.0,
            video: 120.0,
            image: 60.0,
            audio: 180.0,
        }
    }
}

/// Where `place_clip` puts a clip when no start offset is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Track origin; may overlap existing clips
    #[default]
    Origin,
    /// Current playhead position
    Playhead,
    /// Right after the last clip on the track
    AfterLast,
}

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub limits: SizeLimits,
    pub zoom: ZoomConfig,
    pub playback: PlaybackConfig,
    pub clip_defaults: ClipDefaults,
    pub placement: PlacementPolicy,
    /// Total bytes the content store may hold at once
    pub content_pool_bytes: u64,
}

impl EditorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded editor config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let zoom = &self.zoom;
        if !(zoom.min.is_finite() && zoom.max.is_finite()) || zoom.min <= 0.0 || zoom.min > zoom.max {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds [{}, {}] must be positive and ordered",
                zoom.min, zoom.max
            )));
        }
        if !zoom.step.is_finite() || zoom.step <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "zoom step {} must be greater than 1",
                zoom.step
            )));
        }
        if self.playback.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick interval must be non-zero".into()));
        }
        let increment = self.playback.tick_increment;
        if !increment.is_finite() || increment < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tick increment {} must be finite and not negative",
                increment
            )));
        }

        let defaults = &self.clip_defaults;
        for (name, length) in [
            ("fallback", defaults.fallback),
            ("video", defaults.video),
            ("image", defaults.image),
            ("audio", defaults.audio),
        ] {
            if !length.is_finite() || length <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} clip length {} must be positive",
                    name, length
                )));
            }
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            limits: SizeLimits::default(),
            zoom: ZoomConfig::default(),
            playback: PlaybackConfig::default(),
            clip_defaults: ClipDefaults::default(),
            placement: PlacementPolicy::default(),
            content_pool_bytes: 256 * 1024 * 1024,
        }
    }
}
