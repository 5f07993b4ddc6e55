//! Export settings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{EditorError, Result};

pub const MIN_QUALITY: u8 = 10;
pub const MAX_QUALITY: u8 = 100;
const FRAMERATES: [u32; 3] = [24, 30, 60];

/// Output container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Mp4,
    Mov,
    Avi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    H264,
    H265,
    Vp9,
}

/// Output frame size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "3840x2160")]
    Uhd,
    #[default]
    #[serde(rename = "1920x1080")]
    FullHd,
    #[serde(rename = "1280x720")]
    Hd,
    #[serde(rename = "854x480")]
    Sd,
}

impl Resolution {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Resolution::Uhd => (3840, 2160),
            Resolution::FullHd => (1920, 1080),
            Resolution::Hd => (1280, 720),
            Resolution::Sd => (854, 480),
        }
    }

    /// Menu label, e.g. "1080p (1920x1080)"
    pub fn label(&self) -> String {
        let (width, height) = self.dimensions();
        let name = match self {
            Resolution::Uhd => "4K",
            Resolution::FullHd => "1080p",
            Resolution::Hd => "720p",
            Resolution::Sd => "480p",
        };
        format!("{} ({}x{})", name, width, height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "{}x{}", width, height)
    }
}

/// Export settings as chosen in the export dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub filename: String,
    pub format: Format,
    pub codec: Codec,
    pub resolution: Resolution,
    pub framerate: u32,
    /// Percentage in `[10, 100]`
    pub quality: u8,
}

impl ExportSettings {
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(EditorError::InvalidExportSettings(
                "filename must not be empty".to_string(),
            ));
        }
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(EditorError::InvalidExportSettings(format!(
                "quality must be between {} and {}, got {}",
                MIN_QUALITY, MAX_QUALITY, self.quality
            )));
        }
        if !FRAMERATES.contains(&self.framerate) {
            return Err(EditorError::InvalidExportSettings(format!(
                "unsupported framerate {}",
                self.framerate
            )));
        }
        Ok(())
    }

    /// Output file name with the container extension, e.g. "my-video.mp4"
    pub fn output_name(&self) -> String {
        let extension = match self.format {
            Format::Mp4 => "mp4",
            Format::Mov => "mov",
            Format::Avi => "avi",
        };
        format!("{}.{}", self.filename.trim(), extension)
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            filename: "my-video".to_string(),
            format: Format::Mp4,
            codec: Codec::H264,
            resolution: Resolution::FullHd,
            framerate: 30,
            quality: 75,
        }
    }
}
