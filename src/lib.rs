//! Headless core of a browser-style video editor: media ingestion, a
//! multi-track timeline, playback signalling and a simulated export.

pub mod config;
pub mod core;
pub mod editor;
pub mod export;
pub mod media;
pub mod playback;
pub mod preview;
pub mod timeline;

pub use config::{ConfigError, EditorConfig};
pub use crate::core::{EditorError, Result};
pub use editor::EditorSession;
