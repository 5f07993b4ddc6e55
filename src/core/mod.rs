//! Core types for the editor.
//!
//! Timeline units, identifiers and the error taxonomy shared by the media
//! registry, the timeline model and the playback components.

pub mod error;
pub mod id;
pub mod time;

// Re-export core data structures for easier access.
pub use error::{EditorError, Result};
pub use id::{ClipId, IdAllocator, MediaId, TrackId};
pub use time::{Units, ZERO};
