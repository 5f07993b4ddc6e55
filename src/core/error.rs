//! Error taxonomy for editor operations.

use crate::core::id::TrackId;
use crate::core::time::to_megabytes;
use crate::media::kind::MediaKind;
use crate::timeline::track::TrackKind;

/// Error type for editor operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    /// MIME type does not start with video/, image/ or audio/
    #[error("Unsupported file type: {mime}")]
    UnsupportedType { mime: String },
    /// Upload is larger than the ceiling for its kind (sizes in bytes)
    #[error(
        "{} files must be smaller than {}MB. Your file is {:.1}MB",
        .kind,
        megabytes(.ceiling),
        megabytes(.actual)
    )]
    SizeExceeded {
        kind: MediaKind,
        ceiling: u64,
        actual: u64,
    },
    /// Media kind cannot be placed on the track kind
    #[error("{track} tracks do not accept {media} media")]
    IncompatibleKind { track: TrackKind, media: MediaKind },
    #[error("Track {0} not found")]
    TrackNotFound(TrackId),
    /// Content handle allocation failed
    #[error("Failed to process file: {0}")]
    Ingestion(String),
    /// Content was read after its handle had been revoked
    #[error("Content {0} has been revoked")]
    ContentRevoked(String),
    #[error("Invalid export settings: {0}")]
    InvalidExportSettings(String),
}

fn megabytes(bytes: &u64) -> f64 {
    to_megabytes(*bytes)
}

/// Result alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
