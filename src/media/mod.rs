//! Media ingestion and catalogues.

pub mod content;
pub mod kind;
pub mod library;
pub mod payload;
pub mod registry;

pub use content::{ContentHandle, ContentStore};
pub use kind::MediaKind;
pub use library::{Category, LibraryItem, MediaLibrary};
pub use payload::{DragPayload, PayloadError};
pub use registry::{MediaEntry, MediaRegistry, Thumbnail};
