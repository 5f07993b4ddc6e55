//! Identifier types shared across the editor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a track
pub type TrackId = u64;

/// Unique identifier for a clip
pub type ClipId = u64;

/// Identifier of a media item.
///
/// Uploaded media get a UUID; online library items use `online-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MediaId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic id source. Ids start at 1 and are never handed out twice.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = IdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn test_generated_media_ids_differ() {
        assert_ne!(MediaId::generate(), MediaId::generate());
    }

    #[test]
    fn test_media_id_serializes_as_string() {
        let id = MediaId::from("online-3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"online-3\"");
    }
}
