//! Clip data structure representing a placed media reference on a track.

use crate::config::ClipDefaults;
use crate::core::id::{ClipId, MediaId};
use crate::core::time::{Units, ZERO};
use crate::media::kind::MediaKind;
use crate::media::payload::DragPayload;
use crate::media::registry::MediaEntry;

/// What a clip is made from: a registry entry or a drag payload
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSource {
    pub media_id: Option<MediaId>,
    pub kind: MediaKind,
    pub title: String,
    pub duration: Units,
}

impl ClipSource {
    /// Source for an uploaded entry, using the per-kind default length
    pub fn from_entry(entry: &MediaEntry, defaults: &ClipDefaults) -> Self {
        Self {
            media_id: Some(entry.id.clone()),
            kind: entry.kind,
            title: entry.title.clone(),
            duration: defaults.for_kind(entry.kind),
        }
    }

    /// Source for a dropped payload. Payloads without a usable duration get `fallback`.
    pub fn from_payload(payload: &DragPayload, fallback: Units) -> Self {
        Self {
            media_id: Some(payload.media_id.clone()),
            kind: payload.media_type,
            title: payload.title.clone(),
            duration: payload.clip_duration(fallback),
        }
    }
}

/// A clip occupies `[start, start + duration)` on its track.
///
/// The clip only references its media; the registry owns the content.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub id: ClipId,
    pub name: String,
    pub start: Units,
    pub duration: Units,
    pub media_id: Option<MediaId>,
    pub media_kind: Option<MediaKind>,
}

impl Clip {
    /// Create a clip without a media reference.
    /// Negative start or duration is clamped to zero.
    pub fn new(id: ClipId, name: &str, start: Units, duration: Units) -> Self {
        Self {
            id,
            name: name.to_string(),
            start: start.max(ZERO),
            duration: duration.max(ZERO),
            media_id: None,
            media_kind: None,
        }
    }

    /// Create a clip from a media source
    pub fn from_source(id: ClipId, source: &ClipSource, start: Units) -> Self {
        Self {
            media_id: source.media_id.clone(),
            media_kind: Some(source.kind),
            ..Self::new(id, &source.title, start, source.duration)
        }
    }

    /// End position on the timeline (exclusive)
    pub fn end(&self) -> Units {
        self.start + self.duration
    }

    /// Check if a timeline position falls within this clip
    pub fn contains(&self, position: Units) -> bool {
        position >= self.start && position < self.end()
    }

    /// Check if this clip overlaps with another clip.
    /// Clips that only touch at a boundary do not overlap.
    pub fn overlaps_with(&self, other: &Clip) -> bool {
        !(self.end() <= other.start || other.end() <= self.start)
    }

    /// Move the clip, keeping its duration
    pub fn move_to(&mut self, start: Units) {
        self.start = start.max(ZERO);
    }

    /// Left edge in pixels at the given zoom factor
    pub fn scaled_left(&self, zoom: f64) -> f64 {
        self.start * zoom
    }

    /// Width in pixels at the given zoom factor
    pub fn scaled_width(&self, zoom: f64) -> f64 {
        self.duration * zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_creation() {
        let clip = Clip::new(1, "intro", 10.0, 120.0);
        assert_eq!(clip.end(), 130.0);
        assert_eq!(clip.media_id, None);
        assert_eq!(clip.media_kind, None);
    }

    #[test]
    fn test_negative_values_clamped() {
        let clip = Clip::new(1, "c", -5.0, -1.0);
        assert_eq!(clip.start, 0.0);
        assert_eq!(clip.duration, 0.0);
    }

    #[test]
    fn test_clip_contains() {
        let clip = Clip::new(1, "c", 10.0, 20.0);
        assert!(clip.contains(10.0));
        assert!(clip.contains(29.9));
        assert!(!clip.contains(30.0));
        assert!(!clip.contains(9.9));
    }

    #[test]
    fn test_overlaps_with() {
        let clip1 = Clip::new(1, "a", 0.0, 10.0);
        let clip2 = Clip::new(2, "b", 5.0, 10.0);
        let clip3 = Clip::new(3, "c", 10.0, 10.0);

        assert!(clip1.overlaps_with(&clip2));
        assert!(clip2.overlaps_with(&clip1));
        // Adjacent clips touch but do not overlap
        assert!(!clip1.overlaps_with(&clip3));
        assert!(!clip3.overlaps_with(&clip1));
    }

    #[test]
    fn test_move_to() {
        let mut clip = Clip::new(1, "c", 0.0, 10.0);
        clip.move_to(100.0);
        assert_eq!(clip.start, 100.0);
        assert_eq!(clip.end(), 110.0);

        clip.move_to(-3.0);
        assert_eq!(clip.start, 0.0);
    }

    #[test]
    fn test_scaled_geometry() {
        let clip = Clip::new(1, "c", 40.0, 120.0);
        assert_eq!(clip.scaled_left(1.5), 60.0);
        assert_eq!(clip.scaled_width(0.5), 60.0);
    }

    #[test]
    fn test_from_payload() {
        let payload = DragPayload::media(MediaId::from("m1"), MediaKind::Image, "still.png", 60.0);
        let source = ClipSource::from_payload(&payload, 120.0);
        let clip = Clip::from_source(7, &source, 0.0);

        assert_eq!(clip.id, 7);
        assert_eq!(clip.name, "still.png");
        assert_eq!(clip.duration, 60.0);
        assert_eq!(clip.media_id, Some(MediaId::from("m1")));
        assert_eq!(clip.media_kind, Some(MediaKind::Image));
    }
}
