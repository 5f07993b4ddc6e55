//! Track data structure for managing clips on video/audio tracks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{EditorError, Result};
use crate::core::id::{ClipId, TrackId};
use crate::core::time::{Units, ZERO};
use crate::media::kind::MediaKind;
use crate::timeline::clip::Clip;

/// Type of track (video or audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    /// Whether media of `kind` may be placed on a track of this kind.
    /// Video tracks take video and images; audio tracks take audio only.
    pub fn accepts(&self, kind: MediaKind) -> bool {
        matches!(
            (self, kind),
            (TrackKind::Video, MediaKind::Video)
                | (TrackKind::Video, MediaKind::Image)
                | (TrackKind::Audio, MediaKind::Audio)
        )
    }

    /// Capitalised label used for default track names
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Audio => "Audio",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Video => f.write_str("video"),
            TrackKind::Audio => f.write_str("audio"),
        }
    }
}

/// A track holds clips of one kind.
///
/// Clips are kept sorted by `start`; clips with equal starts keep their
/// insertion order. Overlap is allowed and only reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub kind: TrackKind,
    pub muted: bool,
    visible: bool,
    pub clips: Vec<Clip>, // Sorted by start
}

impl Track {
    pub fn new(id: TrackId, kind: TrackKind, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            muted: false,
            visible: true,
            clips: Vec::new(),
        }
    }

    /// Add a clip after checking that its media kind suits this track.
    ///
    /// Clips without a media kind are always accepted.
    pub fn add_clip(&mut self, clip: Clip) -> Result<()> {
        if let Some(media) = clip.media_kind {
            if !self.kind.accepts(media) {
                return Err(EditorError::IncompatibleKind {
                    track: self.kind,
                    media,
                });
            }
        }

        let overlapping = self.overlapping(&clip);
        if !overlapping.is_empty() {
            log::debug!(
                "Clip {} on track {} overlaps clips {:?}",
                clip.id,
                self.id,
                overlapping
            );
        }

        let pos = self.clips.partition_point(|c| c.start <= clip.start);
        self.clips.insert(pos, clip);
        Ok(())
    }

    /// Ids of existing clips that overlap `clip`
    pub fn overlapping(&self, clip: &Clip) -> Vec<ClipId> {
        self.clips
            .iter()
            .filter(|existing| existing.id != clip.id && existing.overlaps_with(clip))
            .map(|existing| existing.id)
            .collect()
    }

    /// Remove a clip by ID.
    pub fn remove_clip(&mut self, clip_id: ClipId) -> Option<Clip> {
        let pos = self.clips.iter().position(|c| c.id == clip_id)?;
        Some(self.clips.remove(pos))
    }

    pub fn clip(&self, clip_id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Find the first clip containing a timeline position
    pub fn clip_at(&self, position: Units) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.contains(position))
    }

    /// Clips that intersect `[start, end]`
    pub fn clips_in_range(&self, start: Units, end: Units) -> Vec<&Clip> {
        self.clips
            .iter()
            .filter(|clip| clip.start <= end && clip.end() >= start)
            .collect()
    }

    /// End of the last clip, or 0 if the track is empty
    pub fn duration(&self) -> Units {
        self.clips.iter().map(Clip::end).fold(ZERO, Units::max)
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Set visibility. Only video tracks can be hidden; audio tracks stay visible.
    pub fn set_visible(&mut self, visible: bool) {
        match self.kind {
            TrackKind::Video => self.visible = visible,
            TrackKind::Audio => log::debug!("Ignoring visibility change on audio track {}", self.id),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::MediaId;
    use crate::timeline::clip::ClipSource;

    fn media_clip(id: ClipId, kind: MediaKind, start: Units) -> Clip {
        let source = ClipSource {
            media_id: Some(MediaId::from("m")),
            kind,
            title: "m".into(),
            duration: 10.0,
        };
        Clip::from_source(id, &source, start)
    }

    #[test]
    fn test_track_creation() {
        let track = Track::new(1, TrackKind::Video, "Video 1");
        assert_eq!(track.clips.len(), 0);
        assert!(!track.muted);
        assert!(track.is_visible());
        assert_eq!(track.duration(), 0.0);
    }

    #[test]
    fn test_accepts() {
        assert!(TrackKind::Video.accepts(MediaKind::Video));
        assert!(TrackKind::Video.accepts(MediaKind::Image));
        assert!(!TrackKind::Video.accepts(MediaKind::Audio));
        assert!(TrackKind::Audio.accepts(MediaKind::Audio));
        assert!(!TrackKind::Audio.accepts(MediaKind::Video));
        assert!(!TrackKind::Audio.accepts(MediaKind::Image));
    }

    #[test]
    fn test_add_clip_rejects_incompatible_kind() {
        let mut track = Track::new(1, TrackKind::Audio, "Audio 1");
        let result = track.add_clip(media_clip(1, MediaKind::Video, 0.0));

        assert_eq!(
            result,
            Err(EditorError::IncompatibleKind {
                track: TrackKind::Audio,
                media: MediaKind::Video,
            })
        );
        assert!(track.clips.is_empty());
    }

    #[test]
    fn test_overlap_is_allowed() {
        let mut track = Track::new(1, TrackKind::Video, "Video 1");
        track.add_clip(media_clip(1, MediaKind::Video, 0.0)).unwrap();

        let second = media_clip(2, MediaKind::Image, 5.0);
        assert_eq!(track.overlapping(&second), vec![1]);
        assert!(track.add_clip(second).is_ok());
        assert_eq!(track.clips.len(), 2);
    }

    #[test]
    fn test_sorted_order() {
        let mut track = Track::new(1, TrackKind::Video, "Video 1");

        track.add_clip(Clip::new(1, "a", 20.0, 5.0)).unwrap();
        track.add_clip(Clip::new(2, "b", 0.0, 5.0)).unwrap();
        track.add_clip(Clip::new(3, "c", 10.0, 5.0)).unwrap();
        track.add_clip(Clip::new(4, "d", 0.0, 5.0)).unwrap();

        let ids: Vec<_> = track.clips.iter().map(|c| c.id).collect();
        // Equal starts keep insertion order
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_clip_at_and_range() {
        let mut track = Track::new(1, TrackKind::Video, "Video 1");
        track.add_clip(Clip::new(1, "a", 0.0, 5.0)).unwrap();
        track.add_clip(Clip::new(2, "b", 10.0, 5.0)).unwrap();
        track.add_clip(Clip::new(3, "c", 20.0, 5.0)).unwrap();

        assert_eq!(track.clip_at(12.0).map(|c| c.id), Some(2));
        assert!(track.clip_at(7.0).is_none());

        let clips = track.clips_in_range(2.0, 12.0);
        assert_eq!(clips.len(), 2);
        assert!(clips.iter().any(|c| c.id == 1));
        assert!(clips.iter().any(|c| c.id == 2));
    }

    #[test]
    fn test_duration_and_remove() {
        let mut track = Track::new(1, TrackKind::Audio, "Audio 1");
        track.add_clip(Clip::new(1, "a", 0.0, 20.0)).unwrap();
        track.add_clip(Clip::new(2, "b", 5.0, 3.0)).unwrap();
        assert_eq!(track.duration(), 20.0);

        assert!(track.remove_clip(1).is_some());
        assert_eq!(track.duration(), 8.0);
        assert!(track.remove_clip(1).is_none());
    }

    #[test]
    fn test_visibility_only_for_video() {
        let mut video = Track::new(1, TrackKind::Video, "Video 1");
        video.set_visible(false);
        assert!(!video.is_visible());

        let mut audio = Track::new(2, TrackKind::Audio, "Audio 1");
        audio.set_visible(false);
        assert!(audio.is_visible());
    }
}
