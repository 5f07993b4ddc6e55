//! Timeline data structure managing an ordered set of tracks.

use crate::config::{ClipDefaults, EditorConfig, PlacementPolicy};
use crate::core::error::{EditorError, Result};
use crate::core::id::{ClipId, IdAllocator, TrackId};
use crate::core::time::{Units, ZERO};
use crate::media::payload::DragPayload;
use crate::timeline::clip::{Clip, ClipSource};
use crate::timeline::edit::EditActions;
use crate::timeline::track::{Track, TrackKind};
use crate::timeline::zoom::{RulerMarker, Zoom};

/// Main timeline structure.
///
/// Tracks are kept in display order. The playhead is a single position
/// shared by every track; it is never negative but may run past the last clip.
#[derive(Debug, Clone)]
pub struct Timeline {
    tracks: Vec<Track>,
    pub playhead: Units,
    zoom: Zoom,
    track_ids: IdAllocator,
    clip_ids: IdAllocator,
    placement: PlacementPolicy,
    clip_defaults: ClipDefaults,
    edits: EditActions,
}

impl Timeline {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            tracks: Vec::new(),
            playhead: ZERO,
            zoom: Zoom::new(&config.zoom),
            track_ids: IdAllocator::new(),
            clip_ids: IdAllocator::new(),
            placement: config.placement,
            clip_defaults: config.clip_defaults.clone(),
            edits: EditActions::new(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    /// Append an empty track named "<Kind> <n>", n counting tracks of that kind
    pub fn add_track(&mut self, kind: TrackKind) -> &Track {
        let ordinal = self.tracks.iter().filter(|t| t.kind == kind).count() + 1;
        let name = format!("{} {}", kind.label(), ordinal);
        let track = Track::new(self.track_ids.next_id(), kind, &name);

        log::debug!("Added track {} ({})", track.id, track.name);
        self.tracks.push(track);
        &self.tracks[self.tracks.len() - 1]
    }

    /// Delete a track together with its clips
    pub fn remove_track(&mut self, id: TrackId) -> Option<Track> {
        let pos = self.tracks.iter().position(|t| t.id == id)?;
        let track = self.tracks.remove(pos);
        log::debug!("Removed track {} with {} clips", track.id, track.clips.len());
        Some(track)
    }

    /// Move `dragged` to the index currently held by `target`.
    ///
    /// No-op when the ids are equal or either track is missing.
    pub fn reorder_track(&mut self, dragged: TrackId, target: TrackId) -> bool {
        if dragged == target {
            return false;
        }
        let Some(from) = self.tracks.iter().position(|t| t.id == dragged) else {
            return false;
        };
        let Some(to) = self.tracks.iter().position(|t| t.id == target) else {
            return false;
        };

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        true
    }

    /// Rename a track. Blank names are rejected and the old name is kept.
    pub fn rename_track(&mut self, id: TrackId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.track_mut(id) {
            Some(track) => {
                track.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_muted(&mut self, id: TrackId, muted: bool) -> bool {
        self.track_mut(id).map(|t| t.set_muted(muted)).is_some()
    }

    pub fn toggle_muted(&mut self, id: TrackId) -> bool {
        self.track_mut(id).map(|t| t.set_muted(!t.muted)).is_some()
    }

    pub fn set_visible(&mut self, id: TrackId, visible: bool) -> bool {
        self.track_mut(id).map(|t| t.set_visible(visible)).is_some()
    }

    pub fn toggle_visible(&mut self, id: TrackId) -> bool {
        self.track_mut(id)
            .map(|t| {
                let visible = !t.is_visible();
                t.set_visible(visible)
            })
            .is_some()
    }

    /// Place a clip for `source` on a track.
    ///
    /// Kind compatibility is checked before anything changes. Without an
    /// explicit `start` the placement policy decides (track origin by default).
    pub fn place_clip(
        &mut self,
        track_id: TrackId,
        source: &ClipSource,
        start: Option<Units>,
    ) -> Result<Clip> {
        let playhead = self.playhead;
        let placement = self.placement;

        let track = self
            .tracks
            .iter()
            .find(|t| t.id == track_id)
            .ok_or(EditorError::TrackNotFound(track_id))?;
        if !track.kind.accepts(source.kind) {
            return Err(EditorError::IncompatibleKind {
                track: track.kind,
                media: source.kind,
            });
        }

        let start = start.unwrap_or(match placement {
            PlacementPolicy::Origin => ZERO,
            PlacementPolicy::Playhead => playhead,
            PlacementPolicy::AfterLast => track.duration(),
        });

        let clip = Clip::from_source(self.clip_ids.next_id(), source, start);
        let track = self
            .track_mut(track_id)
            .ok_or(EditorError::TrackNotFound(track_id))?;
        track.add_clip(clip.clone())?;

        log::info!("Placed {:?} on track {} at {}", clip.name, track_id, clip.start);
        Ok(clip)
    }

    /// Handle a media drop on a track.
    ///
    /// Drops are best effort: malformed or incompatible payloads are logged
    /// and ignored.
    pub fn drop_media(&mut self, track_id: TrackId, json: &str) -> Option<Clip> {
        let payload = match DragPayload::parse(json) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Ignoring drop on track {}: {}", track_id, e);
                return None;
            }
        };

        let source = ClipSource::from_payload(&payload, self.clip_defaults.fallback);
        match self.place_clip(track_id, &source, None) {
            Ok(clip) => Some(clip),
            Err(e) => {
                log::warn!("Ignoring drop of {:?}: {}", payload.title, e);
                None
            }
        }
    }

    /// Remove a clip from whichever track holds it
    pub fn remove_clip(&mut self, clip_id: ClipId) -> Option<Clip> {
        self.tracks.iter_mut().find_map(|t| t.remove_clip(clip_id))
    }

    /// Find a clip and its owning track
    pub fn find_clip(&self, clip_id: ClipId) -> Option<(&Track, &Clip)> {
        self.tracks
            .iter()
            .find_map(|t| t.clip(clip_id).map(|c| (t, c)))
    }

    /// All clips, across tracks, that contain `position`
    pub fn clips_at(&self, position: Units) -> Vec<&Clip> {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter().filter(move |c| c.contains(position)))
            .collect()
    }

    /// End of the last clip on any track
    pub fn duration(&self) -> Units {
        self.tracks.iter().map(Track::duration).fold(ZERO, Units::max)
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    pub fn ruler(&self) -> Vec<RulerMarker> {
        self.zoom.ruler()
    }

    /// Set the playhead position (clamped at 0)
    pub fn seek_to(&mut self, position: Units) {
        self.playhead = position.max(ZERO);
    }

    /// Seek from a click offset on the ruler, in pixels
    pub fn seek_to_pixel(&mut self, x: f64) {
        let position = self.zoom.to_units(x);
        self.seek_to(position);
    }

    pub fn edits(&self) -> &EditActions {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut EditActions {
        &mut self.edits
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
