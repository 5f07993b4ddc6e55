//! Preview state: the media currently shown and its simulated element.

use crossbeam::channel::Receiver;

use crate::core::id::MediaId;
use crate::core::time::Units;
use crate::media::kind::MediaKind;
use crate::media::registry::{MediaEntry, MediaRegistry};
use crate::playback::bus::{BusEvent, Origin, SignalBus};

/// Media selected for preview
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMedia {
    pub id: MediaId,
    pub kind: MediaKind,
}

/// Subscriber that loads selected media and mirrors timeline playback.
///
/// Images have no element to play; the playing flag still follows the
/// controls so the toolbar stays consistent.
pub struct Preview {
    bus: SignalBus,
    events: Receiver<BusEvent>,
    current: Option<LoadedMedia>,
    is_playing: bool,
    muted: bool,
    timeline_playing: bool,
}

impl Preview {
    pub fn new(bus: SignalBus) -> Self {
        let events = bus.subscribe();
        Self {
            bus,
            events,
            current: None,
            is_playing: false,
            muted: false,
            timeline_playing: false,
        }
    }

    pub fn current(&self) -> Option<&LoadedMedia> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Last play state announced by the timeline
    pub fn timeline_playing(&self) -> bool {
        self.timeline_playing
    }

    /// Handle pending bus events
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                BusEvent::PlayMedia {
                    media_id,
                    media_kind,
                } => {
                    log::debug!("Preview loading {} ({})", media_id, media_kind);
                    self.current = Some(LoadedMedia {
                        id: media_id,
                        kind: media_kind,
                    });
                    self.is_playing = true;
                }
                BusEvent::Playback { origin, .. } if origin == Origin::Preview => continue,
                BusEvent::Playback { is_playing, .. } => {
                    self.timeline_playing = is_playing;
                    if self.current.is_some() {
                        self.is_playing = is_playing;
                    }
                }
            }
            handled += 1;
        }
        handled
    }

    /// Flip the element and announce it. Needs media loaded.
    pub fn toggle_play(&mut self, playhead: Units) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.is_playing = !self.is_playing;
        self.bus.publish(BusEvent::Playback {
            is_playing: self.is_playing,
            playhead,
            origin: Origin::Preview,
        });
        true
    }

    /// Flip mute. Unavailable without media or for images.
    pub fn toggle_mute(&mut self) -> bool {
        match &self.current {
            Some(media) if media.kind != MediaKind::Image => {
                self.muted = !self.muted;
                true
            }
            _ => false,
        }
    }

    /// The element reached its end or stopped on its own.
    ///
    /// Returns `false` if it was not playing.
    pub fn media_ended(&mut self) -> bool {
        let was_playing = self.is_playing;
        self.is_playing = false;
        was_playing
    }

    /// Accept the element's native time when it can act as a clock.
    ///
    /// Only a playing video or audio element reports time.
    pub fn report_media_time(&self, seconds: f64) -> Option<f64> {
        match &self.current {
            Some(media) if media.kind != MediaKind::Image && self.is_playing => Some(seconds),
            _ => None,
        }
    }

    /// Registry entry for the loaded media, if it still exists and its
    /// content has not been revoked
    pub fn resolve<'a>(&self, registry: &'a MediaRegistry) -> Option<&'a MediaEntry> {
        let media = self.current.as_ref()?;
        registry
            .lookup(&media.id)
            .filter(|entry| !entry.content.is_revoked())
    }

    /// Label shown in the preview toolbar
    pub fn status_label(&self, registry: &MediaRegistry) -> &'static str {
        match self.resolve(registry).map(|entry| entry.kind) {
            Some(MediaKind::Video) => "Video",
            Some(MediaKind::Image) => "Image",
            Some(MediaKind::Audio) => "Audio",
            None => "Ready",
        }
    }
}
