//! Editor session: owns every component and wires them through one bus.

use crate::config::EditorConfig;
use crate::core::error::Result;
use crate::core::id::{ClipId, MediaId, TrackId};
use crate::core::time::Units;
use crate::export::{ExportJob, ExportSettings};
use crate::media::library::MediaLibrary;
use crate::media::payload::DragPayload;
use crate::media::registry::{MediaEntry, MediaRegistry};
use crate::playback::bus::{BusEvent, SignalBus};
use crate::playback::driver::PlaybackDriver;
use crate::preview::Preview;
use crate::timeline::{Clip, Timeline, TrackKind};

/// One editing session.
///
/// User actions go through the session. Events published on the bus are
/// delivered to the playback driver and the preview by `pump`.
pub struct EditorSession {
    config: EditorConfig,
    registry: MediaRegistry,
    library: MediaLibrary,
    timeline: Timeline,
    bus: SignalBus,
    driver: PlaybackDriver,
    preview: Preview,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let bus = SignalBus::new();
        Self {
            registry: MediaRegistry::new(&config),
            library: MediaLibrary::new(),
            timeline: Timeline::new(&config),
            driver: PlaybackDriver::new(&config.playback, bus.clone()),
            preview: Preview::new(bus.clone()),
            bus,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &MediaRegistry {
        &self.registry
    }

    pub fn library(&self) -> &MediaLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut MediaLibrary {
        &mut self.library
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn driver(&self) -> &PlaybackDriver {
        &self.driver
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn bus(&self) -> &SignalBus {
        &self.bus
    }

    pub async fn upload(&mut self, bytes: Vec<u8>, mime: &str, name: &str) -> Result<MediaEntry> {
        self.registry.add_media(bytes, mime, name).await
    }

    /// Remove uploaded media. Clips referencing it stay on the timeline.
    pub fn remove_media(&mut self, id: &MediaId) -> bool {
        self.registry.remove_media(id)
    }

    pub fn add_track(&mut self, kind: TrackKind) -> TrackId {
        self.timeline.add_track(kind).id
    }

    /// Drag payload for uploaded or library media
    pub fn drag_payload(&self, id: &MediaId) -> Option<DragPayload> {
        let defaults = &self.config.clip_defaults;
        self.registry
            .lookup(id)
            .map(|entry| entry.drag_payload(defaults))
            .or_else(|| self.library.find(id).map(|item| item.drag_payload(defaults)))
    }

    pub fn drop_media(&mut self, track_id: TrackId, json: &str) -> Option<Clip> {
        self.timeline.drop_media(track_id, json)
    }

    /// Select a clip for preview.
    ///
    /// Clips with media announce it on the bus and anchor the media clock at
    /// the clip start. Returns `false` for unknown clips or clips without media.
    pub fn select_clip(&mut self, clip_id: ClipId) -> bool {
        let Some((_, clip)) = self.timeline.find_clip(clip_id) else {
            return false;
        };
        let (Some(media_id), Some(media_kind)) = (clip.media_id.clone(), clip.media_kind) else {
            return false;
        };

        log::debug!("Selected clip {} ({})", clip.id, media_id);
        self.driver.clock_mut().attach_media(clip.start);
        self.bus.publish(BusEvent::PlayMedia {
            media_id,
            media_kind,
        });
        true
    }

    /// Timeline play/pause; returns the new playing state
    pub fn toggle_playback(&mut self) -> bool {
        let playing = self.driver.toggle(self.timeline.playhead);
        log::info!("{}", if playing { "Timeline Playing" } else { "Timeline Paused" });
        playing
    }

    /// Preview play/pause button
    pub fn toggle_preview_playback(&mut self) -> bool {
        self.preview.toggle_play(self.timeline.playhead)
    }

    pub fn toggle_preview_mute(&mut self) -> bool {
        self.preview.toggle_mute()
    }

    /// Move the playhead. A seek breaks the link to the media element's time.
    pub fn seek(&mut self, position: Units) {
        self.timeline.seek_to(position);
        self.driver.clock_mut().detach_media();
    }

    /// Forward the preview element's native time to the playback clock
    pub fn report_media_time(&mut self, seconds: f64) -> bool {
        match self.preview.report_media_time(seconds) {
            Some(seconds) => self.driver.clock_mut().report_media_time(seconds),
            None => false,
        }
    }

    /// The preview element ended. The timeline keeps playing on the fixed
    /// increment from where the media left the playhead.
    pub fn media_ended(&mut self) -> bool {
        self.driver.clock_mut().clear_media_time();
        self.preview.media_ended()
    }

    /// Advance one tick by hand
    pub fn tick(&mut self) -> Option<Units> {
        self.driver.tick(&mut self.timeline)
    }

    /// Apply ticks that came due on the playback timer
    pub fn poll_ticks(&mut self) -> usize {
        self.driver.poll_ticks(&mut self.timeline)
    }

    /// Block until the playback timer fires and apply the due ticks
    pub fn wait_ticks(&mut self) -> usize {
        self.driver.wait_ticks(&mut self.timeline)
    }

    /// Deliver pending bus events to the driver and the preview
    pub fn pump(&mut self) -> usize {
        self.driver.pump() + self.preview.pump()
    }

    pub fn start_export(&self, settings: ExportSettings) -> Result<ExportJob> {
        ExportJob::new(settings)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
