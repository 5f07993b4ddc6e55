//! Playhead clock.
//!
//! Without a media element the playhead advances by a fixed increment per
//! tick. Once a playing element reports its native time, that time mapped
//! through the selected clip's start becomes the playhead and the tick only
//! samples it.

use crate::core::time::{from_seconds, Units};

#[derive(Debug, Clone, Copy, PartialEq)]
struct MediaAnchor {
    /// Timeline position of the clip whose media is playing
    clip_start: Units,
    /// Latest native time reported by the element, in seconds
    reported: Option<f64>,
}

/// Clock that decides where the playhead goes on each tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    increment: Units,
    media: Option<MediaAnchor>,
}

impl PlaybackClock {
    pub fn new(increment: Units) -> Self {
        Self {
            increment,
            media: None,
        }
    }

    /// Attach a media element whose clip starts at `clip_start`
    pub fn attach_media(&mut self, clip_start: Units) {
        self.media = Some(MediaAnchor {
            clip_start,
            reported: None,
        });
    }

    pub fn detach_media(&mut self) {
        if self.media.take().is_some() {
            log::debug!("Media clock detached");
        }
    }

    /// Record the element's native time. Ignored when nothing is attached.
    pub fn report_media_time(&mut self, seconds: f64) -> bool {
        match self.media.as_mut() {
            Some(anchor) if seconds.is_finite() => {
                anchor.reported = Some(seconds.max(0.0));
                true
            }
            _ => false,
        }
    }

    /// Forget the reported time but keep the anchor.
    ///
    /// The fixed increment drives the playhead until the element reports again.
    pub fn clear_media_time(&mut self) {
        if let Some(anchor) = self.media.as_mut() {
            anchor.reported = None;
        }
    }

    /// True once an attached element has reported its time
    pub fn has_media_clock(&self) -> bool {
        matches!(self.media, Some(MediaAnchor { reported: Some(_), .. }))
    }

    /// Playhead after one tick from `current`
    pub fn next_position(&self, current: Units) -> Units {
        match self.media {
            Some(MediaAnchor {
                clip_start,
                reported: Some(seconds),
            }) => clip_start + from_seconds(seconds),
            _ => current + self.increment,
        }
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
