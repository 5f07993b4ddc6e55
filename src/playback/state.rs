//! Playback state machine.

use crate::core::time::Units;

/// Playback state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PlaybackState {
    /// Stopped - no tick is running
    #[default]
    Stopped,
    /// Playing - the tick advances the playhead
    Playing { timeline_start: Units },
}

impl PlaybackState {
    pub fn playing_from(timeline_start: Units) -> Self {
        PlaybackState::Playing { timeline_start }
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing { .. })
    }

    /// Check if stopped
    pub fn is_stopped(&self) -> bool {
        matches!(self, PlaybackState::Stopped)
    }

    /// Position playback started from, if playing
    pub fn timeline_start(&self) -> Option<Units> {
        match self {
            PlaybackState::Stopped => None,
            PlaybackState::Playing { timeline_start } => Some(*timeline_start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_queries() {
        let stopped = PlaybackState::default();
        assert!(stopped.is_stopped());
        assert_eq!(stopped.timeline_start(), None);

        let playing = PlaybackState::playing_from(12.0);
        assert!(playing.is_playing());
        assert!(!playing.is_stopped());
        assert_eq!(playing.timeline_start(), Some(12.0));
    }

    #[test]
    fn test_playing_states_compare_by_start() {
        assert_eq!(
            PlaybackState::playing_from(4.0),
            PlaybackState::Playing { timeline_start: 4.0 }
        );
        assert_ne!(PlaybackState::playing_from(4.0), PlaybackState::playing_from(5.0));
        assert_ne!(PlaybackState::playing_from(0.0), PlaybackState::Stopped);
    }
}
