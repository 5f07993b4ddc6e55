//! Playback signal bus.
//!
//! A small pub/sub channel over crossbeam. Publishers and subscribers get the
//! bus handed to them; each subscriber owns its own receiver and is pruned on
//! the next publish once that receiver is dropped.

use crossbeam::channel::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::id::MediaId;
use crate::core::time::Units;
use crate::media::kind::MediaKind;

/// Component that published an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Timeline,
    Preview,
}

/// Event carried on the bus
#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    /// Play/pause state change
    Playback {
        is_playing: bool,
        playhead: Units,
        origin: Origin,
    },
    /// A clip was selected; the preview should load and play its media
    PlayMedia {
        media_id: MediaId,
        media_kind: MediaKind,
    },
}

impl BusEvent {
    pub fn origin(&self) -> Option<Origin> {
        match self {
            BusEvent::Playback { origin, .. } => Some(*origin),
            BusEvent::PlayMedia { .. } => None,
        }
    }
}

/// Cloneable handle to a shared set of subscribers
#[derive(Debug, Clone, Default)]
pub struct SignalBus {
    subscribers: Arc<Mutex<Vec<Sender<BusEvent>>>>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. Events published before this call are not seen.
    pub fn subscribe(&self) -> Receiver<BusEvent> {
        let (tx, rx) = channel::unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber and return how many got it
    pub fn publish(&self, event: BusEvent) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let before = subscribers.len();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        if subscribers.len() < before {
            log::debug!("Pruned {} closed subscribers", before - subscribers.len());
        }

        log::trace!("Published {:?} to {} subscribers", event, subscribers.len());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
