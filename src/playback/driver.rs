//! Playback driver coordinating the playhead tick.
//! Uses crossbeam channels for the tick and for bus events.

use crossbeam::channel::{self, Receiver};
use std::time::{Duration, Instant};

use crate::config::PlaybackConfig;
use crate::core::time::Units;
use crate::playback::bus::{BusEvent, Origin, SignalBus};
use crate::playback::clock::PlaybackClock;
use crate::playback::state::PlaybackState;
use crate::timeline::Timeline;

/// Periodic tick source held while playing
struct Ticker {
    rx: Receiver<Instant>,
    /// Instant up to which ticks have been applied
    applied_until: Instant,
}

/// Stopped/Playing state machine driving the timeline playhead.
///
/// While playing, a periodic crossbeam ticker is held; stopping drops it, so
/// no tick is delivered after a pause.
pub struct PlaybackDriver {
    state: PlaybackState,
    clock: PlaybackClock,
    bus: SignalBus,
    events: Receiver<BusEvent>,
    ticker: Option<Ticker>,
    interval: Duration,
}

impl PlaybackDriver {
    pub fn new(config: &PlaybackConfig, bus: SignalBus) -> Self {
        let events = bus.subscribe();
        Self {
            state: PlaybackState::Stopped,
            clock: PlaybackClock::new(config.tick_increment),
            bus,
            events,
            ticker: None,
            interval: Duration::from_millis(config.tick_interval_ms),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    /// Whether a tick source is currently running
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start playing from `playhead` and announce it. No-op when already playing.
    pub fn play(&mut self, playhead: Units) -> bool {
        if self.is_playing() {
            return false;
        }
        self.start(playhead);
        self.announce(true, playhead);
        true
    }

    /// Stop playing and announce it. No-op when already stopped.
    pub fn pause(&mut self, playhead: Units) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.stop();
        self.announce(false, playhead);
        true
    }

    /// Flip between playing and stopped; returns the new playing state
    pub fn toggle(&mut self, playhead: Units) -> bool {
        if self.is_playing() {
            self.pause(playhead);
        } else {
            self.play(playhead);
        }
        self.is_playing()
    }

    fn start(&mut self, playhead: Units) {
        log::debug!("Playback started at {}", playhead);
        self.state = PlaybackState::playing_from(playhead);
        let applied_until = Instant::now();
        self.ticker = Some(Ticker {
            rx: channel::tick(self.interval),
            applied_until,
        });
    }

    fn stop(&mut self) {
        log::debug!("Playback stopped");
        self.state = PlaybackState::Stopped;
        self.ticker = None;
        // A stopped element no longer reports time
        self.clock.clear_media_time();
    }

    fn announce(&self, is_playing: bool, playhead: Units) {
        self.bus.publish(BusEvent::Playback {
            is_playing,
            playhead,
            origin: Origin::Timeline,
        });
    }

    /// Advance the playhead by one tick. Does nothing while stopped.
    pub fn tick(&mut self, timeline: &mut Timeline) -> Option<Units> {
        if !self.is_playing() {
            return None;
        }
        let next = self.clock.next_position(timeline.playhead);
        timeline.seek_to(next);
        Some(timeline.playhead)
    }

    /// Apply every tick that has come due since the last poll.
    ///
    /// The crossbeam ticker holds at most one pending message, so the number
    /// of due ticks is taken from the time elapsed since the last applied one.
    pub fn poll_ticks(&mut self, timeline: &mut Timeline) -> usize {
        let interval = self.interval;
        let Some(ticker) = self.ticker.as_mut() else {
            return 0;
        };
        ticker.rx.try_iter().for_each(drop);

        let elapsed = ticker.applied_until.elapsed();
        let due = elapsed
            .as_nanos()
            .checked_div(interval.as_nanos())
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX));
        ticker.applied_until += interval * due;

        for _ in 0..due {
            self.tick(timeline);
        }
        due as usize
    }

    /// Block until the next tick fires, then apply every due tick.
    ///
    /// Returns 0 straight away while stopped.
    pub fn wait_ticks(&mut self, timeline: &mut Timeline) -> usize {
        let fired = match &self.ticker {
            Some(ticker) => ticker.rx.recv().is_ok(),
            None => false,
        };
        if !fired {
            return 0;
        }
        self.poll_ticks(timeline)
    }

    /// Mirror play/pause announced by other components.
    ///
    /// Our own announcements come back on the subscription and are skipped.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            let BusEvent::Playback {
                is_playing,
                playhead,
                origin,
            } = event
            else {
                continue;
            };
            if origin == Origin::Timeline {
                continue;
            }

            match (is_playing, self.is_playing()) {
                (true, false) => self.start(playhead),
                (false, true) => self.stop(),
                _ => {}
            }
            handled += 1;
        }
        handled
    }
}
