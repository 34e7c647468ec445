//! Alert sinks: where posture cues and alerts end up.
//!
//! The sink hears two things. Posture cues (`enter_bad` / `enter_good`) follow
//! the per-frame label and are sent once per change by [`TransitionGate`].
//! Alerts come from the tracker when a state lasted past its time limit.
//! Playing a sound, showing a banner or sending a notification is the sink's job.

use crate::tracker::{AlertEvent, Posture};
use log::{info, warn};

/// Receiver for posture cues and time-limit alerts
pub trait AlertSink {
    /// Posture label turned bad
    fn enter_bad(&mut self);

    /// Posture label turned good
    fn enter_good(&mut self);

    /// A posture state lasted past its time limit
    fn alert(&mut self, event: AlertEvent);
}

/// Sink that writes cues and alerts to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn enter_bad(&mut self) {
        info!("Posture turned bad");
    }

    fn enter_good(&mut self) {
        info!("Posture turned good");
    }

    fn alert(&mut self, event: AlertEvent) {
        match event {
            AlertEvent::Bad => warn!("Bad posture for too long, please adjust your sitting position"),
            AlertEvent::Good => info!("Good posture held, keep it up"),
        }
    }
}

/// Sink that remembers everything it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Posture cues in arrival order; only `Good` or `Bad`
    pub cues: Vec<Posture>,
    pub alerts: Vec<AlertEvent>,
}

impl AlertSink for RecordingSink {
    fn enter_bad(&mut self) {
        self.cues.push(Posture::Bad);
    }

    fn enter_good(&mut self) {
        self.cues.push(Posture::Good);
    }

    fn alert(&mut self, event: AlertEvent) {
        self.alerts.push(event);
    }
}

/// Turns the per-frame posture label into cues, one per change
#[derive(Debug, Default)]
pub struct TransitionGate {
    last: Option<Posture>,
}

impl TransitionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cue `sink` if `posture` differs from the last cued label; returns whether a cue was sent.
    ///
    /// `Unknown` never cues and leaves the last label untouched.
    pub fn forward<S: AlertSink + ?Sized>(&mut self, posture: Posture, sink: &mut S) -> bool {
        if posture == Posture::Unknown || self.last == Some(posture) {
            return false;
        }
        self.last = Some(posture);
        match posture {
            Posture::Bad => sink.enter_bad(),
            Posture::Good => sink.enter_good(),
            Posture::Unknown => {}
        }
        true
    }

    #[must_use]
    pub fn last(&self) -> Option<Posture> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
