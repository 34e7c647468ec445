//! Per-frame pipeline: landmarks -> angles -> tracker -> sink.

use crate::{
    angles::{AngleCalculator, FrameAngles},
    config::Config,
    filters::{create_filter, AngleFilter, NoFilter},
    landmarks::PoseLandmarks,
    sink::{AlertSink, TransitionGate},
    tracker::{AlertEvent, Posture, PostureStateTracker, SessionState, TrackerConfig, UpdateResult},
    Error, Result,
};
use log::{debug, info};
use serde::Serialize;

/// What happened on one frame with a detected person
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// Index of the frame in the session, skipped frames included
    pub frame_index: u64,
    /// Angles after filtering
    pub angles: FrameAngles,
    pub result: UpdateResult,
}

/// End-of-session totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub status: String,
    pub good_frames: u64,
    pub bad_frames: u64,
    pub skipped_frames: u64,
    pub posture: Posture,
    pub message: String,
    pub good_time_secs: f64,
    pub bad_time_secs: f64,
    pub alerts: Vec<AlertEvent>,
}

/// Runs the angle calculation and tracker for one session
pub struct PostureMonitor<S: AlertSink> {
    calculator: AngleCalculator,
    filter: Box<dyn AngleFilter>,
    tracker: PostureStateTracker,
    gate: TransitionGate,
    sink: S,
    min_visibility: f64,
    frame_index: u64,
    total_good: u64,
    total_bad: u64,
    alerts: Vec<AlertEvent>,
}

impl<S: AlertSink> PostureMonitor<S> {
    /// Create a monitor with an explicit tracker configuration and filter
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker configuration is invalid or `min_visibility`
    /// is outside `0.0..=1.0`
    pub fn new(tracker_config: TrackerConfig, filter: Box<dyn AngleFilter>, min_visibility: f64, sink: S) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_visibility) {
            return Err(Error::InvalidConfiguration(format!(
                "min_visibility must be within 0..=1, got {min_visibility}"
            )));
        }
        let tracker = PostureStateTracker::new(tracker_config)?;
        info!("Posture monitor ready ({} angle smoothing)", filter.name());

        Ok(Self {
            calculator: AngleCalculator::new(),
            filter,
            tracker,
            gate: TransitionGate::new(),
            sink,
            min_visibility,
            frame_index: 0,
            total_good: 0,
            total_bad: 0,
            alerts: Vec::new(),
        })
    }

    /// Create a monitor with default settings and no smoothing
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker configuration is invalid
    pub fn with_tracker_config(tracker_config: TrackerConfig, sink: S) -> Result<Self> {
        Self::new(tracker_config, Box::new(NoFilter), 0.0, sink)
    }

    /// Create a monitor from a validated application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or filter spec is invalid
    pub fn from_config(config: &Config, sink: S) -> Result<Self> {
        config.validate()?;
        let filter = create_filter(&config.classification.filter)?;
        Self::new(config.tracker_config(), filter, config.classification.min_visibility, sink)
    }

    /// Process one frame; `None` means the pose model found nobody
    pub fn process(&mut self, landmarks: Option<&PoseLandmarks>) -> Option<FrameReport> {
        let frame_index = self.frame_index;
        self.frame_index += 1;

        let landmarks = match landmarks {
            Some(l) if l.is_visible(self.min_visibility) => l,
            Some(l) => {
                debug!(
                    "Frame {frame_index}: landmark visibility {:.2} below minimum {:.2}, skipping",
                    l.min_visibility(),
                    self.min_visibility
                );
                self.tracker.skip();
                return None;
            }
            None => {
                debug!("Frame {frame_index}: no person detected, skipping");
                self.tracker.skip();
                return None;
            }
        };

        let raw = self.calculator.compute(landmarks);
        let (neck_angle, torso_angle) = self.filter.apply(raw.neck_angle, raw.torso_angle);
        let angles = FrameAngles { neck_angle, torso_angle };

        if self.tracker.is_bad_frame(neck_angle, torso_angle) {
            self.total_bad += 1;
        } else {
            self.total_good += 1;
        }

        let result = self.tracker.update_angles(angles);
        if self.gate.forward(result.posture, &mut self.sink) {
            debug!("Frame {frame_index}: posture turned {}", result.posture);
        }
        if let Some(event) = result.alert {
            self.alerts.push(event);
            self.sink.alert(event);
        }

        Some(FrameReport {
            frame_index,
            angles,
            result,
        })
    }

    /// Start a new session: counters, filter history and cue history are cleared
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.filter.reset();
        self.gate.reset();
        self.frame_index = 0;
        self.total_good = 0;
        self.total_bad = 0;
        self.alerts.clear();
    }

    #[must_use]
    pub fn tracker(&self) -> &PostureStateTracker {
        &self.tracker
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.tracker.state()
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Totals over the whole session, including windows cleared by alerts
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Frame counts stay far below 2^52
    pub fn summary(&self) -> SessionSummary {
        let posture = if self.total_good == 0 && self.total_bad == 0 {
            Posture::Unknown
        } else if self.total_good > self.total_bad {
            Posture::Good
        } else {
            Posture::Bad
        };

        let message = match posture {
            Posture::Good => "Good posture detected. Keep it up!",
            Posture::Bad => "Bad posture detected, please adjust your sitting position.",
            Posture::Unknown => "No person detected.",
        };

        let frame_rate = self.tracker.config().frame_rate;
        SessionSummary {
            status: "success".to_string(),
            good_frames: self.total_good,
            bad_frames: self.total_bad,
            skipped_frames: self.tracker.state().skipped_frames,
            posture,
            message: message.to_string(),
            good_time_secs: self.total_good as f64 / frame_rate,
            bad_time_secs: self.total_bad as f64 / frame_rate,
            alerts: self.alerts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{landmarks::Landmark, sink::RecordingSink};

    fn upright() -> PoseLandmarks {
        PoseLandmarks::new(
            Landmark::new(0.45, 0.2),
            Landmark::new(0.55, 0.2),
            Landmark::new(0.4, 0.4),
            Landmark::new(0.6, 0.4),
            Landmark::new(0.45, 0.8),
            Landmark::new(0.55, 0.8),
        )
    }

    #[test]
    fn test_absent_landmarks_are_skipped() {
        let mut monitor =
            PostureMonitor::with_tracker_config(TrackerConfig::default(), RecordingSink::default()).unwrap();

        assert!(monitor.process(None).is_none());
        let report = monitor.process(Some(&upright())).unwrap();

        assert_eq!(report.frame_index, 1);
        assert_eq!(monitor.state().good_frames, 1);
        assert_eq!(monitor.state().skipped_frames, 1);
    }

    #[test]
    fn test_low_visibility_is_skipped() {
        let mut landmarks = upright();
        landmarks.left_ear.visibility = 0.1;

        let mut monitor =
            PostureMonitor::new(TrackerConfig::default(), Box::new(NoFilter), 0.5, RecordingSink::default()).unwrap();
        assert!(monitor.process(Some(&landmarks)).is_none());
        assert_eq!(monitor.state().good_frames + monitor.state().bad_frames, 0);
    }

    #[test]
    fn test_out_of_range_min_visibility_rejected() {
        for min_visibility in [f64::NAN, 1.5, -0.1] {
            let result = PostureMonitor::new(
                TrackerConfig::default(),
                Box::new(NoFilter),
                min_visibility,
                RecordingSink::default(),
            );
            assert!(matches!(result, Err(Error::InvalidConfiguration(_))), "{min_visibility}");
        }
        assert!(PostureMonitor::new(TrackerConfig::default(), Box::new(NoFilter), 1.0, RecordingSink::default()).is_ok());
    }

    #[test]
    fn test_empty_summary() {
        let monitor =
            PostureMonitor::with_tracker_config(TrackerConfig::default(), RecordingSink::default()).unwrap();
        let summary = monitor.summary();
        assert_eq!(summary.posture, Posture::Unknown);
        assert_eq!(summary.status, "success");
    }
}
