//! Posture state tracking over a session.
//!
//! The tracker classifies each frame against the neck and torso limits,
//! accumulates good and bad frame counts, converts them to seconds using the
//! configured frame rate and raises a one-shot alert when accumulated time
//! crosses a limit.
//!
//! ```
//! use posture_tracker::tracker::{AlertEvent, PostureStateTracker, TrackerConfig};
//!
//! # fn main() -> posture_tracker::Result<()> {
//! let config = TrackerConfig {
//!     frame_rate: 10.0,
//!     bad_time_limit_secs: 1.0,
//!     ..TrackerConfig::default()
//! };
//! let mut tracker = PostureStateTracker::new(config)?;
//!
//! let mut alerts = Vec::new();
//! for _ in 0..11 {
//!     alerts.extend(tracker.update(55.0, 5.0).alert);
//! }
//! assert_eq!(alerts, vec![AlertEvent::Bad]);
//! # Ok(())
//! # }
//! ```

use crate::{
    angles::FrameAngles,
    constants::{
        DEFAULT_BAD_TIME_LIMIT_SECS, DEFAULT_FPS, DEFAULT_GOOD_TIME_LIMIT_SECS, DEFAULT_NECK_LIMIT_DEG,
        DEFAULT_TORSO_LIMIT_DEG,
    },
    Error, Result,
};
use log::{debug, info, trace};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// How the running posture label is derived from classified frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MajorityPolicy {
    /// Majority over every frame since the last reset
    #[default]
    Cumulative,
    /// Majority over the last `n` classified frames
    Window(usize),
}

/// Thresholds and alert behavior, fixed for a session
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Neck inclination above this is bad posture (degrees)
    pub neck_limit_deg: f64,
    /// Torso inclination above this is bad posture (degrees)
    pub torso_limit_deg: f64,
    /// Frames per second used to turn frame counts into seconds
    pub frame_rate: f64,
    /// Accumulated bad time that triggers a bad alert (seconds)
    pub bad_time_limit_secs: f64,
    /// Accumulated good time that triggers a good alert (seconds)
    pub good_time_limit_secs: f64,
    /// Zero both counters whenever an alert fires
    pub reset_counters_on_alert: bool,
    /// Policy for the running posture label
    pub majority: MajorityPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            neck_limit_deg: DEFAULT_NECK_LIMIT_DEG,
            torso_limit_deg: DEFAULT_TORSO_LIMIT_DEG,
            frame_rate: DEFAULT_FPS,
            bad_time_limit_secs: DEFAULT_BAD_TIME_LIMIT_SECS,
            good_time_limit_secs: DEFAULT_GOOD_TIME_LIMIT_SECS,
            reset_counters_on_alert: true,
            majority: MajorityPolicy::Cumulative,
        }
    }
}

impl TrackerConfig {
    /// Check that the configuration gives meaningful elapsed-time math
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a non-positive frame rate,
    /// negative or non-finite limits, or an empty majority window
    pub fn validate(&self) -> Result<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "Frame rate must be positive, got {}",
                self.frame_rate
            )));
        }

        let limits = [
            ("Neck limit", self.neck_limit_deg),
            ("Torso limit", self.torso_limit_deg),
            ("Bad time limit", self.bad_time_limit_secs),
            ("Good time limit", self.good_time_limit_secs),
        ];
        for (name, value) in limits {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.majority == MajorityPolicy::Window(0) {
            return Err(Error::InvalidConfiguration(
                "Majority window must hold at least one frame".to_string(),
            ));
        }

        Ok(())
    }
}

/// Running posture label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Posture {
    Good,
    Bad,
    /// No frame classified since the last reset
    #[default]
    Unknown,
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Posture::Good => "Good",
            Posture::Bad => "Bad",
            Posture::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Last alert fired in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlertState {
    #[default]
    NoAlert,
    AlertedGood,
    AlertedBad,
}

/// One-shot notification that accumulated time crossed a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertEvent {
    Good,
    Bad,
}

impl AlertEvent {
    fn state(self) -> AlertState {
        match self {
            AlertEvent::Good => AlertState::AlertedGood,
            AlertEvent::Bad => AlertState::AlertedBad,
        }
    }
}

/// Coarse lifecycle of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// No frame since construction or the last `reset()`
    Idle,
    /// At least one frame classified
    Tracking,
}

/// Inspectable snapshot of the session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionState {
    pub good_frames: u64,
    pub bad_frames: u64,
    /// Frames without a detected person; never affects classification
    pub skipped_frames: u64,
    pub last_posture: Posture,
    pub alert_active_for: AlertState,
}

/// Outcome of one `update()` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpdateResult {
    pub posture: Posture,
    pub good_time_secs: f64,
    pub bad_time_secs: f64,
    pub alert: Option<AlertEvent>,
}

/// Stateful good/bad accumulator for one session
///
/// Not synchronized: callers running the frame loop on another thread must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct PostureStateTracker {
    config: TrackerConfig,
    phase: TrackerPhase,
    state: SessionState,
    recent: VecDeque<bool>,
    fired_good: bool,
    fired_bad: bool,
}

impl PostureStateTracker {
    /// Create a tracker for a new session
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails validation
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "Creating posture tracker: neck>{}°, torso>{}°, {} fps, bad {}s, good {}s, reset_on_alert={}",
            config.neck_limit_deg,
            config.torso_limit_deg,
            config.frame_rate,
            config.bad_time_limit_secs,
            config.good_time_limit_secs,
            config.reset_counters_on_alert
        );

        let capacity = match config.majority {
            MajorityPolicy::Window(n) => n,
            MajorityPolicy::Cumulative => 0,
        };
        Ok(Self {
            config,
            phase: TrackerPhase::Idle,
            state: SessionState::default(),
            recent: VecDeque::with_capacity(capacity),
            fired_good: false,
            fired_bad: false,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a reading breaks either limit
    #[must_use]
    pub fn is_bad_frame(&self, neck_angle: f64, torso_angle: f64) -> bool {
        neck_angle > self.config.neck_limit_deg || torso_angle > self.config.torso_limit_deg
    }

    /// Classify one frame and advance the session
    pub fn update(&mut self, neck_angle: f64, torso_angle: f64) -> UpdateResult {
        self.phase = TrackerPhase::Tracking;

        let frame_bad = self.is_bad_frame(neck_angle, torso_angle);
        if frame_bad {
            self.state.bad_frames += 1;
        } else {
            self.state.good_frames += 1;
        }
        self.push_recent(frame_bad);

        let posture = self.majority_posture();
        self.state.last_posture = posture;

        let good_time_secs = self.seconds(self.state.good_frames);
        let bad_time_secs = self.seconds(self.state.bad_frames);
        trace!(
            "neck={neck_angle:.1}° torso={torso_angle:.1}° bad={frame_bad} posture={posture} good={good_time_secs:.2}s bad={bad_time_secs:.2}s"
        );

        let alert = if bad_time_secs > self.config.bad_time_limit_secs && self.may_alert(AlertEvent::Bad) {
            Some(AlertEvent::Bad)
        } else if good_time_secs > self.config.good_time_limit_secs && self.may_alert(AlertEvent::Good) {
            Some(AlertEvent::Good)
        } else {
            None
        };

        if let Some(event) = alert {
            self.fire(event, good_time_secs, bad_time_secs);
        }

        UpdateResult {
            posture,
            good_time_secs,
            bad_time_secs,
            alert,
        }
    }

    /// [`PostureStateTracker::update`] taking a computed angle pair
    pub fn update_angles(&mut self, angles: FrameAngles) -> UpdateResult {
        self.update(angles.neck_angle, angles.torso_angle)
    }

    /// Record a frame with no detected person
    ///
    /// Classification counters, posture and alert state are left untouched.
    pub fn skip(&mut self) {
        self.state.skipped_frames += 1;
    }

    /// Return to a fresh session
    pub fn reset(&mut self) {
        debug!("Resetting posture tracker session");
        self.phase = TrackerPhase::Idle;
        self.state = SessionState::default();
        self.recent.clear();
        self.fired_good = false;
        self.fired_bad = false;
    }

    #[allow(clippy::cast_precision_loss)] // Frame counts stay far below 2^52
    fn seconds(&self, frames: u64) -> f64 {
        frames as f64 / self.config.frame_rate
    }

    fn push_recent(&mut self, frame_bad: bool) {
        if let MajorityPolicy::Window(size) = self.config.majority {
            if self.recent.len() >= size {
                self.recent.pop_front();
            }
            self.recent.push_back(frame_bad);
        }
    }

    fn majority_posture(&self) -> Posture {
        let (good, bad) = match self.config.majority {
            MajorityPolicy::Cumulative => (self.state.good_frames, self.state.bad_frames),
            MajorityPolicy::Window(_) => {
                let bad = self.recent.iter().filter(|&&b| b).count() as u64;
                (self.recent.len() as u64 - bad, bad)
            }
        };

        if good > bad {
            Posture::Good
        } else {
            Posture::Bad
        }
    }

    /// With counter resets the last alert suppresses a repeat of itself;
    /// without them each kind fires once per session.
    fn may_alert(&self, event: AlertEvent) -> bool {
        if self.config.reset_counters_on_alert {
            self.state.alert_active_for != event.state()
        } else {
            match event {
                AlertEvent::Good => !self.fired_good,
                AlertEvent::Bad => !self.fired_bad,
            }
        }
    }

    fn fire(&mut self, event: AlertEvent, good_time_secs: f64, bad_time_secs: f64) {
        info!("Posture alert {event:?} (good {good_time_secs:.1}s, bad {bad_time_secs:.1}s)");

        self.state.alert_active_for = event.state();
        match event {
            AlertEvent::Good => self.fired_good = true,
            AlertEvent::Bad => self.fired_bad = true,
        }

        if self.config.reset_counters_on_alert {
            debug!("Restarting observation window after alert");
            self.state.good_frames = 0;
            self.state.bad_frames = 0;
            self.recent.clear();
        }
    }
}
