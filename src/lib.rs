//! Sitting posture classification and alerting from pose landmarks.
//!
//! This library turns per-frame body landmarks from an external pose model
//! into a running good/bad posture label with accumulated durations, and
//! raises one-shot alerts when a state has lasted too long.
//!
//! The pipeline per frame:
//! 1. Midpoints of the ear, shoulder and hip pairs
//! 2. Neck and torso inclination from vertical ([`angles`])
//! 3. Optional smoothing of the angles ([`filters`])
//! 4. Classification, time accumulation and alerting ([`tracker`])
//! 5. Alert delivery to a sink ([`sink`])
//!
//! # Examples
//!
//! ## Tracker only
//!
//! ```
//! use posture_tracker::tracker::{Posture, PostureStateTracker, TrackerConfig};
//!
//! # fn main() -> posture_tracker::Result<()> {
//! let mut tracker = PostureStateTracker::new(TrackerConfig {
//!     neck_limit_deg: 20.0,
//!     torso_limit_deg: 10.0,
//!     frame_rate: 10.0,
//!     ..TrackerConfig::default()
//! })?;
//!
//! tracker.update(5.0, 2.0);
//! tracker.update(8.0, 3.0);
//! let result = tracker.update(25.0, 4.0);
//!
//! assert_eq!(result.posture, Posture::Good);
//! assert!((result.bad_time_secs - 0.1).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! ## Full pipeline
//!
//! ```
//! use posture_tracker::{
//!     config::Config,
//!     landmarks::{Landmark, PoseLandmarks},
//!     monitor::PostureMonitor,
//!     sink::LogSink,
//! };
//!
//! # fn main() -> posture_tracker::Result<()> {
//! let mut monitor = PostureMonitor::from_config(&Config::default(), LogSink)?;
//!
//! let landmarks = PoseLandmarks::new(
//!     Landmark::new(0.45, 0.20),
//!     Landmark::new(0.55, 0.20),
//!     Landmark::new(0.40, 0.40),
//!     Landmark::new(0.60, 0.40),
//!     Landmark::new(0.45, 0.80),
//!     Landmark::new(0.55, 0.80),
//! );
//!
//! // A frame without a detected person is passed as `None`
//! monitor.process(None);
//! if let Some(report) = monitor.process(Some(&landmarks)) {
//!     println!("neck {:.1}°, posture {}", report.angles.neck_angle, report.result.posture);
//! }
//! # Ok(())
//! # }
//! ```

/// Neck and torso inclination from landmarks
pub mod angles;

/// Command line arguments and landmark stream parsing
pub mod cli;

/// Configuration management
pub mod config;

/// Constants used throughout the crate
pub mod constants;

/// Error types and result handling
pub mod error;

/// Angle smoothing filters
pub mod filters;

/// Landmark types and midpoints
pub mod landmarks;

/// Per-frame pipeline tying angles, tracker and sink together
pub mod monitor;

/// Alert sinks
pub mod sink;

/// Posture classification and session state
pub mod tracker;

pub use error::{Error, Result};
