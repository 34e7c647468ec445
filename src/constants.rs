//! Constants used throughout the crate

/// Number of landmarks produced by the BlazePose / MediaPipe pose model
pub const NUM_POSE_LANDMARKS: usize = 33;

/// BlazePose landmark indices for the points the tracker reads
pub const LEFT_EAR_INDEX: usize = 7;
pub const RIGHT_EAR_INDEX: usize = 8;
pub const LEFT_SHOULDER_INDEX: usize = 11;
pub const RIGHT_SHOULDER_INDEX: usize = 12;
pub const LEFT_HIP_INDEX: usize = 23;
pub const RIGHT_HIP_INDEX: usize = 24;

/// Default classification limits (degrees)
pub const DEFAULT_NECK_LIMIT_DEG: f64 = 40.0;
pub const DEFAULT_TORSO_LIMIT_DEG: f64 = 10.0;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;

/// Default alert limits (seconds of accumulated posture time)
pub const DEFAULT_BAD_TIME_LIMIT_SECS: f64 = 180.0;
pub const DEFAULT_GOOD_TIME_LIMIT_SECS: f64 = 180.0;

/// Landmarks below this visibility make a frame count as "no person"
pub const DEFAULT_MIN_VISIBILITY: f64 = 0.5;

/// Default window sizes and parameters for angle filters
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Vectors shorter than this are treated as zero-length
pub const EPSILON: f64 = 1e-10;
