//! Neck and torso inclination from body landmarks.
//!
//! Both angles are measured against a vertical reference in image
//! coordinates, where `y` grows downward:
//! - neck: shoulder midpoint -> ear midpoint, against straight up
//! - torso: shoulder midpoint -> hip midpoint, against straight down
//!
//! An upright sitter reads close to 0° on both. Angles are unchanged by a
//! uniform scale; stretching x and y by different factors (a non-square
//! frame in pixel space) shifts them slightly, so thresholds should be tuned
//! in the coordinate space the caller feeds in.

use crate::{constants::EPSILON, landmarks::PoseLandmarks};
use nalgebra::{Point2, Vector2};
use serde::Serialize;

/// Neck and torso inclination of one frame, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FrameAngles {
    pub neck_angle: f64,
    pub torso_angle: f64,
}

/// Pure geometry over landmark positions
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleCalculator;

impl AngleCalculator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute both inclinations for one frame
    #[must_use]
    pub fn compute(&self, landmarks: &PoseLandmarks) -> FrameAngles {
        let shoulder = landmarks.shoulder_midpoint();
        FrameAngles {
            neck_angle: neck_angle(&landmarks.ear_midpoint(), &shoulder),
            torso_angle: torso_angle(&shoulder, &landmarks.hip_midpoint()),
        }
    }
}

/// Inclination of the shoulder -> ear vector from straight up, in `[0, 180]`
#[must_use]
pub fn neck_angle(ear_midpoint: &Point2<f64>, shoulder_midpoint: &Point2<f64>) -> f64 {
    angle_between(&(ear_midpoint - shoulder_midpoint), &Vector2::new(0.0, -1.0))
}

/// Inclination of the shoulder -> hip vector from straight down, in `[0, 180]`
#[must_use]
pub fn torso_angle(shoulder_midpoint: &Point2<f64>, hip_midpoint: &Point2<f64>) -> f64 {
    angle_between(&(hip_midpoint - shoulder_midpoint), &Vector2::new(0.0, 1.0))
}

/// Angle between two vectors in degrees
///
/// `acos(v1·v2 / (|v1||v2|))` with the cosine clamped to `[-1, 1]`.
/// Zero-length (or non-finite) input yields 0°.
#[must_use]
pub fn angle_between(v1: &Vector2<f64>, v2: &Vector2<f64>) -> f64 {
    let norms = v1.norm() * v2.norm();
    if !norms.is_finite() || norms < EPSILON {
        return 0.0;
    }

    let cos_angle = (v1.dot(v2) / norms).clamp(-1.0, 1.0);
    if cos_angle.is_nan() {
        return 0.0;
    }
    cos_angle.acos().to_degrees().abs()
}
