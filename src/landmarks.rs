//! Body landmarks consumed by the posture tracker.
//!
//! Landmarks come from an external pose model as normalized image
//! coordinates: `x` grows to the right, `y` grows downward, both in `[0, 1]`.

use crate::{
    constants::{
        LEFT_EAR_INDEX, LEFT_HIP_INDEX, LEFT_SHOULDER_INDEX, NUM_POSE_LANDMARKS, RIGHT_EAR_INDEX, RIGHT_HIP_INDEX,
        RIGHT_SHOULDER_INDEX,
    },
    Error, Result,
};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Anatomical role of a landmark used by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkRole {
    /// Left ear
    LeftEar,
    /// Right ear
    RightEar,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
}

impl LandmarkRole {
    /// All roles, in left/right pairs from head to hip
    pub const ALL: [LandmarkRole; 6] = [
        LandmarkRole::LeftEar,
        LandmarkRole::RightEar,
        LandmarkRole::LeftShoulder,
        LandmarkRole::RightShoulder,
        LandmarkRole::LeftHip,
        LandmarkRole::RightHip,
    ];

    /// Index of this role in the 33-point BlazePose layout
    #[must_use]
    pub fn blazepose_index(self) -> usize {
        match self {
            LandmarkRole::LeftEar => LEFT_EAR_INDEX,
            LandmarkRole::RightEar => RIGHT_EAR_INDEX,
            LandmarkRole::LeftShoulder => LEFT_SHOULDER_INDEX,
            LandmarkRole::RightShoulder => RIGHT_SHOULDER_INDEX,
            LandmarkRole::LeftHip => LEFT_HIP_INDEX,
            LandmarkRole::RightHip => RIGHT_HIP_INDEX,
        }
    }
}

/// A single normalized 2D landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LandmarkRepr")]
pub struct Landmark {
    /// Horizontal position, normalized to image width
    pub x: f64,
    /// Vertical position, normalized to image height (down is positive)
    pub y: f64,
    /// Detection confidence in `[0, 1]`
    pub visibility: f64,
}

/// Accepted wire shapes: `[x, y]`, `[x, y, visibility]` or `{x, y, visibility?}`
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkRepr {
    Pair([f64; 2]),
    Triple([f64; 3]),
    Object {
        x: f64,
        y: f64,
        #[serde(default = "full_visibility")]
        visibility: f64,
    },
}

fn full_visibility() -> f64 {
    1.0
}

impl From<LandmarkRepr> for Landmark {
    fn from(repr: LandmarkRepr) -> Self {
        match repr {
            LandmarkRepr::Pair([x, y]) => Landmark::new(x, y),
            LandmarkRepr::Triple([x, y, visibility]) => Landmark { x, y, visibility },
            LandmarkRepr::Object { x, y, visibility } => Landmark { x, y, visibility },
        }
    }
}

impl Landmark {
    /// Create a fully visible landmark
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, visibility: 1.0 }
    }

    /// Position as a point
    #[must_use]
    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// The six landmarks the angle calculation needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseLandmarks {
    pub left_ear: Landmark,
    pub right_ear: Landmark,
    pub left_shoulder: Landmark,
    pub right_shoulder: Landmark,
    pub left_hip: Landmark,
    pub right_hip: Landmark,
}

impl PoseLandmarks {
    /// Build from explicit landmarks
    #[must_use]
    pub fn new(
        left_ear: Landmark,
        right_ear: Landmark,
        left_shoulder: Landmark,
        right_shoulder: Landmark,
        left_hip: Landmark,
        right_hip: Landmark,
    ) -> Self {
        Self {
            left_ear,
            right_ear,
            left_shoulder,
            right_shoulder,
            left_hip,
            right_hip,
        }
    }

    /// Pick the tracked landmarks out of a full 33-point BlazePose result
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 33 landmarks are supplied
    pub fn from_blazepose(landmarks: &[Landmark]) -> Result<Self> {
        if landmarks.len() < NUM_POSE_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {} pose landmarks, got {}",
                NUM_POSE_LANDMARKS,
                landmarks.len()
            )));
        }

        let at = |role: LandmarkRole| landmarks[role.blazepose_index()];
        Ok(Self::new(
            at(LandmarkRole::LeftEar),
            at(LandmarkRole::RightEar),
            at(LandmarkRole::LeftShoulder),
            at(LandmarkRole::RightShoulder),
            at(LandmarkRole::LeftHip),
            at(LandmarkRole::RightHip),
        ))
    }

    /// Same as [`PoseLandmarks::from_blazepose`] but for bare `(x, y)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 33 points are supplied
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let landmarks: Vec<Landmark> = points.iter().map(|&(x, y)| Landmark::new(x, y)).collect();
        Self::from_blazepose(&landmarks)
    }

    /// Landmark for a given role
    #[must_use]
    pub fn get(&self, role: LandmarkRole) -> &Landmark {
        match role {
            LandmarkRole::LeftEar => &self.left_ear,
            LandmarkRole::RightEar => &self.right_ear,
            LandmarkRole::LeftShoulder => &self.left_shoulder,
            LandmarkRole::RightShoulder => &self.right_shoulder,
            LandmarkRole::LeftHip => &self.left_hip,
            LandmarkRole::RightHip => &self.right_hip,
        }
    }

    #[must_use]
    pub fn ear_midpoint(&self) -> Point2<f64> {
        midpoint(&self.left_ear, &self.right_ear)
    }

    #[must_use]
    pub fn shoulder_midpoint(&self) -> Point2<f64> {
        midpoint(&self.left_shoulder, &self.right_shoulder)
    }

    #[must_use]
    pub fn hip_midpoint(&self) -> Point2<f64> {
        midpoint(&self.left_hip, &self.right_hip)
    }

    /// Lowest visibility among the tracked landmarks
    #[must_use]
    pub fn min_visibility(&self) -> f64 {
        LandmarkRole::ALL
            .iter()
            .map(|&role| self.get(role).visibility)
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether every tracked landmark reaches `threshold`
    #[must_use]
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.min_visibility() >= threshold
    }
}

/// Scale a normalized point into pixel space, for overlays
#[must_use]
pub fn to_pixels(point: Point2<f64>, width: u32, height: u32) -> Point2<f64> {
    Point2::new(point.x * f64::from(width), point.y * f64::from(height))
}

fn midpoint(a: &Landmark, b: &Landmark) -> Point2<f64> {
    nalgebra::center(&a.point(), &b.point())
}
