//! Defines the records flowing through the retargeting pipeline

use nalgebra::{Point3, Quaternion, Vector3};

/// One row of the capture recording, joint named as the capture device names it.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedJointSample {
    pub joint_label: String,

    /// Capture timestamp. Only the skeleton viewer groups by it; angle extraction
    /// groups rows by their position in the recording.
    pub timestamp: Option<f64>,

    pub position: Option<Vector3<f64>>,

    /// Orientation as recorded, not necessarily of unit length.
    pub orientation: Quaternion<f64>,
}

impl CapturedJointSample {
    /// Sample from orientation given in the [x, y, z, w] ordering of the recording.
    pub fn new(joint_label: &str, orientation_xyzw: [f64; 4]) -> Self {
        let [x, y, z, w] = orientation_xyzw;
        CapturedJointSample {
            joint_label: joint_label.to_string(),
            timestamp: None,
            position: None,
            orientation: Quaternion::new(w, x, y, z),
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Some(Vector3::new(x, y, z));
        self
    }
}

/// Captured sample with its joint renamed into the canonical vocabulary (or left
/// as is if the label is unknown).
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalJointSample {
    pub joint_name: String,
    pub timestamp: Option<f64>,
    pub position: Option<Vector3<f64>>,
    pub orientation: Quaternion<f64>,
}

/// Rotation-only projection of a canonical sample, all the angle extraction needs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationRecord {
    pub joint_name: String,
    pub orientation: Quaternion<f64>,
}

/// Scalar angular deviation of one joint from the reference pose.
#[derive(Debug, Clone, PartialEq)]
pub struct JointAngle {
    pub joint_name: String,
    /// Index of the frame group, starting from 1 (group 0 is the reference).
    pub frame_index: usize,
    /// Radians, within [0, PI]
    pub angle: f64,
}

/// Joint positions captured at the same timestamp, as drawn by the skeleton viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFrame {
    pub timestamp: f64,
    pub joints: Vec<(String, Point3<f64>)>,
}

impl PositionFrame {
    pub fn position_of(&self, joint: &str) -> Option<&Point3<f64>> {
        self.joints.iter().find(|(name, _)| name == joint).map(|(_, p)| p)
    }
}
