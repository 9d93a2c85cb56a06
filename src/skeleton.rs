//! Hand skeleton taxonomy and topology.
//!
//! The taxonomy is the ordered vocabulary of canonical joint names that every frame group
//! must contain exactly once. Bone connections and colours are the data the skeleton viewer
//! needs to draw a captured frame; no retargeting logic depends on them.

use crate::retarget_error::{RetargetError, RetargetResult};

/// Canonical joint names of the captured hand, in the order the capture device emits them.
pub const CANONICAL_JOINTS: [&str; 24] = [
    "HandWristBase",
    "HandWristStart",
    "Thumb1",
    "Thumb2",
    "Thumb3",
    "Thumb4",
    "ThumbTip",
    "Index1",
    "Index2",
    "Index3",
    "IndexTip",
    "Middle1",
    "Middle2",
    "Middle3",
    "MiddleTip",
    "Ring1",
    "Ring2",
    "Ring3",
    "RingTip",
    "Pinky1",
    "Pinky2",
    "Pinky3",
    "Pinky4",
    "PinkyTip",
];

/// Bones of the hand, as pairs of canonical joints.
pub const CONNECTIONS: [(&str, &str); 27] = [
    ("HandWristBase", "HandWristStart"),
    ("HandWristStart", "Thumb1"),
    ("Thumb1", "Thumb2"),
    ("Thumb2", "Thumb3"),
    ("Thumb3", "Thumb4"),
    ("Thumb4", "ThumbTip"),
    ("HandWristStart", "Index1"),
    ("Index1", "Index2"),
    ("Index2", "Index3"),
    ("Index3", "IndexTip"),
    ("HandWristStart", "Middle1"),
    ("Middle1", "Middle2"),
    ("Middle2", "Middle3"),
    ("Middle3", "MiddleTip"),
    ("HandWristStart", "Ring1"),
    ("Ring1", "Ring2"),
    ("Ring2", "Ring3"),
    ("Ring3", "RingTip"),
    ("HandWristStart", "Pinky1"),
    ("Pinky1", "Pinky2"),
    ("Pinky2", "Pinky3"),
    ("Pinky3", "Pinky4"),
    ("Pinky4", "PinkyTip"),
    ("Thumb2", "Index1"),
    ("Index1", "Middle1"),
    ("Middle1", "Ring1"),
    ("Ring1", "Pinky2"),
];

/// Bones drawn black even though both ends belong to the same finger (metacarpals).
const BLACK_CONNECTIONS: [(&str, &str); 2] = [("Thumb1", "Thumb2"), ("Pinky1", "Pinky2")];

/// Ordered set of canonical joint names. Its length is the frame group size.
#[derive(Debug, Clone, PartialEq)]
pub struct HandTaxonomy {
    joints: Vec<String>,
}

impl HandTaxonomy {
    pub fn new<S: AsRef<str>>(joints: &[S]) -> RetargetResult<Self> {
        if joints.is_empty() {
            return Err(RetargetError::ConfigurationError(
                "canonical joint list is empty".to_string(),
            ));
        }
        let mut names: Vec<String> = Vec::with_capacity(joints.len());
        for joint in joints {
            let joint = joint.as_ref();
            if names.iter().any(|n| n == joint) {
                return Err(RetargetError::ConfigurationError(format!(
                    "canonical joint '{}' is listed more than once", joint
                )));
            }
            names.push(joint.to_string());
        }
        Ok(HandTaxonomy { joints: names })
    }

    /// Number of rows that make up one captured instant.
    pub fn group_size(&self) -> usize {
        self.joints.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j == name)
    }

    pub fn joints(&self) -> &[String] {
        &self.joints
    }
}

impl Default for HandTaxonomy {
    fn default() -> Self {
        HandTaxonomy {
            joints: CANONICAL_JOINTS.iter().map(|j| j.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn name(&self) -> &'static str {
        match self {
            Finger::Thumb => "Thumb",
            Finger::Index => "Index",
            Finger::Middle => "Middle",
            Finger::Ring => "Ring",
            Finger::Pinky => "Pinky",
        }
    }

    /// Finger the joint belongs to, judged by its name. Wrist joints belong to none.
    pub fn of_joint(joint: &str) -> Option<Finger> {
        Finger::ALL.into_iter().find(|f| joint.contains(f.name()))
    }

    pub fn color(&self) -> BoneColor {
        match self {
            Finger::Thumb => BoneColor::Red,
            Finger::Index => BoneColor::Blue,
            Finger::Middle => BoneColor::Green,
            Finger::Ring => BoneColor::Purple,
            Finger::Pinky => BoneColor::Orange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneColor {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    Black,
}

/// Colour of the bone between two joints: the finger colour when both ends are on the
/// same finger, black otherwise and for the metacarpal bones.
pub fn connection_color(joint_a: &str, joint_b: &str) -> BoneColor {
    let is_black = BLACK_CONNECTIONS
        .iter()
        .any(|&(a, b)| (a == joint_a && b == joint_b) || (a == joint_b && b == joint_a));
    if is_black {
        return BoneColor::Black;
    }
    match (Finger::of_joint(joint_a), Finger::of_joint(joint_b)) {
        (Some(fa), Some(fb)) if fa == fb => fa.color(),
        _ => BoneColor::Black,
    }
}
