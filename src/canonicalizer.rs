//! Translates device-native joint labels into canonical hand joint names.

use std::collections::{BTreeSet, HashMap};

use nalgebra::Point3;
use tracing::debug;

use crate::retarget_error::{RetargetError, RetargetResult};
use crate::samples::{CanonicalJointSample, CapturedJointSample, OrientationRecord, PositionFrame};

/// Labels the hand tracking device assigns to the joints. The device reuses its body
/// skeleton labels for most hand joints, hence the odd pairs.
pub const DEVICE_LABELS: [(&str, &str); 24] = [
    ("Body_Start", "HandWristBase"),
    ("Body_Hips", "HandWristStart"),
    ("Body_SpineLower", "Thumb1"),
    ("Hand_Thumb1", "Thumb2"),
    ("Body_SpineUpper", "Thumb3"),
    ("Body_Chest", "Thumb4"),
    ("Hand_ThumbTip", "ThumbTip"),
    ("Body_Neck", "Index1"),
    ("Body_Head", "Index2"),
    ("Body_LeftShoulder", "Index3"),
    ("Hand_IndexTip", "IndexTip"),
    ("Body_LeftScapula", "Middle1"),
    ("Body_LeftArmUpper", "Middle2"),
    ("Body_LeftArmLower", "Middle3"),
    ("Hand_MiddleTip", "MiddleTip"),
    ("Hand_Ring1", "Ring1"),
    ("Body_RightShoulder", "Ring2"),
    ("Hand_Ring3", "Ring3"),
    ("Body_LeftHandThumbDistal", "RingTip"),
    ("Hand_Pinky0", "Pinky1"),
    ("Body_RightArmLower", "Pinky2"),
    ("Hand_Pinky2", "Pinky3"),
    ("Body_LeftHandPalm", "Pinky4"),
    ("Body_LeftHandThumbTip", "PinkyTip"),
];

/// Device label to canonical name translation table.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    labels: HashMap<String, String>,
}

impl LabelTable {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        LabelTable {
            labels: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Canonical name for the label, or None if the label is not known.
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        LabelTable::new(DEVICE_LABELS)
    }
}

pub struct Canonicalizer {
    table: LabelTable,
}

impl Canonicalizer {
    pub fn new(table: LabelTable) -> Self {
        Canonicalizer { table }
    }

    /// Renames every sample into the canonical vocabulary. Unknown labels pass through unchanged.
    pub fn canonicalize(&self, samples: &[CapturedJointSample]) -> Vec<CanonicalJointSample> {
        let mut unknown: BTreeSet<&str> = BTreeSet::new();
        let canonical: Vec<CanonicalJointSample> = samples
            .iter()
            .map(|s| {
                let joint_name = match self.table.lookup(&s.joint_label) {
                    Some(name) => name.to_string(),
                    None => {
                        unknown.insert(s.joint_label.as_str());
                        s.joint_label.clone()
                    }
                };
                CanonicalJointSample {
                    joint_name,
                    timestamp: s.timestamp,
                    position: s.position,
                    orientation: s.orientation,
                }
            })
            .collect();
        for label in unknown {
            debug!("Joint label '{}' is not in the label table, kept as is", label);
        }
        canonical
    }

    /// Projection onto joint name and orientation, used by angle extraction.
    pub fn orientations(samples: &[CanonicalJointSample]) -> Vec<OrientationRecord> {
        samples
            .iter()
            .map(|s| OrientationRecord {
                joint_name: s.joint_name.clone(),
                orientation: s.orientation,
            })
            .collect()
    }

    /// Groups joint positions by timestamp, ascending, for the skeleton viewer. Within a frame,
    /// joints keep the order of the recording.
    pub fn position_frames(samples: &[CanonicalJointSample]) -> RetargetResult<Vec<PositionFrame>> {
        let mut frames: Vec<PositionFrame> = Vec::new();
        for (row, s) in samples.iter().enumerate() {
            let timestamp = s.timestamp.ok_or_else(|| RetargetError::SchemaError(format!(
                "row {} ({}) has no Timestamp", row, s.joint_name
            )))?;
            let position = s.position.ok_or_else(|| RetargetError::SchemaError(format!(
                "row {} ({}) has no position", row, s.joint_name
            )))?;
            let entry = (s.joint_name.clone(), Point3::from(position));
            match frames.iter_mut().find(|f| f.timestamp == timestamp) {
                Some(frame) => frame.joints.push(entry),
                None => frames.push(PositionFrame { timestamp, joints: vec![entry] }),
            }
        }
        frames.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Ok(frames)
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Canonicalizer::new(LabelTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::HandTaxonomy;

    #[test]
    fn test_device_labels_cover_taxonomy() {
        let taxonomy = HandTaxonomy::default();
        let table = LabelTable::default();
        assert_eq!(table.len(), 24);
        for (_, canonical) in DEVICE_LABELS {
            assert!(taxonomy.contains(canonical), "{} is not canonical", canonical);
        }
    }

    #[test]
    fn test_known_and_unknown_labels() {
        let samples = vec![
            CapturedJointSample::new("Body_Head", [0.0, 0.0, 0.0, 1.0]),
            CapturedJointSample::new("Body_Tail", [0.0, 0.0, 0.0, 1.0]),
            CapturedJointSample::new("Hand_Pinky0", [0.0, 0.0, 0.0, 1.0]),
        ];
        let canonical = Canonicalizer::default().canonicalize(&samples);
        let names: Vec<&str> = canonical.iter().map(|s| s.joint_name.as_str()).collect();
        assert_eq!(names, vec!["Index2", "Body_Tail", "Pinky1"]);
    }

    #[test]
    fn test_canonicalize_keeps_payload() {
        let sample = CapturedJointSample::new("Body_Neck", [0.1, 0.2, 0.3, 0.9])
            .with_timestamp(4.0)
            .with_position(1.0, 2.0, 3.0);
        let canonical = Canonicalizer::default().canonicalize(&[sample.clone()]);
        assert_eq!(canonical[0].orientation, sample.orientation);
        assert_eq!(canonical[0].position, sample.position);
        assert_eq!(canonical[0].timestamp, Some(4.0));
    }

    #[test]
    fn test_position_frames_sorted_by_timestamp() {
        let samples = vec![
            CapturedJointSample::new("Body_Neck", [0.0, 0.0, 0.0, 1.0])
                .with_timestamp(2.0).with_position(0.0, 0.0, 2.0),
            CapturedJointSample::new("Body_Head", [0.0, 0.0, 0.0, 1.0])
                .with_timestamp(2.0).with_position(0.0, 0.0, 2.5),
            CapturedJointSample::new("Body_Neck", [0.0, 0.0, 0.0, 1.0])
                .with_timestamp(1.0).with_position(0.0, 0.0, 1.0),
        ];
        let canonical = Canonicalizer::default().canonicalize(&samples);
        let frames = Canonicalizer::position_frames(&canonical).expect("frames");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].timestamp, 1.0);
        assert_eq!(frames[1].joints.len(), 2);
        assert_eq!(frames[1].position_of("Index2"), Some(&Point3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn test_position_frames_require_timestamp() {
        let samples = vec![CapturedJointSample::new("Body_Neck", [0.0, 0.0, 0.0, 1.0])
            .with_position(0.0, 0.0, 0.0)];
        let canonical = Canonicalizer::default().canonicalize(&samples);
        assert!(matches!(
            Canonicalizer::position_frames(&canonical),
            Err(RetargetError::SchemaError(_))
        ));
    }
}
