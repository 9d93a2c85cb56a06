//! Computes how far each joint has rotated away from the reference pose.
//!
//! The recording is partitioned into frame groups of `taxonomy.group_size()` rows. The first
//! group is the reference pose; for every further group and every canonical joint the
//! extractor reports the shortest-arc angle between the joint orientation in that group and
//! in the reference group. Joints are matched between groups by name, so every canonical
//! joint must occur exactly once in each group. Rows with names outside the taxonomy are
//! ignored here.

use nalgebra::{Quaternion, UnitQuaternion};
use tracing::{debug, warn};

use crate::retarget_error::{RetargetError, RetargetResult};
use crate::samples::{JointAngle, OrientationRecord};
use crate::skeleton::HandTaxonomy;

/// Quaternions shorter than this are not accepted as rotations.
const MIN_QUATERNION_NORM: f64 = 1e-12;

/// What to do with trailing rows that do not fill a complete frame group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialGroupPolicy {
    /// Refuse the recording
    #[default]
    Fail,
    /// Drop the trailing rows with a warning
    Drop,
}

/// Normalizes the recorded quaternion into a rotation. Fails on non-finite components and
/// on quaternions too short to normalize.
pub fn unit_rotation(q: &Quaternion<f64>) -> Result<UnitQuaternion<f64>, String> {
    if !q.coords.iter().all(|c| c.is_finite()) {
        return Err(format!(
            "quaternion [{}, {}, {}, {}] is not finite", q.i, q.j, q.k, q.w
        ));
    }
    UnitQuaternion::try_new(*q, MIN_QUATERNION_NORM)
        .ok_or_else(|| "quaternion has zero length".to_string())
}

/// Magnitude of the relative rotation `current⁻¹ ∘ reference`, radians in [0, PI].
/// `q` and `-q` give the same result.
pub fn rotation_magnitude(reference: &UnitQuaternion<f64>, current: &UnitQuaternion<f64>) -> f64 {
    (current.inverse() * reference).angle()
}

/// Shortest-arc angle between two recorded (not necessarily normalized) orientations.
pub fn rotation_angle(reference: &Quaternion<f64>, current: &Quaternion<f64>) -> Result<f64, String> {
    Ok(rotation_magnitude(&unit_rotation(reference)?, &unit_rotation(current)?))
}

pub struct RotationAngleExtractor {
    taxonomy: HandTaxonomy,
    policy: PartialGroupPolicy,
}

impl RotationAngleExtractor {
    pub fn new(taxonomy: HandTaxonomy, policy: PartialGroupPolicy) -> Self {
        RotationAngleExtractor { taxonomy, policy }
    }

    /// Number of complete frame groups in a recording of `rows` rows, reference included.
    pub fn complete_groups(&self, rows: usize) -> RetargetResult<usize> {
        let group_size = self.taxonomy.group_size();
        let groups = rows / group_size;
        let trailing = rows % group_size;

        if trailing != 0 {
            match self.policy {
                PartialGroupPolicy::Fail => {
                    return Err(RetargetError::GroupingError(format!(
                        "{} rows is not a multiple of the group size {} ({} trailing rows)",
                        rows, group_size, trailing
                    )));
                }
                PartialGroupPolicy::Drop => {
                    warn!("Dropping {} trailing rows that do not complete a frame group of {}",
                        trailing, group_size);
                }
            }
        }
        if groups == 0 {
            return Err(RetargetError::GroupingError(format!(
                "{} rows do not contain a single complete frame group of {}", rows, group_size
            )));
        }
        Ok(groups)
    }

    /// Angles of every canonical joint in every frame group after the reference, frame-major.
    /// Within a frame, joints follow the row order of the reference group.
    pub fn extract(&self, records: &[OrientationRecord]) -> RetargetResult<Vec<JointAngle>> {
        let group_size = self.taxonomy.group_size();
        let num_groups = self.complete_groups(records.len())?;
        let mut groups = records[..num_groups * group_size].chunks(group_size);

        let reference_group = groups.next().ok_or_else(|| RetargetError::GroupingError(
            "reference frame group is missing".to_string()))?;
        let reference_rows = self.index_group(0, reference_group)?;
        let reference: Vec<UnitQuaternion<f64>> = reference_rows
            .iter()
            .enumerate()
            .map(|(joint, &row)| {
                unit_rotation(&reference_group[row].orientation)
                    .map_err(|reason| self.numeric_error(joint, 0, reason))
            })
            .collect::<RetargetResult<_>>()?;

        // Canonical joints in the order they appear in the reference frame
        let order: Vec<usize> = reference_group
            .iter()
            .filter_map(|r| self.taxonomy.index_of(&r.joint_name))
            .collect();

        debug!("Extracting rotation angles for {} frames of {} joints", num_groups - 1, group_size);

        let mut angles = Vec::with_capacity((num_groups - 1) * order.len());
        for (frame_index, group) in groups.enumerate().map(|(i, g)| (i + 1, g)) {
            let rows = self.index_group(frame_index, group)?;
            for &joint in &order {
                let current = unit_rotation(&group[rows[joint]].orientation)
                    .map_err(|reason| self.numeric_error(joint, frame_index, reason))?;
                angles.push(JointAngle {
                    joint_name: self.taxonomy.joints()[joint].clone(),
                    frame_index,
                    angle: rotation_magnitude(&reference[joint], &current),
                });
            }
        }
        Ok(angles)
    }

    /// Row within the group for each canonical joint, indexed as in the taxonomy.
    fn index_group(&self, frame_index: usize, group: &[OrientationRecord]) -> RetargetResult<Vec<usize>> {
        let mut rows: Vec<Option<usize>> = vec![None; self.taxonomy.group_size()];
        for (row, record) in group.iter().enumerate() {
            let Some(joint) = self.taxonomy.index_of(&record.joint_name) else {
                continue;
            };
            if rows[joint].is_some() {
                return Err(RetargetError::GroupingError(format!(
                    "joint {} occurs more than once in frame group {}", record.joint_name, frame_index
                )));
            }
            rows[joint] = Some(row);
        }
        rows.iter()
            .enumerate()
            .map(|(joint, row)| row.ok_or_else(|| RetargetError::GroupingError(format!(
                "joint {} is missing from frame group {}", self.taxonomy.joints()[joint], frame_index
            ))))
            .collect()
    }

    fn numeric_error(&self, joint: usize, frame: usize, reason: String) -> RetargetError {
        RetargetError::NumericError {
            joint: self.taxonomy.joints()[joint].clone(),
            frame,
            reason,
        }
    }
}
