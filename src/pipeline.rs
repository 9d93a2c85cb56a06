//! Retargeting pipeline: canonicalize, extract rotation angles, remap onto actuators.

use tracing::{debug, info};

use crate::actuator_remapper::{ActuatorMapping, ActuatorRemapper, ActuatorSchema, ActuatorTable};
use crate::canonicalizer::{Canonicalizer, LabelTable};
use crate::retarget_error::{RetargetError, RetargetResult};
use crate::rotation_angles::{PartialGroupPolicy, RotationAngleExtractor};
use crate::samples::{CapturedJointSample, JointAngle};
use crate::skeleton::HandTaxonomy;

/// Everything that defines a retargeting: the hand vocabulary, how the capture device labels
/// the joints, and how joints drive the actuators of the robot. `Default` is the hand
/// tracking glove retargeted to the 29 axis robot hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetargetConfig {
    pub taxonomy: HandTaxonomy,
    pub labels: LabelTable,
    pub mapping: ActuatorMapping,
    pub schema: ActuatorSchema,
    pub partial_group: PartialGroupPolicy,
}

pub struct Retargeter {
    canonicalizer: Canonicalizer,
    extractor: RotationAngleExtractor,
    remapper: ActuatorRemapper,
}

impl Retargeter {
    /// Validates the configuration and builds the pipeline stages from it.
    pub fn new(config: RetargetConfig) -> RetargetResult<Self> {
        let RetargetConfig { taxonomy, labels, mapping, schema, partial_group } = config;
        let remapper = ActuatorRemapper::new(&mapping, schema)?;
        for (joint, actuator) in mapping.pairs() {
            if !taxonomy.contains(joint) {
                return Err(RetargetError::ConfigurationError(format!(
                    "actuator {} is driven by {} that is not a canonical joint", actuator, joint
                )));
            }
        }
        debug!("Retargeting {} canonical joints onto {} actuators ({} mapped)",
            taxonomy.group_size(), remapper.schema().len(), mapping.pairs().len());
        Ok(Retargeter {
            canonicalizer: Canonicalizer::new(labels),
            extractor: RotationAngleExtractor::new(taxonomy, partial_group),
            remapper,
        })
    }

    /// Rotation angles of every joint relative to the first captured frame.
    pub fn joint_angles(&self, samples: &[CapturedJointSample]) -> RetargetResult<Vec<JointAngle>> {
        let canonical = self.canonicalizer.canonicalize(samples);
        let orientations = Canonicalizer::orientations(&canonical);
        self.extractor.extract(&orientations)
    }

    /// Actuator command table with one row per captured frame after the reference frame.
    pub fn retarget(&self, samples: &[CapturedJointSample]) -> RetargetResult<ActuatorTable> {
        info!("Retargeting {} captured rows", samples.len());
        let angles = self.joint_angles(samples)?;
        debug!("Computed {} joint angles", angles.len());
        let table = self.remapper.remap(&angles)?;
        info!("Produced {} command rows of {} actuators", table.len(), table.columns.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::CANONICAL_JOINTS;

    #[test]
    fn test_reference_only_recording() {
        let samples: Vec<CapturedJointSample> = CANONICAL_JOINTS
            .iter()
            .map(|j| CapturedJointSample::new(j, [0.0, 0.0, 0.0, 1.0]))
            .collect();
        // Canonical names are not device labels but pass through unchanged
        let retargeter = Retargeter::new(RetargetConfig::default()).expect("valid configuration");
        let table = retargeter.retarget(&samples).expect("retarget");
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 29);
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let config = RetargetConfig {
            mapping: ActuatorMapping::new([("Index2", "XXJ1")]).expect("injective"),
            ..RetargetConfig::default()
        };
        assert!(matches!(Retargeter::new(config), Err(RetargetError::ConfigurationError(_))));
    }

    #[test]
    fn test_mapping_from_unknown_joint_rejected() {
        let config = RetargetConfig {
            mapping: ActuatorMapping::new([("Index7", "FFJ2")]).expect("injective"),
            ..RetargetConfig::default()
        };
        assert!(matches!(Retargeter::new(config), Err(RetargetError::ConfigurationError(_))));
    }
}
