//! Supports reading the retargeting configuration from YAML file (optional)

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::actuator_remapper::{ActuatorMapping, ActuatorSchema};
use crate::canonicalizer::LabelTable;
use crate::pipeline::RetargetConfig;
use crate::retarget_error::{RetargetError, RetargetResult};
use crate::rotation_angles::PartialGroupPolicy;
use crate::skeleton::HandTaxonomy;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum PartialGroup {
    Fail,
    Drop,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Root {
    #[serde(default)]
    pub canonical_joints: Option<Vec<String>>,
    #[serde(default)]
    pub joint_labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub actuator_mapping: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub actuator_columns: Option<Vec<String>>,
    #[serde(default)]
    pub partial_group: Option<PartialGroup>,
}

impl RetargetConfig {
    /// Read the retargeting configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Glove recording onto the 29 axis hand
    /// canonical_joints: [HandWristBase, HandWristStart, Thumb1, ...]
    /// joint_labels:
    ///   Body_Start: HandWristBase
    ///   Body_Head: Index2
    /// actuator_mapping:
    ///   Index2: FFJ2
    ///   Thumb1: THJ5
    /// actuator_columns: [WRJ2, WRJ1, FFJ4, ...]
    /// partial_group: drop
    /// ```
    /// All keys are optional, a missing key keeps the built-in value. `partial_group` is
    /// either `fail` (default) or `drop`.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> RetargetResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> RetargetResult<Self> {
        let root: Root = serde_saphyr::from_str(contents)
            .map_err(|e| RetargetError::ParseError(format!("{}", e)))?;

        let mut config = RetargetConfig::default();
        if let Some(joints) = root.canonical_joints {
            config.taxonomy = HandTaxonomy::new(&joints)?;
        }
        if let Some(labels) = root.joint_labels {
            config.labels = LabelTable::new(labels);
        }
        if let Some(mapping) = root.actuator_mapping {
            config.mapping = ActuatorMapping::new(mapping)?;
        }
        if let Some(columns) = root.actuator_columns {
            config.schema = ActuatorSchema::new(&columns)?;
        }
        if let Some(partial_group) = root.partial_group {
            config.partial_group = match partial_group {
                PartialGroup::Fail => PartialGroupPolicy::Fail,
                PartialGroup::Drop => PartialGroupPolicy::Drop,
            };
        }
        Ok(config)
    }
}
