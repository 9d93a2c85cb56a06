//! Reshapes per-joint angles into rows of actuator commands for the robot hand.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::retarget_error::{RetargetError, RetargetResult};
use crate::samples::JointAngle;

/// Actuator columns of the robot hand, in output order. Wrist, four fingers with their
/// tip placeholders, thumb.
pub const HAND_ACTUATORS: [&str; 29] = [
    "WRJ2", "WRJ1",
    "FFJ4", "FFJ3", "FFJ2", "FFJ1", "FFtip",
    "MFJ4", "MFJ3", "MFJ2", "MFJ1", "MFtip",
    "RFJ4", "RFJ3", "RFJ2", "RFJ1", "RFtip",
    "LFJ5", "LFJ4", "LFJ3", "LFJ2", "LFJ1", "LFtip",
    "THJ5", "THJ4", "THJ3", "THJ2", "THJ1", "thtip",
];

/// Canonical joint driving each actuator. Wrist and fingertip joints drive nothing.
pub const HAND_MAPPING: [(&str, &str); 17] = [
    ("Index1", "FFJ3"),
    ("Index2", "FFJ2"),
    ("Index3", "FFJ1"),
    ("Middle1", "MFJ3"),
    ("Middle2", "MFJ2"),
    ("Middle3", "MFJ1"),
    ("Ring1", "RFJ3"),
    ("Ring2", "RFJ2"),
    ("Ring3", "RFJ1"),
    ("Pinky1", "LFJ5"),
    ("Pinky2", "LFJ3"),
    ("Pinky3", "LFJ2"),
    ("Pinky4", "LFJ1"),
    ("Thumb1", "THJ5"),
    ("Thumb2", "THJ4"),
    ("Thumb3", "THJ2"),
    ("Thumb4", "THJ1"),
];

/// Value of actuator columns that no captured joint drives.
pub const UNMAPPED_VALUE: f64 = 0.0;

/// Ordered actuator column names of the robot.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorSchema {
    columns: Vec<String>,
}

impl ActuatorSchema {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> RetargetResult<Self> {
        let mut names: Vec<String> = Vec::with_capacity(columns.len());
        for column in columns {
            let column = column.as_ref();
            if names.iter().any(|n| n == column) {
                return Err(RetargetError::ConfigurationError(format!(
                    "actuator column '{}' is listed more than once", column
                )));
            }
            names.push(column.to_string());
        }
        Ok(ActuatorSchema { columns: names })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for ActuatorSchema {
    fn default() -> Self {
        ActuatorSchema {
            columns: HAND_ACTUATORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Canonical joint to actuator assignment. Injective: an actuator is driven by one joint at most.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorMapping {
    pairs: Vec<(String, String)>,
}

impl ActuatorMapping {
    pub fn new<I, J, A>(pairs: I) -> RetargetResult<Self>
    where
        I: IntoIterator<Item = (J, A)>,
        J: Into<String>,
        A: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(joint, actuator)| (joint.into(), actuator.into()))
            .collect();

        let mut drivers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (joint, actuator) in &pairs {
            drivers.entry(actuator.as_str()).or_default().push(joint.as_str());
        }
        if let Some((actuator, joints)) = drivers.into_iter().find(|(_, joints)| joints.len() > 1) {
            let mut joints: Vec<String> = joints.into_iter().map(String::from).collect();
            joints.sort();
            return Err(RetargetError::MappingAmbiguityError {
                actuator: actuator.to_string(),
                joints,
            });
        }
        Ok(ActuatorMapping { pairs })
    }

    /// The single joint driving the actuator, if any.
    pub fn source_of(&self, actuator: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(_, a)| a == actuator)
            .map(|(joint, _)| joint.as_str())
    }

    pub fn actuator_of(&self, joint: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(j, _)| j == joint)
            .map(|(_, actuator)| actuator.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl Default for ActuatorMapping {
    fn default() -> Self {
        ActuatorMapping {
            pairs: HAND_MAPPING
                .iter()
                .map(|(j, a)| (j.to_string(), a.to_string()))
                .collect(),
        }
    }
}

/// Actuator values of one frame, in the column order of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorCommandRow {
    pub frame_index: usize,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorTable {
    pub columns: Vec<String>,
    pub rows: Vec<ActuatorCommandRow>,
}

impl ActuatorTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r.values[index]).collect())
    }

    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        let index = self.columns.iter().position(|c| c == name)?;
        self.rows.get(row).map(|r| r.values[index])
    }
}

pub struct ActuatorRemapper {
    schema: ActuatorSchema,
    /// Source joint per schema column, None for the columns kept at `UNMAPPED_VALUE`.
    sources: Vec<Option<String>>,
}

impl ActuatorRemapper {
    pub fn new(mapping: &ActuatorMapping, schema: ActuatorSchema) -> RetargetResult<Self> {
        for (joint, actuator) in mapping.pairs() {
            if !schema.columns().contains(actuator) {
                return Err(RetargetError::ConfigurationError(format!(
                    "joint {} is mapped to {} that is not an actuator column", joint, actuator
                )));
            }
        }
        let sources = schema
            .columns()
            .iter()
            .map(|column| mapping.source_of(column).map(String::from))
            .collect();
        Ok(ActuatorRemapper { schema, sources })
    }

    pub fn schema(&self) -> &ActuatorSchema {
        &self.schema
    }

    /// One row per frame, ascending by frame index.
    pub fn remap(&self, angles: &[JointAngle]) -> RetargetResult<ActuatorTable> {
        let mut frames: BTreeMap<usize, HashMap<&str, f64>> = BTreeMap::new();
        for a in angles {
            let frame = frames.entry(a.frame_index).or_default();
            if frame.insert(a.joint_name.as_str(), a.angle).is_some() {
                return Err(RetargetError::GroupingError(format!(
                    "joint {} has more than one angle in frame {}", a.joint_name, a.frame_index
                )));
            }
        }

        let mut rows = Vec::with_capacity(frames.len());
        for (frame_index, frame) in &frames {
            let values = self
                .sources
                .iter()
                .zip(self.schema.columns())
                .map(|(source, column)| match source {
                    Some(joint) => frame.get(joint.as_str()).copied().ok_or_else(|| {
                        RetargetError::GroupingError(format!(
                            "frame {} has no angle for joint {} driving {}", frame_index, joint, column
                        ))
                    }),
                    None => Ok(UNMAPPED_VALUE),
                })
                .collect::<RetargetResult<Vec<f64>>>()?;
            rows.push(ActuatorCommandRow { frame_index: *frame_index, values });
        }

        debug!("Remapped {} frames onto {} actuators", rows.len(), self.schema.len());
        Ok(ActuatorTable {
            columns: self.schema.columns().to_vec(),
            rows,
        })
    }
}
