//! Retargeting of captured human hand motion to the actuators of a robotic hand.
//!
//! The hand tracking device records, for every captured instant, the position and the
//! orientation quaternion of 24 hand joints. The robot hand is driven by named actuator axes
//! (finger joints like `FFJ2`, thumb joints like `THJ5`). This crate turns the recording into
//! a table of actuator commands, one row per captured instant:
//!
//! - device joint labels are translated into the canonical hand vocabulary
//!   ([canonicalizer]);
//! - the first captured instant is taken as the reference pose and, for every later instant,
//!   each joint gets the shortest-arc angle it has rotated away from that pose
//!   ([rotation_angles]);
//! - the angles are laid out into the fixed actuator columns of the robot, columns no joint
//!   drives are kept at zero ([actuator_remapper]).
//!
//! All tables the pipeline depends on (joint labels, canonical joints, joint to actuator
//! mapping, actuator columns) are configuration values passed into [pipeline::Retargeter],
//! with the values for the tracking glove and the 29 axis hand as defaults.
//!
//! # Features
//!
//! - Joints are matched between captured instants by name, so a missing or repeated joint
//!   is reported rather than silently mismatched.
//! - Antipodal quaternions (`q` and `-q`) give the same angle; recorded quaternions are
//!   normalized before use.
//! - Configuration may be loaded from YAML and recordings read from CSV (feature
//!   `allow_filesystem`, on by default).
//!
//! ## Example
//!
//! ```
//! use rs_hand_retargeting::pipeline::{RetargetConfig, Retargeter};
//! use rs_hand_retargeting::samples::CapturedJointSample;
//! use rs_hand_retargeting::canonicalizer::DEVICE_LABELS;
//!
//! let reference: Vec<CapturedJointSample> = DEVICE_LABELS
//!     .iter()
//!     .map(|(label, _)| CapturedJointSample::new(label, [0.0, 0.0, 0.0, 1.0]))
//!     .collect();
//! // Second instant: Index2 (device label Body_Head) turned 90 degrees around z
//! let bent: Vec<CapturedJointSample> = DEVICE_LABELS
//!     .iter()
//!     .map(|(label, _)| match *label {
//!         "Body_Head" => CapturedJointSample::new(label, [0.0, 0.0, 0.5_f64.sqrt(), 0.5_f64.sqrt()]),
//!         _ => CapturedJointSample::new(label, [0.0, 0.0, 0.0, 1.0]),
//!     })
//!     .collect();
//! let recording: Vec<CapturedJointSample> = reference.into_iter().chain(bent).collect();
//!
//! let retargeter = Retargeter::new(RetargetConfig::default()).expect("valid configuration");
//! let table = retargeter.retarget(&recording).expect("retargeted");
//! let ffj2 = table.value(0, "FFJ2").unwrap();
//! assert!((ffj2 - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
//! ```

pub mod retarget_error;
pub mod samples;
pub mod skeleton;

pub mod canonicalizer;
pub mod rotation_angles;
pub mod actuator_remapper;

pub mod pipeline;

#[path = "utils/utils.rs"]
pub mod utils;

#[cfg(feature = "allow_filesystem")]
pub mod capture_io;

#[cfg(feature = "allow_filesystem")]
pub mod config_from_file;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
