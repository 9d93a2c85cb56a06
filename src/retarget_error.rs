//! Error handling for the retargeting pipeline and its file readers

use std::io;

/// Unified error to report failures of reading, canonicalizing, angle extraction and remapping.
/// All of them are fatal: the run is aborted before any output is written.
#[derive(Debug)]
pub enum RetargetError {
    IoError(io::Error),
    ParseError(String),
    /// Required input columns are missing or misnamed.
    SchemaError(String),
    /// Input rows cannot be partitioned into complete frame groups.
    GroupingError(String),
    /// Orientation that does not define a rotation (NaN, infinite, zero length).
    NumericError { joint: String, frame: usize, reason: String },
    /// More than one canonical joint drives the same actuator.
    MappingAmbiguityError { actuator: String, joints: Vec<String> },
    ConfigurationError(String),
}

impl std::fmt::Display for RetargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            RetargetError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            RetargetError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            RetargetError::SchemaError(ref msg) =>
                write!(f, "Schema Error: {}", msg),
            RetargetError::GroupingError(ref msg) =>
                write!(f, "Grouping Error: {}", msg),
            RetargetError::NumericError { ref joint, frame, ref reason } =>
                write!(f, "Numeric Error: joint {} in frame {}: {}", joint, frame, reason),
            RetargetError::MappingAmbiguityError { ref actuator, ref joints } =>
                write!(f, "Mapping Ambiguity: actuator {} is driven by {} joints ({})",
                       actuator, joints.len(), joints.join(", ")),
            RetargetError::ConfigurationError(ref msg) =>
                write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for RetargetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetargetError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RetargetError {
    fn from(err: io::Error) -> Self {
        RetargetError::IoError(err)
    }
}

#[cfg(feature = "allow_filesystem")]
impl From<csv::Error> for RetargetError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io_err) => return RetargetError::IoError(io_err),
                other => return RetargetError::ParseError(format!("{:?}", other)),
            }
        }
        RetargetError::ParseError(format!("{}", err))
    }
}

pub type RetargetResult<T> = Result<T, RetargetError>;
