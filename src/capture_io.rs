//! Reading capture recordings and reading/writing actuator command tables as CSV (optional)

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use nalgebra::{Quaternion, Vector3};
use tracing::debug;

use crate::actuator_remapper::{ActuatorCommandRow, ActuatorTable};
use crate::retarget_error::{RetargetError, RetargetResult};
use crate::samples::CapturedJointSample;

pub const JOINT_COLUMN: &str = "Joint";
pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const ROTATION_COLUMNS: [&str; 4] = ["RotationX", "RotationY", "RotationZ", "RotationW"];
pub const POSITION_COLUMNS: [&str; 3] = ["PositionX", "PositionY", "PositionZ"];

/// Column indices of a capture recording. Joint and rotation columns are mandatory,
/// position and timestamp are only needed for the skeleton viewer.
struct CaptureColumns {
    joint: usize,
    rotation: [usize; 4],
    position: Option<[usize; 3]>,
    timestamp: Option<usize>,
}

impl CaptureColumns {
    fn locate(headers: &StringRecord) -> RetargetResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| RetargetError::SchemaError(format!(
            "column '{}' is missing, found {:?}", name, headers.iter().collect::<Vec<_>>()
        )));

        let joint = require(JOINT_COLUMN)?;
        let rotation = [
            require(ROTATION_COLUMNS[0])?,
            require(ROTATION_COLUMNS[1])?,
            require(ROTATION_COLUMNS[2])?,
            require(ROTATION_COLUMNS[3])?,
        ];
        let position = match POSITION_COLUMNS.map(find) {
            [Some(x), Some(y), Some(z)] => Some([x, y, z]),
            [None, None, None] => None,
            _ => return Err(RetargetError::SchemaError(
                "position columns must be either all present or all absent".to_string()
            )),
        };
        Ok(CaptureColumns {
            joint,
            rotation,
            position,
            timestamp: find(TIMESTAMP_COLUMN),
        })
    }
}

fn parse_f64(record: &StringRecord, index: usize, row: usize, column: &str) -> RetargetResult<f64> {
    let field = record.get(index).unwrap_or("");
    field.trim().parse::<f64>().map_err(|_| RetargetError::ParseError(format!(
        "row {}: {} value '{}' is not a number", row, column, field
    )))
}

/// Reads the capture recording. Column headers may carry surrounding whitespace.
pub fn read_capture<P: AsRef<Path>>(path: P) -> RetargetResult<Vec<CapturedJointSample>> {
    let file = File::open(path.as_ref())?;
    debug!("Reading capture recording {}", path.as_ref().display());
    read_capture_from(BufReader::new(file))
}

pub fn read_capture_from<R: Read>(reader: R) -> RetargetResult<Vec<CapturedJointSample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let columns = CaptureColumns::locate(&headers)?;

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let joint_label = record.get(columns.joint).unwrap_or("").to_string();
        let [x, y, z, w] = [0, 1, 2, 3].map(|i| {
            parse_f64(&record, columns.rotation[i], row, ROTATION_COLUMNS[i])
        });
        let orientation = Quaternion::new(w?, x?, y?, z?);

        let position = match columns.position {
            Some([px, py, pz]) => Some(Vector3::new(
                parse_f64(&record, px, row, POSITION_COLUMNS[0])?,
                parse_f64(&record, py, row, POSITION_COLUMNS[1])?,
                parse_f64(&record, pz, row, POSITION_COLUMNS[2])?,
            )),
            None => None,
        };
        let timestamp = match columns.timestamp {
            Some(index) => Some(parse_f64(&record, index, row, TIMESTAMP_COLUMN)?),
            None => None,
        };

        samples.push(CapturedJointSample { joint_label, timestamp, position, orientation });
    }
    debug!("Read {} capture rows", samples.len());
    Ok(samples)
}

/// Writes the table as CSV: actuator names as header, one row per frame, no index column.
pub fn write_actuator_table_to<W: Write>(writer: W, table: &ActuatorTable) -> RetargetResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.values.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the table into the file. The table is serialized completely before the file is
/// created, so failures never leave a partially written file behind.
pub fn write_actuator_table<P: AsRef<Path>>(path: P, table: &ActuatorTable) -> RetargetResult<()> {
    let mut buffer: Vec<u8> = Vec::new();
    write_actuator_table_to(&mut buffer, table)?;
    std::fs::write(path.as_ref(), buffer)?;
    debug!("Wrote {} command rows into {}", table.len(), path.as_ref().display());
    Ok(())
}

/// Reads a command table as written by `write_actuator_table`. Rows are numbered from 1,
/// as the frames they were computed from.
pub fn read_actuator_table<P: AsRef<Path>>(path: P) -> RetargetResult<ActuatorTable> {
    let file = File::open(path)?;
    read_actuator_table_from(BufReader::new(file))
}

pub fn read_actuator_table_from<R: Read>(reader: R) -> RetargetResult<ActuatorTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != columns.len() {
            return Err(RetargetError::SchemaError(format!(
                "row {} has {} values for {} actuator columns", row, record.len(), columns.len()
            )));
        }
        let values = columns
            .iter()
            .enumerate()
            .map(|(i, column)| parse_f64(&record, i, row, column))
            .collect::<RetargetResult<Vec<f64>>>()?;
        rows.push(ActuatorCommandRow { frame_index: row + 1, values });
    }
    Ok(ActuatorTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_with_whitespace() {
        let data = "Joint, Timestamp, PositionX, PositionY, PositionZ, RotationX, RotationY, RotationZ, RotationW\n\
                    Body_Head,0,0.1,0.2,0.3,0,0,0.7071,0.7071\n";
        let samples = read_capture_from(data.as_bytes()).expect("readable");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].joint_label, "Body_Head");
        assert_eq!(samples[0].timestamp, Some(0.0));
        assert_eq!(samples[0].position, Some(Vector3::new(0.1, 0.2, 0.3)));
        assert_eq!(samples[0].orientation, Quaternion::new(0.7071, 0.0, 0.0, 0.7071));
    }

    #[test]
    fn test_position_and_timestamp_optional() {
        let data = "Joint,RotationW,RotationX,RotationY,RotationZ\nBody_Neck,1,0,0,0\n";
        let samples = read_capture_from(data.as_bytes()).expect("readable");
        assert_eq!(samples[0].timestamp, None);
        assert_eq!(samples[0].position, None);
        assert_eq!(samples[0].orientation, Quaternion::identity());
    }

    #[test]
    fn test_missing_rotation_column() {
        let data = "Joint,RotationX,RotationY,RotationW\nBody_Neck,0,0,1\n";
        match read_capture_from(data.as_bytes()) {
            Err(RetargetError::SchemaError(msg)) => assert!(msg.contains("RotationZ"), "{}", msg),
            other => panic!("Expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let data = "Joint,RotationX,RotationY,RotationZ,RotationW\nBody_Neck,0,0,zero,1\n";
        assert!(matches!(read_capture_from(data.as_bytes()), Err(RetargetError::ParseError(_))));
    }

    #[test]
    fn test_write_table_layout() {
        let table = ActuatorTable {
            columns: vec!["WRJ2".to_string(), "FFJ2".to_string()],
            rows: vec![
                ActuatorCommandRow { frame_index: 1, values: vec![0.0, 1.5] },
                ActuatorCommandRow { frame_index: 2, values: vec![0.0, 0.25] },
            ],
        };
        let mut buffer: Vec<u8> = Vec::new();
        write_actuator_table_to(&mut buffer, &table).expect("writable");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "WRJ2,FFJ2\n0,1.5\n0,0.25\n");

        let restored = read_actuator_table_from(text.as_bytes()).expect("readable");
        assert_eq!(restored, table);
    }
}
