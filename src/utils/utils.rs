//! Helper functions

use crate::actuator_remapper::ActuatorTable;
use crate::samples::JointAngle;

/// Print the command table, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_table(table: &ActuatorTable) {
    if table.is_empty() {
        println!("No command rows");
        return;
    }
    let header: Vec<String> = table.columns.iter().map(|c| format!("{:>6}", c)).collect();
    println!("frame {}", header.join(" "));
    for row in &table.rows {
        let mut row_str = String::new();
        for value in &row.values {
            row_str.push_str(&format!("{:6.1} ", value.to_degrees()));
        }
        println!("{:5} {}", row.frame_index, row_str.trim_end());
    }
}

/// Print joint angles of a single frame, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_angles(angles: &[JointAngle], frame_index: usize) {
    for a in angles.iter().filter(|a| a.frame_index == frame_index) {
        println!("{:>16}: {:7.2}", a.joint_name, a.angle.to_degrees());
    }
}

/// Largest angle of every frame, degrees. Useful to spot tracking glitches in a recording.
pub fn peak_degrees(table: &ActuatorTable) -> Vec<f64> {
    table
        .rows
        .iter()
        .map(|r| r.values.iter().fold(0.0_f64, |m, v| m.max(v.abs())).to_degrees())
        .collect()
}
