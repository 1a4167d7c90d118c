// src/export.rs
//! History export to row-oriented CSV

use crate::error::Result;
use crate::position::Position;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serialize a history snapshot to CSV with header `lat,lon,alt,timestamp`,
/// one row per position. Absent optional fields render as empty fields.
/// Rust's default float formatting is locale-independent.
pub fn history_to_csv(history: &[Position]) -> String {
    let mut csv = String::from("lat,lon,alt,timestamp\n");

    for position in history {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            position.latitude,
            position.longitude,
            position.altitude.map_or(String::new(), |a| a.to_string()),
            position.timestamp.map_or(String::new(), |t| t.to_string()),
        ));
    }

    csv
}

/// Write a history snapshot to a CSV file.
pub fn save_history_csv(path: impl AsRef<Path>, history: &[Position]) -> Result<()> {
    let content = history_to_csv(history);

    let mut file = File::create(path.as_ref())?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_field_order() {
        let csv = history_to_csv(&[]);
        assert_eq!(csv, "lat,lon,alt,timestamp\n");
    }

    #[test]
    fn test_row_per_position() {
        let history = [
            Position::new(49.2742, -123.1853, Some(545.4), Some(1_700_000_000)),
            Position::new(48.1173, 11.5167, None, None),
        ];
        let csv = history_to_csv(&history);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "49.2742,-123.1853,545.4,1700000000");
        // Absent optionals are empty fields, not sentinel strings.
        assert_eq!(lines[2], "48.1173,11.5167,,");
    }

    #[test]
    fn test_save_to_file() {
        let path = std::env::temp_dir().join("gps_tracker_export_test.csv");
        let history = [Position::new(1.5, -2.5, None, Some(42))];

        save_history_csv(&path, &history).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(contents.starts_with("lat,lon,alt,timestamp\n"));
        assert!(contents.contains("1.5,-2.5,,42"));
    }
}
