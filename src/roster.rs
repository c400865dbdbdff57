//! Reading student rosters from CSV files.
//!
//! A roster has a header row naming the `name`, `grade`, and `section` columns, in any order.
//! Surrounding whitespace in every field is ignored.

use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RosterRow {
    pub name: String,
    pub grade: String,
    pub section: String,
}

/// Parses every row of a CSV roster.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<RosterRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<RosterRow>, csv::Error>>()?;

    Ok(rows)
}

/// Parses the CSV roster stored at `path`.
pub fn read_roster_file(path: impl AsRef<Path>) -> Result<Vec<RosterRow>> {
    let file = File::open(path)?;
    read_roster(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttendanceError;

    #[test]
    fn reads_rows_with_trimmed_fields() {
        let csv = "name,grade,section\n Ada Lovelace , 10 , A\nAlan Turing,11,B\n";

        let rows = read_roster(csv.as_bytes()).unwrap();

        assert_eq!(
            rows,
            vec![
                RosterRow {
                    name: "Ada Lovelace".to_string(),
                    grade: "10".to_string(),
                    section: "A".to_string(),
                },
                RosterRow {
                    name: "Alan Turing".to_string(),
                    grade: "11".to_string(),
                    section: "B".to_string(),
                },
            ]
        );
    }

    #[test]
    fn column_order_follows_header() {
        let csv = "section,name,grade\nC,Grace Hopper,12\n";

        let rows = read_roster(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].name, "Grace Hopper");
        assert_eq!(rows[0].grade, "12");
        assert_eq!(rows[0].section, "C");
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "name,grade\nAda,10\n";

        let err = read_roster(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, AttendanceError::Csv(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_roster_file("does/not/exist.csv").unwrap_err();

        assert!(matches!(err, AttendanceError::Io(_)));
    }
}
