//! Reading header-prefixed, delimiter-separated text files into raw rows.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{error, info};
use thiserror::Error;

/// Trimmed fields of one data line.
pub type Row = Vec<String>;

pub const DEFAULT_DELIMITER: u8 = b',';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Reads every data row of `path`, skipping the header line and blank lines.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<Row>, LoadError> {
    let wrap = |source: csv::Error| LoadError::Read {
        path: path.display().to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(wrap)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(wrap)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

/// Like [`read_delimited`], but logs failures and reports them as `None`.
pub fn read_rows(path: &Path, delimiter: u8) -> Option<Vec<Row>> {
    match read_delimited(path, delimiter) {
        Ok(rows) => {
            info!("Successfully read {} rows from {}.", rows.len(), path.display());
            Some(rows)
        }
        Err(err) => {
            error!("Error reading file: {err}");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use log::Level;

    use super::test_support::write_fixture;
    use super::*;
    use crate::util::logger::capture;

    #[test]
    fn test_header_is_discarded_and_fields_trimmed() {
        let path = write_fixture("code, cost ,range,seats\nA320 , 50, 6100 ,180\nE190,1.5,4500,100\n");

        let rows = read_delimited(&path, DEFAULT_DELIMITER).unwrap();

        assert_eq!(
            rows,
            vec![
                vec!["A320", "50", "6100", "180"],
                vec!["E190", "1.5", "4500", "100"],
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let path = write_fixture("a,b\n1,2\n\n   \n3,4\n");

        let rows = read_delimited(&path, DEFAULT_DELIMITER).unwrap();

        assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_custom_delimiter() {
        let path = write_fixture("name;code\nManchester; MAN\n");

        let rows = read_delimited(&path, b';').unwrap();

        assert_eq!(rows, vec![vec!["Manchester", "MAN"]]);
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let path = write_fixture("a,b,c\n");

        assert_eq!(read_rows(&path, DEFAULT_DELIMITER), Some(vec![]));
    }

    #[test]
    fn test_rows_of_uneven_length_are_kept() {
        let path = write_fixture("a,b,c\n1,2\n1,2,3,4\n");

        let rows = read_delimited(&path, DEFAULT_DELIMITER).unwrap();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 4);
    }

    #[test]
    fn test_missing_file_is_absent() {
        capture::install();
        let path = std::env::temp_dir().join(format!("missing-{}.csv", uuid::Uuid::new_v4()));

        assert!(matches!(
            read_delimited(&path, DEFAULT_DELIMITER),
            Err(LoadError::Read { .. })
        ));
        assert_eq!(read_rows(&path, DEFAULT_DELIMITER), None);

        let shown = path.display().to_string();
        let errors = capture::records_matching(Level::Error, &["Error reading file", &shown]);
        assert_eq!(errors.len(), 1);
    }
}
