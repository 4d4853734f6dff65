//! Append-only key/value record log and reference text parsing.
//!
//! Scenario outputs such as application reference numbers are appended to a
//! two-column CSV file, one `key,value` row per capture. The file is created
//! on first append and survives across runs, so repeated scenarios accumulate
//! rows rather than overwrite them.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::result::NavegarResult;

/// Append-only CSV log of captured key/value records.
#[derive(Debug, Clone)]
pub struct RecordLog {
    path: PathBuf,
}

impl RecordLog {
    /// Create a log over `path`. The file is not touched until the first
    /// append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying CSV file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one `key,value` row, creating the file if needed.
    pub fn append(&self, key: &str, value: &str) -> NavegarResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record([key, value])?;
        writer.flush()?;
        info!(key, value, path = %self.path.display(), "Appended record");
        Ok(())
    }

    /// Read every `(key, value)` row in file order. A missing file reads as
    /// empty rather than erroring.
    pub fn read_all(&self) -> NavegarResult<Vec<(String, String)>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let key = record.get(0).unwrap_or_default().to_string();
            let value = record.get(1).unwrap_or_default().to_string();
            rows.push((key, value));
        }
        Ok(rows)
    }
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?P<key>[^:]*[^:\s])\s*:\s*(?P<value>\S.*?)\s*$")
            .expect("valid regex literal")
    })
}

/// Split reference text of the form `"key: value"` into its parts, trimming
/// surrounding whitespace. Returns `None` when the separator is absent or
/// either side is empty.
#[must_use]
pub fn parse_reference(text: &str) -> Option<(String, String)> {
    let captures = reference_pattern().captures(text)?;
    Some((captures["key"].to_string(), captures["value"].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_reference_basic() {
            assert_eq!(
                parse_reference("Referans no: REF123"),
                Some(("Referans no".to_string(), "REF123".to_string()))
            );
        }

        #[test]
        fn test_parse_reference_trims_whitespace() {
            assert_eq!(
                parse_reference("  Referans no :  REF123  "),
                Some(("Referans no".to_string(), "REF123".to_string()))
            );
        }

        #[test]
        fn test_parse_reference_value_may_contain_colon() {
            // Split on the first separator only
            assert_eq!(
                parse_reference("Detail: a:b"),
                Some(("Detail".to_string(), "a:b".to_string()))
            );
        }

        #[test]
        fn test_parse_reference_rejects_malformed() {
            assert_eq!(parse_reference("no separator"), None);
            assert_eq!(parse_reference(": value only"), None);
            assert_eq!(parse_reference("key only:   "), None);
            assert_eq!(parse_reference(""), None);
        }
    }

    mod log_tests {
        use super::*;

        #[test]
        fn test_append_writes_exact_row() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("reference_data.csv");
            let log = RecordLog::new(&path);

            log.append("Referans no", "REF123").unwrap();
            let raw = std::fs::read_to_string(&path).unwrap();
            assert_eq!(raw, "Referans no,REF123\n");
        }

        #[test]
        fn test_append_accumulates_across_log_instances() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("reference_data.csv");

            RecordLog::new(&path).append("Referans no", "REF1").unwrap();
            RecordLog::new(&path).append("Referans no", "REF2").unwrap();

            let rows = RecordLog::new(&path).read_all().unwrap();
            assert_eq!(
                rows,
                vec![
                    ("Referans no".to_string(), "REF1".to_string()),
                    ("Referans no".to_string(), "REF2".to_string()),
                ]
            );
        }

        #[test]
        fn test_read_all_missing_file_is_empty() {
            let dir = TempDir::new().unwrap();
            let log = RecordLog::new(dir.path().join("absent.csv"));
            assert_eq!(log.read_all().unwrap(), Vec::new());
        }
    }
}
