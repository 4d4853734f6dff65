//! Tabular scenario data source.
//!
//! Scenario inputs live in a delimited text file whose first row names the
//! columns and whose second row carries the values. Spreadsheet exports
//! render numeric cells with a trailing `.0` or in scientific notation, so
//! integral numbers are normalized back to plain digits before use (a phone
//! column exported as `5.551234567E9` reads as `5551234567`).

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::result::{NavegarError, NavegarResult};

/// Largest magnitude normalized exactly from an `f64` cell
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Read the header row and first data row of the file at `path`, returning a
/// header-to-cell map with numeric cells normalized.
///
/// Rows shorter than the header read the missing cells as empty strings;
/// extra cells beyond the header are dropped.
///
/// # Errors
///
/// [`NavegarError::DataSource`] when the file has no header row or no data
/// row; malformed CSV and I/O failures propagate as their own variants.
pub fn read_first_row(path: &Path) -> NavegarResult<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| NavegarError::DataSource {
            message: format!("cannot open {}: {e}", path.display()),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| NavegarError::DataSource {
            message: format!("cannot read header row of {}: {e}", path.display()),
        })?
        .clone();
    if headers.is_empty() {
        return Err(NavegarError::DataSource {
            message: format!("{} has no header row", path.display()),
        });
    }

    let mut records = reader.records();
    let row = match records.next() {
        Some(record) => record?,
        None => {
            return Err(NavegarError::DataSource {
                message: format!("{} has no data row", path.display()),
            });
        }
    };

    let mut map = HashMap::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        let raw = row.get(index).unwrap_or_default();
        map.insert(header.to_string(), normalize_cell(raw));
    }
    info!(path = %path.display(), columns = map.len(), "Read scenario data row");
    Ok(map)
}

/// Undo spreadsheet-style rendering of integral numbers. Non-numeric cells
/// and genuine fractions pass through trimmed but otherwise untouched.
fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.parse::<i64>().is_ok() {
        return trimmed.to_string();
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER => {
            format!("{value:.0}")
        }
        _ => trimmed.to_string(),
    }
}
