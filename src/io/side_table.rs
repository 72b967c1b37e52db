//! Cloud coverage side table.
//!
//! The table is a CSV with a header row. Values are keyed by subscene name when
//! the key column exists; otherwise they are taken by the 1-based position of
//! the subscene in the sorted listing.
use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct CloudTable {
    keyed: Option<HashMap<String, f64>>,
    values: Vec<f64>,
}

impl CloudTable {
    pub fn from_csv(path: &Path, value_column: &str, key_column: &str) -> Result<Self> {
        let reader = csv::Reader::from_path(path).map_err(|e| Error::source_read(path, e))?;
        Self::from_csv_reader(reader, path, value_column, key_column)
    }

    pub fn from_csv_reader<R: std::io::Read>(
        mut reader: csv::Reader<R>,
        path: &Path,
        value_column: &str,
        key_column: &str,
    ) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let value_idx = position(value_column).ok_or_else(|| {
            Error::source_read(path, format!("missing column '{value_column}'"))
        })?;
        let key_idx = position(key_column);

        let mut values = Vec::new();
        let mut keyed = key_idx.map(|_| HashMap::new());
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let raw = record.get(value_idx).unwrap_or("").trim();
            let value: f64 = raw.parse().map_err(|_| {
                Error::source_read(
                    path,
                    format!("row {}: '{raw}' is not a number in '{value_column}'", row + 1),
                )
            })?;
            values.push(value);
            if let (Some(map), Some(idx)) = (keyed.as_mut(), key_idx) {
                let key = record.get(idx).unwrap_or("").trim();
                if !key.is_empty() && map.insert(key.to_string(), value).is_some() {
                    return Err(Error::source_read(
                        path,
                        format!("row {}: duplicate '{key_column}' value '{key}'", row + 1),
                    ));
                }
            }
        }

        if keyed.is_some() {
            info!(
                "Loaded {} cloud coverage values keyed by '{}'",
                values.len(),
                key_column
            );
        } else {
            warn!(
                "Cloud table {:?} has no '{}' column; matching values by listing position",
                path, key_column
            );
        }

        Ok(Self {
            keyed,
            values,
        })
    }

    pub fn is_keyed(&self) -> bool {
        self.keyed.is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cloud coverage for `source_id`, the subscene at 1-based `position`.
    ///
    /// Keyed tables try the file name, then the name without `.npy`.
    pub fn lookup(&self, source_id: &str, position: usize) -> Result<f64> {
        let found = match &self.keyed {
            Some(map) => map.get(source_id).copied().or_else(|| {
                source_id
                    .strip_suffix(".npy")
                    .and_then(|stem| map.get(stem).copied())
            }),
            None => position
                .checked_sub(1)
                .and_then(|i| self.values.get(i).copied()),
        };
        found.ok_or_else(|| Error::MissingCloudValue {
            source_id: source_id.to_string(),
        })
    }
}
