use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::MAX_BANDS;

/// Processing parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    /// Directory of subscene `.npy` arrays
    pub subscene_dir: PathBuf,
    /// Directory of one-hot mask `.npy` arrays, filenames 1:1 with subscenes
    pub mask_dir: PathBuf,
    /// CSV side table with one cloud coverage value per subscene
    pub cloud_table: PathBuf,
    /// Root of the generated catalogue
    pub output_dir: PathBuf,
    /// Leading bands to keep from each subscene
    pub num_bands: usize,
    /// Side table column holding the cloud coverage percentage
    pub cloud_column: String,
    /// Side table column holding the subscene name; positional lookup if absent
    pub cloud_key_column: String,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            subscene_dir: PathBuf::from("dataset/subscenes"),
            mask_dir: PathBuf::from("dataset/masks"),
            cloud_table: PathBuf::from("dataset/classification_tags.csv"),
            output_dir: PathBuf::from("s2_catalogue"),
            num_bands: 3,
            cloud_column: "cloud_percent".to_string(),
            cloud_key_column: "scene".to_string(),
        }
    }
}

impl ProcessingParams {
    /// Load parameters from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::source_read(path, e))?;
        let params: ProcessingParams = serde_json::from_str(&text)?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_bands == 0 || self.num_bands > MAX_BANDS {
            return Err(Error::InvalidArgument {
                arg: "num_bands",
                value: self.num_bands.to_string(),
            });
        }
        if self.cloud_column.is_empty() {
            return Err(Error::InvalidArgument {
                arg: "cloud_column",
                value: String::new(),
            });
        }
        Ok(())
    }
}
