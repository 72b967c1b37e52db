use clap::Parser;
use std::path::PathBuf;

use s2catalogue::types::Stage;
use s2catalogue::{ProcessingParams, Result};

#[derive(Parser)]
#[command(name = "s2catalogue", version, about = "Sentinel-2 cloud mask catalogue builder")]
pub struct CliArgs {
    /// Directory containing subscene .npy arrays (1022x1022xC)
    #[arg(long)]
    pub subscene_dir: Option<PathBuf>,

    /// Directory containing one-hot mask .npy arrays (1022x1022x3)
    #[arg(long)]
    pub mask_dir: Option<PathBuf>,

    /// CSV side table with one cloud coverage value per subscene
    #[arg(long)]
    pub cloud_table: Option<PathBuf>,

    /// Output root for tiles and metadata
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of leading bands to keep (1-13)
    #[arg(short = 'b', long)]
    pub num_bands: Option<usize>,

    /// Side table column with the cloud coverage percentage
    #[arg(long)]
    pub cloud_column: Option<String>,

    /// Side table column with the subscene name
    #[arg(long)]
    pub cloud_key_column: Option<String>,

    /// JSON file with processing parameters; explicit flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pipeline stage to run
    #[arg(long, value_enum, default_value_t = Stage::All)]
    pub stage: Stage,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl CliArgs {
    /// Resolve parameters: defaults, then the config file, then explicit flags.
    pub fn params(&self) -> Result<ProcessingParams> {
        let mut params = match &self.config {
            Some(path) => ProcessingParams::from_json_file(path)?,
            None => ProcessingParams::default(),
        };
        if let Some(dir) = &self.subscene_dir {
            params.subscene_dir = dir.clone();
        }
        if let Some(dir) = &self.mask_dir {
            params.mask_dir = dir.clone();
        }
        if let Some(table) = &self.cloud_table {
            params.cloud_table = table.clone();
        }
        if let Some(dir) = &self.output_dir {
            params.output_dir = dir.clone();
        }
        if let Some(bands) = self.num_bands {
            params.num_bands = bands;
        }
        if let Some(column) = &self.cloud_column {
            params.cloud_column = column.clone();
        }
        if let Some(column) = &self.cloud_key_column {
            params.cloud_key_column = column.clone();
        }
        params.validate()?;
        Ok(params)
    }
}
