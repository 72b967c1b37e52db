//! Static dataset descriptor: class labels and Sentinel-2 band table.
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::MaskClass;

/// Band number; B8A is written as `8.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BandId {
    Whole(u8),
    Fractional(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandInfo {
    pub band_id: BandId,
    pub band_name: String,
    /// nm
    pub center_wavelength: f64,
    /// nm
    pub bandwidth: u32,
    /// m
    pub gsd: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub class_mapping: BTreeMap<String, String>,
    pub band_info: Vec<BandInfo>,
}

const SENTINEL2_BANDS: [(BandId, &str, f64, u32, u32); 13] = [
    (BandId::Whole(1), "Blue", 442.7, 20, 60),
    (BandId::Whole(2), "Green", 492.7, 65, 10),
    (BandId::Whole(3), "Green_2", 559.8, 35, 10),
    (BandId::Whole(4), "Red", 664.6, 30, 10),
    (BandId::Whole(5), "Red_2", 704.1, 14, 20),
    (BandId::Whole(6), "Red_3", 740.5, 14, 20),
    (BandId::Whole(7), "Red_4", 782.8, 19, 20),
    (BandId::Whole(8), "Infra_red", 832.8, 105, 10),
    (BandId::Fractional(8.5), "Infra_red_2", 864.7, 21, 20),
    (BandId::Whole(9), "Infra_red_3", 945.1, 19, 60),
    (BandId::Whole(10), "Infra_red_4", 1373.5, 29, 60),
    (BandId::Whole(11), "Infra_red_5", 1613.7, 90, 20),
    (BandId::Whole(12), "Infra_red_6", 2202.4, 174, 20),
];

impl DatasetDescriptor {
    /// The fixed descriptor of the Sentinel-2 cloud mask catalogue.
    pub fn sentinel2() -> Self {
        let class_mapping = MaskClass::ALL
            .iter()
            .map(|c| (c.index().to_string(), c.label().to_string()))
            .collect();
        let band_info = SENTINEL2_BANDS
            .iter()
            .map(|&(band_id, name, center, bandwidth, gsd)| BandInfo {
                band_id,
                band_name: name.to_string(),
                center_wavelength: center,
                bandwidth,
                gsd,
            })
            .collect();
        Self {
            class_mapping,
            band_info,
        }
    }
}

pub fn write_dataset_descriptor(output: &Path) -> Result<()> {
    let descriptor = DatasetDescriptor::sentinel2();
    let json_string = serde_json::to_string_pretty(&descriptor)?;
    std::fs::write(output, json_string).map_err(|e| Error::sink_write(output, e))?;
    info!("Dataset metadata saved: {:?}", output);
    Ok(())
}
