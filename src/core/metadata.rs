//! Per-tile metadata accumulated across the image and mask passes.
//!
//! The image pass appends one `ImageTileRecord` per emitted tile, the mask pass
//! one `MaskTileRecord`. Row `i` of both sequences must describe the same
//! physical tile; `merge` verifies that before producing `TileRecord`s.
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Quadrant;

/// Fields derived while writing an image tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTileRecord {
    pub tile_id: String,
    pub image_filename: String,
    pub source_id: String,
    pub quadrant: Quadrant,
    pub cloud_percentage: f64,
}

/// Fields derived while writing a mask tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskTileRecord {
    pub mask_filename: String,
    pub source_id: String,
    pub quadrant: Quadrant,
}

/// One merged row of the tile metadata table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileRecord {
    #[serde(rename = "Tile ID")]
    pub tile_id: String,
    #[serde(rename = "Image Filename")]
    pub image_filename: String,
    #[serde(rename = "Sentinel-2 product ID")]
    pub source_id: String,
    #[serde(rename = "Subscene coordinate")]
    pub coordinate: String,
    #[serde(rename = "Cloud coverage percentage")]
    pub cloud_percentage: f64,
    #[serde(rename = "Mask filename")]
    pub mask_filename: String,
}

/// Tile identifier: 1-based subscene counter, 0-based tile index.
pub fn tile_id(subscene_num: usize, quadrant: Quadrant) -> String {
    format!("subscene{}_tile_{}", subscene_num, quadrant.index())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileAccumulator {
    images: Vec<ImageTileRecord>,
    masks: Vec<MaskTileRecord>,
}

impl TileAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[ImageTileRecord] {
        &self.images
    }

    pub fn masks(&self) -> &[MaskTileRecord] {
        &self.masks
    }

    /// Drop mask records from a previous run of the mask pass.
    pub fn clear_masks(&mut self) {
        self.masks.clear();
    }

    pub fn push_image_tile(
        &mut self,
        subscene_num: usize,
        quadrant: Quadrant,
        source_id: &str,
        cloud_percentage: f64,
    ) -> &ImageTileRecord {
        self.images.push(ImageTileRecord {
            tile_id: tile_id(subscene_num, quadrant),
            image_filename: quadrant.tile_filename(source_id),
            source_id: source_id.to_string(),
            quadrant,
            cloud_percentage,
        });
        &self.images[self.images.len() - 1]
    }

    pub fn push_mask_tile(&mut self, quadrant: Quadrant, source_id: &str) -> &MaskTileRecord {
        self.masks.push(MaskTileRecord {
            mask_filename: quadrant.tile_filename(source_id),
            source_id: source_id.to_string(),
            quadrant,
        });
        &self.masks[self.masks.len() - 1]
    }

    /// Verify that row `i` of the image and mask sequences describe the same tile.
    pub fn check_alignment(&self) -> Result<()> {
        let image_rows = self.images.len();
        let mask_rows = self.masks.len();
        if image_rows != mask_rows {
            return Err(Error::Alignment {
                image_rows,
                mask_rows,
                detail: "row counts differ".to_string(),
            });
        }
        for (row, (image, mask)) in self.images.iter().zip(&self.masks).enumerate() {
            if image.source_id != mask.source_id || image.quadrant != mask.quadrant {
                return Err(Error::Alignment {
                    image_rows,
                    mask_rows,
                    detail: format!(
                        "row {row}: image tile {} of {} paired with mask tile {} of {}",
                        image.quadrant.index(),
                        image.source_id,
                        mask.quadrant.index(),
                        mask.source_id
                    ),
                });
            }
        }
        Ok(())
    }

    /// Merge image- and mask-derived records into table rows, in emission order.
    pub fn merge(&self) -> Result<Vec<TileRecord>> {
        self.check_alignment()?;
        Ok(self
            .images
            .iter()
            .zip(&self.masks)
            .map(|(image, mask)| TileRecord {
                tile_id: image.tile_id.clone(),
                image_filename: image.image_filename.clone(),
                source_id: image.source_id.clone(),
                coordinate: image.quadrant.coordinate_label().to_string(),
                cloud_percentage: image.cloud_percentage,
                mask_filename: mask.mask_filename.clone(),
            })
            .collect())
    }

    /// Write the handoff store used to resume across process restarts.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::sink_write(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(|e| Error::sink_write(path, e))?;
        debug!(
            "Persisted handoff metadata: images={}, masks={}, path={:?}",
            self.images.len(),
            self.masks.len(),
            path
        );
        Ok(())
    }

    /// Read back a handoff store written by `persist`.
    pub fn restore(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingHandoff {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| Error::source_read(path, e))?;
        let acc: TileAccumulator = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "Restored handoff metadata: images={}, masks={}",
            acc.images.len(),
            acc.masks.len()
        );
        Ok(acc)
    }
}
