//! High-level library API: the image pass, the mask pass, tile metadata and
//! dataset metadata emission, and a one-call `run_catalogue`. Prefer these
//! entrypoints over the low-level processing modules when integrating.
//!
//! Both passes enumerate their directory in sorted filename order and emit
//! tiles in quadrant order, so the records they append to a
//! `TileAccumulator` line up row for row.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::metadata::TileAccumulator;
use crate::core::params::ProcessingParams;
use crate::core::processing::encode::{encode_image_tile, encode_mask_tile};
use crate::core::processing::tiling::PaddedScene;
use crate::error::{Error, Result};
use crate::io::writers::descriptor::write_dataset_descriptor;
use crate::io::writers::metadata::{discard_handoff, write_tile_metadata_csv};
use crate::io::writers::npy::{write_image_tile, write_mask_tile};
use crate::io::{CloudTable, StagedDir, list_npy_files, load_mask, load_subscene};
use crate::types::TILES_PER_SCENE;

/// Paths of everything written under the catalogue root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueLayout {
    root: PathBuf,
}

impl CatalogueLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn masks_dir(&self) -> PathBuf {
        self.root.join("masks")
    }

    pub fn handoff_path(&self) -> PathBuf {
        self.root.join("temp_metadata.json")
    }

    pub fn tile_metadata_path(&self) -> PathBuf {
        self.root.join("tile_metadata.csv")
    }

    pub fn dataset_metadata_path(&self) -> PathBuf {
        self.root.join("dataset_metadata.json")
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| Error::sink_write(&self.root, e))
    }
}

/// Summary of a full catalogue run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogueReport {
    pub subscenes: usize,
    pub masks: usize,
    pub rows: usize,
}

/// Image pass: tile and encode every subscene, then persist the handoff.
pub fn process_subscenes(
    params: &ProcessingParams,
    layout: &CatalogueLayout,
) -> Result<TileAccumulator> {
    params.validate()?;
    layout.ensure_root()?;

    let cloud_table = CloudTable::from_csv(
        &params.cloud_table,
        &params.cloud_column,
        &params.cloud_key_column,
    )?;
    let files = list_npy_files(&params.subscene_dir)?;
    info!(
        "Image pass: {} subscenes from {:?}, bands={}",
        files.len(),
        params.subscene_dir,
        params.num_bands
    );
    if !cloud_table.is_keyed() && cloud_table.len() != files.len() {
        warn!(
            "Cloud table has {} rows for {} subscenes",
            cloud_table.len(),
            files.len()
        );
    }

    let staged = StagedDir::create(&layout.images_dir())?;
    let mut acc = TileAccumulator::new();

    for (idx, file) in files.iter().enumerate() {
        let subscene_num = idx + 1;
        let cloud_percentage = cloud_table.lookup(file, subscene_num)?;
        let bands = load_subscene(&params.subscene_dir.join(file), params.num_bands)?;
        let scene = PaddedScene::from_subscene(bands.view())?;

        for (quadrant, tile) in scene.tiles() {
            let encoded = encode_image_tile(tile);
            write_image_tile(&staged.path().join(quadrant.tile_filename(file)), &encoded)?;
            acc.push_image_tile(subscene_num, quadrant, file, cloud_percentage);
        }
        info!("Processed subscene {}: {}", subscene_num, file);
    }

    staged.commit()?;
    acc.persist(&layout.handoff_path())?;
    Ok(acc)
}

/// Mask pass: decode and tile every mask, extending `acc` and the handoff.
pub fn process_masks(
    params: &ProcessingParams,
    layout: &CatalogueLayout,
    acc: &mut TileAccumulator,
) -> Result<usize> {
    layout.ensure_root()?;
    let files = list_npy_files(&params.mask_dir)?;
    info!("Mask pass: {} masks from {:?}", files.len(), params.mask_dir);
    if files.len() * TILES_PER_SCENE != acc.images().len() {
        warn!(
            "{} masks produce {} tiles but the image pass produced {}",
            files.len(),
            files.len() * TILES_PER_SCENE,
            acc.images().len()
        );
    }

    let staged = StagedDir::create(&layout.masks_dir())?;
    acc.clear_masks();

    for file in &files {
        let mask = load_mask(&params.mask_dir.join(file))?;
        let scene = PaddedScene::from_subscene(mask.view())?;

        for (quadrant, tile) in scene.tiles() {
            let decoded = encode_mask_tile(tile)?;
            write_mask_tile(&staged.path().join(quadrant.tile_filename(file)), &decoded)?;
            acc.push_mask_tile(quadrant, file);
        }
        info!("Processed mask: {}", file);
    }

    staged.commit()?;
    acc.persist(&layout.handoff_path())?;
    Ok(files.len())
}

/// Merge the accumulated records, write the tile CSV, drop the handoff.
pub fn write_tile_metadata(layout: &CatalogueLayout, acc: &TileAccumulator) -> Result<usize> {
    layout.ensure_root()?;
    let rows = acc.merge()?;
    write_tile_metadata_csv(&layout.tile_metadata_path(), &rows)?;
    discard_handoff(&layout.handoff_path())?;
    Ok(rows.len())
}

pub fn write_dataset_metadata(layout: &CatalogueLayout) -> Result<()> {
    layout.ensure_root()?;
    write_dataset_descriptor(&layout.dataset_metadata_path())
}

/// Mask pass for a separate invocation: restore the handoff, then extend it.
pub fn resume_masks(
    params: &ProcessingParams,
    layout: &CatalogueLayout,
) -> Result<TileAccumulator> {
    let mut acc = TileAccumulator::restore(&layout.handoff_path())?;
    process_masks(params, layout, &mut acc)?;
    Ok(acc)
}

/// Tile metadata for a separate invocation: restore the handoff and write the CSV.
pub fn resume_tile_metadata(layout: &CatalogueLayout) -> Result<usize> {
    let acc = TileAccumulator::restore(&layout.handoff_path())?;
    write_tile_metadata(layout, &acc)
}

/// Run every stage in one process, passing the accumulator between passes.
pub fn run_catalogue(params: &ProcessingParams) -> Result<CatalogueReport> {
    let layout = CatalogueLayout::new(&params.output_dir);

    let mut acc = process_subscenes(params, &layout)?;
    let masks = process_masks(params, &layout, &mut acc)?;
    let rows = write_tile_metadata(&layout, &acc)?;
    write_dataset_metadata(&layout)?;

    let report = CatalogueReport {
        subscenes: acc.images().len() / TILES_PER_SCENE,
        masks,
        rows,
    };
    info!(
        "Catalogue complete: subscenes={}, masks={}, rows={}",
        report.subscenes, report.masks, report.rows
    );
    Ok(report)
}
