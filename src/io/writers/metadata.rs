use std::path::Path;

use tracing::info;

use crate::core::metadata::TileRecord;
use crate::error::{Error, Result};

/// Column names of `TileRecord`, written even when there are no rows.
pub const TILE_METADATA_HEADER: [&str; 6] = [
    "Tile ID",
    "Image Filename",
    "Sentinel-2 product ID",
    "Subscene coordinate",
    "Cloud coverage percentage",
    "Mask filename",
];

/// Write merged tile records as CSV, one row per tile in merge order.
pub fn write_tile_metadata_csv(output: &Path, rows: &[TileRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)
        .map_err(|e| Error::sink_write(output, e))?;
    writer.write_record(TILE_METADATA_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| Error::sink_write(output, e))?;
    info!("Tile metadata saved: {} rows -> {:?}", rows.len(), output);
    Ok(())
}

/// Remove the handoff store once the tile table is on disk.
pub fn discard_handoff(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::sink_write(path, e)),
    }
}
