use std::path::Path;

use ndarray::{Array2, Array3};
use ndarray_npy::write_npy;
use tracing::debug;

use crate::error::{Error, Result};

pub fn write_image_tile(output: &Path, tile: &Array3<u16>) -> Result<()> {
    write_npy(output, tile).map_err(|e| Error::sink_write(output, e))?;
    debug!("Wrote image tile {:?} {:?}", output, tile.dim());
    Ok(())
}

pub fn write_mask_tile(output: &Path, tile: &Array2<u8>) -> Result<()> {
    write_npy(output, tile).map_err(|e| Error::sink_write(output, e))?;
    debug!("Wrote mask tile {:?} {:?}", output, tile.dim());
    Ok(())
}
