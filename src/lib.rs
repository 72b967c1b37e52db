#![doc = r#"
s2catalogue: tile Sentinel-2 cloud-mask subscenes into an ML-ready dataset.

This crate turns a directory of 1022x1022 subscene arrays (`.npy`) and their
one-hot cloud masks into 512x512 tiles with aligned per-tile metadata and a
static dataset descriptor. It powers the `s2catalogue` CLI and can be embedded
in your own Rust applications.

Pipeline
--------
1. Subscenes are memory-mapped and only the first `num_bands` bands are copied.
2. Each array is zero-padded to 1024x1024 and split into four quadrants:
   top-left, top-right, bottom-left, bottom-right (tile index 0..3).
3. Image tiles are encoded as `round(clip(v * 10000, 0, 65535))` into `u16`;
   mask tiles are arg-max decoded into `u8` class indices
   (0 = Clear, 1 = Cloud, 2 = Cloud Shadow).
4. Tile records from the image pass and the mask pass are merged row by row
   into `tile_metadata.csv`; a row-count or identity mismatch is an error.

Quick start: build the whole catalogue
--------------------------------------
```rust,no_run
use std::path::PathBuf;
use s2catalogue::{run_catalogue, ProcessingParams};

fn main() -> s2catalogue::Result<()> {
    let params = ProcessingParams {
        subscene_dir: PathBuf::from("dataset/subscenes"),
        mask_dir: PathBuf::from("dataset/masks"),
        cloud_table: PathBuf::from("dataset/classification_tags.csv"),
        output_dir: PathBuf::from("s2_catalogue"),
        num_bands: 3,
        ..Default::default()
    };

    let report = run_catalogue(&params)?;
    println!("subscenes={} rows={}", report.subscenes, report.rows);
    Ok(())
}
```

Running the passes separately
-----------------------------
The image pass persists its records to `temp_metadata.json` under the output
root, so the mask pass and the table write can run as later invocations.

```rust,no_run
use s2catalogue::{process_subscenes, resume_masks, resume_tile_metadata};
use s2catalogue::{CatalogueLayout, ProcessingParams};

fn main() -> s2catalogue::Result<()> {
    let params = ProcessingParams::default();
    let layout = CatalogueLayout::new(&params.output_dir);

    process_subscenes(&params, &layout)?;
    // ... possibly in another process:
    resume_masks(&params, &layout)?;
    let rows = resume_tile_metadata(&layout)?;
    println!("rows={rows}");
    Ok(())
}
```

Array helpers
-------------
```rust
use ndarray::Array3;
use s2catalogue::core::processing::encode::encode_image_tile;
use s2catalogue::core::processing::tiling::PaddedScene;

let subscene = Array3::<f32>::from_elem((1022, 1022, 3), 0.25);
let scene = PaddedScene::from_subscene(subscene.view()).unwrap();
for (quadrant, tile) in scene.tiles() {
    let encoded = encode_image_tile(tile);
    assert_eq!(encoded.dim(), (512, 512, 3));
    println!("{}: {}", quadrant.index(), quadrant.coordinate_label());
}
```

Error handling
--------------
All public functions return `s2catalogue::Result<T>`; match on
`s2catalogue::Error` to handle specific cases.

```rust,no_run
use s2catalogue::{run_catalogue, Error, ProcessingParams};

fn main() {
    match run_catalogue(&ProcessingParams::default()) {
        Ok(_) => {}
        Err(Error::Alignment { image_rows, mask_rows, .. }) => {
            eprintln!("masks do not match subscenes: {image_rows} vs {mask_rows}")
        }
        Err(Error::SourceRead { path, reason }) => eprintln!("{path:?}: {reason}"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level pass and run entry points.
- [`core`] — geometry transforms, encoders, params and the tile accumulator.
- [`io`] — npy sources, cloud side table, staged output and writers.
- [`types`] — geometry constants, `Quadrant`, `MaskClass`, `Stage`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::metadata::{ImageTileRecord, MaskTileRecord, TileAccumulator, TileRecord};
pub use crate::core::params::ProcessingParams;
pub use error::{Error, Result};
pub use types::{MaskClass, Quadrant, Stage};

// Readers and writers
pub use io::writers::descriptor::{DatasetDescriptor, write_dataset_descriptor};
pub use io::{CloudTable, NpySource, StagedDir, list_npy_files, load_mask, load_subscene};

// High-level API re-exports
pub use api::{
    CatalogueLayout, CatalogueReport, process_masks, process_subscenes, resume_masks,
    resume_tile_metadata, run_catalogue, write_dataset_metadata, write_tile_metadata,
};
