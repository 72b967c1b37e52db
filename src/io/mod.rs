//! I/O layer: memory-mapped `.npy` sources, the cloud coverage side table,
//! staged output directories, and `writers` for tiles, the tile table and the
//! dataset descriptor.
pub mod npy;
pub use npy::{NpySource, list_npy_files, load_mask, load_subscene};

pub mod side_table;
pub use side_table::CloudTable;

pub mod staging;
pub use staging::StagedDir;

pub mod writers;
