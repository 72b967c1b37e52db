//! Shared types and constants used across the catalogue builder.
//! Includes the fixed tiling geometry, `Quadrant`, `MaskClass` and the
//! CLI-facing `Stage` selector.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Spatial size of an input subscene (rows and cols).
pub const SUBSCENE_DIM: usize = 1022;
/// Zero padding added on each side of both spatial axes.
pub const PAD: usize = 1;
/// Spatial size after padding.
pub const PADDED_DIM: usize = SUBSCENE_DIM + 2 * PAD;
/// Spatial size of one quadrant tile.
pub const TILE_DIM: usize = PADDED_DIM / 2;
/// Tiles produced per subscene or mask.
pub const TILES_PER_SCENE: usize = 4;
/// Reflectance multiplier applied before the u16 cast.
pub const REFLECTANCE_SCALE: f64 = 10_000.0;
/// Number of one-hot channels in a mask.
pub const NUM_CLASSES: usize = 3;
/// Number of Sentinel-2 bands described by the dataset descriptor.
pub const MAX_BANDS: usize = 13;

/// Quadrant of a padded 1024x1024 array, in emission order.
///
/// The coordinate label depends on the index only and is never recomputed
/// from the pixels of a tile.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; TILES_PER_SCENE] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row offset of the quadrant inside the padded array.
    pub fn row_offset(self) -> usize {
        match self {
            Quadrant::TopLeft | Quadrant::TopRight => 0,
            Quadrant::BottomLeft | Quadrant::BottomRight => TILE_DIM,
        }
    }

    /// Column offset of the quadrant inside the padded array.
    pub fn col_offset(self) -> usize {
        match self {
            Quadrant::TopLeft | Quadrant::BottomLeft => 0,
            Quadrant::TopRight | Quadrant::BottomRight => TILE_DIM,
        }
    }

    pub fn coordinate_label(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "rows 0-511, cols 0-511",
            Quadrant::TopRight => "rows 0-511, cols 512-1023",
            Quadrant::BottomLeft => "rows 512-1023, cols 0-511",
            Quadrant::BottomRight => "rows 512-1023, cols 512-1023",
        }
    }

    /// Output filename of this quadrant's tile for a given source file.
    pub fn tile_filename(self, source_filename: &str) -> String {
        format!("tile_{}_{}", self.index(), source_filename)
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coordinate_label())
    }
}

/// Mask class index after one-hot decoding.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum MaskClass {
    Clear,
    Cloud,
    CloudShadow,
}

impl MaskClass {
    pub const ALL: [MaskClass; NUM_CLASSES] =
        [MaskClass::Clear, MaskClass::Cloud, MaskClass::CloudShadow];

    pub fn index(self) -> u8 {
        match self {
            MaskClass::Clear => 0,
            MaskClass::Cloud => 1,
            MaskClass::CloudShadow => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaskClass::Clear => "Clear",
            MaskClass::Cloud => "Cloud",
            MaskClass::CloudShadow => "Cloud Shadow",
        }
    }
}

impl std::fmt::Display for MaskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which part of the pipeline a CLI invocation runs.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Stage {
    /// Image pass, mask pass, tile metadata and dataset metadata in one process
    All,
    /// Image pass only; persists the handoff metadata
    Images,
    /// Mask pass only; extends the persisted handoff metadata
    Masks,
    /// Merge the handoff metadata into the tile CSV
    TileMetadata,
    /// Write the static dataset descriptor
    DatasetMetadata,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::All => write!(f, "All"),
            Stage::Images => write!(f, "Images"),
            Stage::Masks => write!(f, "Masks"),
            Stage::TileMetadata => write!(f, "TileMetadata"),
            Stage::DatasetMetadata => write!(f, "DatasetMetadata"),
        }
    }
}
