//! Array transforms: spatial padding, quadrant tiling, and the image/mask
//! tile encoders.
pub mod encode;
pub mod padding;
pub mod tiling;
