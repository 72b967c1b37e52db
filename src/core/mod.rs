//! Core building blocks: geometry transforms and tile encoders, processing
//! parameters, and the tile metadata accumulator. These are internal
//! primitives consumed by the high-level `api` module.
pub mod metadata;
pub mod params;
pub mod processing;
