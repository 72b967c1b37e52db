pub mod descriptor;
pub mod metadata;
pub mod npy;
