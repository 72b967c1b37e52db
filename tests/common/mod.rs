#![allow(dead_code)]

use std::fs;
use std::path::Path;

use ndarray::Array3;
use ndarray_npy::write_npy;
use s2catalogue::ProcessingParams;
use s2catalogue::types::SUBSCENE_DIM;

/// Deterministic reflectance in [0, 1.2) so some values clip after scaling.
pub fn reflectance(seed: usize, r: usize, c: usize, b: usize) -> f32 {
    ((seed * 131 + r * 7 + c * 3 + b * 11) % 1200) as f32 / 1000.0
}

pub fn mask_class(seed: usize, r: usize, c: usize) -> usize {
    (seed + r / 100 + c / 100) % 3
}

pub fn subscene(seed: usize, bands: usize) -> Array3<f32> {
    Array3::from_shape_fn((SUBSCENE_DIM, SUBSCENE_DIM, bands), |(r, c, b)| {
        reflectance(seed, r, c, b)
    })
}

pub fn one_hot_mask(seed: usize) -> Array3<u8> {
    Array3::from_shape_fn((SUBSCENE_DIM, SUBSCENE_DIM, 3), |(r, c, k)| {
        u8::from(mask_class(seed, r, c) == k)
    })
}

/// Lay out `dataset/{subscenes,masks}` and a keyed cloud table under `root`.
pub fn dataset(
    root: &Path,
    subscenes: &[&str],
    masks: &[&str],
    cloud_csv: &str,
) -> ProcessingParams {
    let subscene_dir = root.join("dataset").join("subscenes");
    let mask_dir = root.join("dataset").join("masks");
    fs::create_dir_all(&subscene_dir).unwrap();
    fs::create_dir_all(&mask_dir).unwrap();

    for (seed, name) in subscenes.iter().enumerate() {
        write_npy(subscene_dir.join(name), &subscene(seed, 4)).unwrap();
    }
    for (seed, name) in masks.iter().enumerate() {
        write_npy(mask_dir.join(name), &one_hot_mask(seed)).unwrap();
    }
    let cloud_table = root.join("dataset").join("classification_tags.csv");
    fs::write(&cloud_table, cloud_csv).unwrap();

    ProcessingParams {
        subscene_dir,
        mask_dir,
        cloud_table,
        output_dir: root.join("s2_catalogue"),
        num_bands: 3,
        ..Default::default()
    }
}
