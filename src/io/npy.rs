//! Memory-mapped `.npy` sources for subscenes and masks.
//!
//! A source is mapped read-only and viewed in place; only the requested
//! leading bands are copied out, so a 13-band subscene never has to be
//! resident in full to select three of its bands.
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use ndarray::{Array3, ArrayView3, s};
use ndarray_npy::ViewNpyExt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{NUM_CLASSES, SUBSCENE_DIM};

pub struct NpySource {
    path: PathBuf,
    mmap: Mmap,
}

impl NpySource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::source_read(path, e))?;
        // SAFETY: the mapping is read-only and input files are not written during a pass.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::source_read(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    /// Copy the first `k` bands as `f32`.
    ///
    /// Accepts 3-D arrays of any float, integer or `bool` dtype numpy writes
    /// for one-hot data, in either memory order. The array must be 1022x1022
    /// with at least `k` bands, or exactly `k` bands when `exact` is set.
    pub fn read_bands(&self, k: usize, exact: bool) -> Result<Array3<f32>> {
        let buf = &self.mmap[..];
        if let Ok(view) = ArrayView3::<f32>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.to_owned());
        }
        if let Ok(view) = ArrayView3::<f64>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<u8>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<u16>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<u32>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<u64>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<i8>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<i16>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<i32>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        if let Ok(view) = ArrayView3::<i64>::view_npy(buf) {
            return Ok(self.select(view, k, exact)?.mapv(|v| v as f32));
        }
        match ArrayView3::<bool>::view_npy(buf) {
            Ok(view) => Ok(self
                .select(view, k, exact)?
                .mapv(|v| if v { 1.0 } else { 0.0 })),
            Err(e) => Err(Error::source_read(
                &self.path,
                format!("expected a 3-D float, integer or bool npy array: {e}"),
            )),
        }
    }

    fn select<'a, A>(
        &self,
        view: ArrayView3<'a, A>,
        k: usize,
        exact: bool,
    ) -> Result<ArrayView3<'a, A>> {
        let (rows, cols, bands) = view.dim();
        let bands_ok = if exact { bands == k } else { bands >= k };
        if rows != SUBSCENE_DIM || cols != SUBSCENE_DIM || !bands_ok {
            let wanted = if exact {
                format!("{k}")
            } else {
                format!(">={k}")
            };
            return Err(Error::source_read(
                &self.path,
                format!(
                    "shape ({rows}, {cols}, {bands}) is incompatible with ({SUBSCENE_DIM}, {SUBSCENE_DIM}, {wanted})"
                ),
            ));
        }
        debug!(
            "Selecting bands 0..{} of {} from {:?}",
            k, bands, self.path
        );
        Ok(view.slice_move(s![.., .., ..k]))
    }
}

/// Load the first `num_bands` bands of a subscene.
pub fn load_subscene(path: &Path, num_bands: usize) -> Result<Array3<f32>> {
    NpySource::open(path)?.read_bands(num_bands, false)
}

/// Load a one-hot mask; it must carry exactly one channel per class.
pub fn load_mask(path: &Path) -> Result<Array3<f32>> {
    NpySource::open(path)?.read_bands(NUM_CLASSES, true)
}

/// List `.npy` files in `dir`, sorted by file name.
///
/// The sort is a byte-wise comparison of the UTF-8 file names; it fixes the
/// processing order of both passes independently of the filesystem.
pub fn list_npy_files(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::source_read(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::source_read(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!("Skipping non UTF-8 file name: {:?}", name);
            continue;
        };
        if name.ends_with(".npy") && entry.path().is_file() {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Axis;
    use ndarray_npy::{WritableElement, write_npy};
    use num_traits::{One, Zero};

    #[test]
    fn listing_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.npy", "a.npy", "c.txt", "10.npy"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("d.npy")).unwrap();
        let files = list_npy_files(dir.path()).unwrap();
        assert_eq!(files, vec!["10.npy", "a.npy", "b.npy"]);
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_subscene(&dir.path().join("absent.npy"), 3).unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn too_few_bands_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two_bands.npy");
        write_npy(&path, &Array3::<f32>::zeros((SUBSCENE_DIM, SUBSCENE_DIM, 2))).unwrap();
        let err = load_subscene(&path, 3).unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn wrong_spatial_shape_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.npy");
        write_npy(&path, &Array3::<f32>::zeros((16, 16, 3))).unwrap();
        assert!(matches!(
            load_subscene(&path, 3),
            Err(Error::SourceRead { .. })
        ));
    }

    #[test]
    fn leading_bands_are_selected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.npy");
        let data = Array3::<f64>::from_shape_fn((SUBSCENE_DIM, SUBSCENE_DIM, 4), |(r, c, b)| {
            if r == 7 && c == 9 { b as f64 * 0.1 } else { 0.0 }
        });
        write_npy(&path, &data).unwrap();
        let bands = load_subscene(&path, 3).unwrap();
        assert_eq!(bands.dim(), (SUBSCENE_DIM, SUBSCENE_DIM, 3));
        assert_eq!(bands[[7, 9, 0]], 0.0);
        assert!((bands[[7, 9, 2]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn masks_need_exactly_three_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.npy");
        write_npy(&path, &Array3::<u8>::zeros((SUBSCENE_DIM, SUBSCENE_DIM, 4))).unwrap();
        assert!(matches!(load_mask(&path), Err(Error::SourceRead { .. })));
    }

    fn write_one_hot<A>(path: &Path)
    where
        A: Clone + Zero + One + WritableElement,
    {
        let mut mask = Array3::<A>::zeros((SUBSCENE_DIM, SUBSCENE_DIM, NUM_CLASSES));
        mask.index_axis_mut(Axis(2), 0).fill(A::one());
        mask[[3, 4, 0]] = A::zero();
        mask[[3, 4, 2]] = A::one();
        write_npy(path, &mask).unwrap();
    }

    fn assert_loads_one_hot(path: &Path) {
        let mask = load_mask(path).unwrap();
        assert_eq!(mask.dim(), (SUBSCENE_DIM, SUBSCENE_DIM, NUM_CLASSES));
        assert_eq!(mask[[0, 0, 0]], 1.0);
        assert_eq!(mask[[0, 0, 1]], 0.0);
        assert_eq!(mask[[3, 4, 0]], 0.0);
        assert_eq!(mask[[3, 4, 2]], 1.0);
    }

    #[test]
    fn i64_masks_are_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.npy");
        write_one_hot::<i64>(&path);
        assert_loads_one_hot(&path);
    }

    #[test]
    fn i32_masks_are_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.npy");
        write_one_hot::<i32>(&path);
        assert_loads_one_hot(&path);
    }

    #[test]
    fn i16_masks_are_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.npy");
        write_one_hot::<i16>(&path);
        assert_loads_one_hot(&path);
    }

    #[test]
    fn i8_masks_are_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.npy");
        write_one_hot::<i8>(&path);
        assert_loads_one_hot(&path);
    }

    #[test]
    fn u16_masks_are_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.npy");
        write_one_hot::<u16>(&path);
        assert_loads_one_hot(&path);
    }
}
