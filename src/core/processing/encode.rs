use ndarray::{Array2, Array3, ArrayView1, ArrayView3, Axis, Zip};

use crate::error::{Error, Result};
use crate::types::{NUM_CLASSES, REFLECTANCE_SCALE};

/// Scale a reflectance value into u16: round(clip(v * 10000, 0, 65535)).
/// NaN encodes to 0.
pub fn encode_reflectance<A: Copy + Into<f64>>(value: A) -> u16 {
    let scaled = value.into() * REFLECTANCE_SCALE;
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, u16::MAX as f64).round() as u16
}

/// Inverse of `encode_reflectance` within rounding and clipping.
pub fn decode_reflectance(value: u16) -> f64 {
    value as f64 / REFLECTANCE_SCALE
}

/// Element-wise reflectance encoding of a float tile.
pub fn encode_image_tile<A: Copy + Into<f64>>(tile: ArrayView3<'_, A>) -> Array3<u16> {
    tile.mapv(|v| encode_reflectance(v))
}

/// Index of the largest value; the lowest index wins ties.
pub fn argmax_lowest<A: PartialOrd>(lane: ArrayView1<'_, A>) -> u8 {
    let mut best = 0usize;
    for i in 1..lane.len() {
        if lane[i] > lane[best] {
            best = i;
        }
    }
    best as u8
}

/// Collapse a one-hot (rows, cols, 3) tile into a single-channel class-index tile.
/// All-zero pixels (the padded border) decode to class 0, CLEAR.
pub fn encode_mask_tile<A: PartialOrd>(tile: ArrayView3<'_, A>) -> Result<Array2<u8>> {
    let (rows, cols, channels) = tile.dim();
    if channels != NUM_CLASSES {
        return Err(Error::Shape {
            expected: format!("({rows}, {cols}, {NUM_CLASSES})"),
            found: format!("({rows}, {cols}, {channels})"),
        });
    }
    Ok(Zip::from(tile.lanes(Axis(2))).map_collect(|lane| argmax_lowest(lane)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, arr1};

    #[test]
    fn reflectance_is_scaled_rounded_and_clipped() {
        assert_eq!(encode_reflectance(0.0f32), 0);
        assert_eq!(encode_reflectance(0.1234f32), 1234);
        assert_eq!(encode_reflectance(0.12345f64), 1235);
        assert_eq!(encode_reflectance(-0.2f32), 0);
        assert_eq!(encode_reflectance(7.0f32), u16::MAX);
        assert_eq!(encode_reflectance(f32::NAN), 0);
        assert_eq!(encode_reflectance(f64::INFINITY), u16::MAX);
    }

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        assert_eq!(argmax_lowest(arr1(&[0.0f32, 0.0, 0.0]).view()), 0);
        assert_eq!(argmax_lowest(arr1(&[0.2f32, 0.7, 0.1]).view()), 1);
        assert_eq!(argmax_lowest(arr1(&[0u8, 1, 1]).view()), 1);
        assert_eq!(argmax_lowest(arr1(&[false, false, true]).view()), 2);
    }

    #[test]
    fn mask_tile_decodes_each_pixel() {
        let mut tile = Array3::<f32>::zeros((2, 2, 3));
        tile[[0, 1, 1]] = 1.0;
        tile[[1, 0, 2]] = 1.0;
        tile[[1, 1, 0]] = 1.0;
        let decoded = encode_mask_tile(tile.view()).unwrap();
        assert_eq!(decoded, ndarray::arr2(&[[0u8, 1], [2, 0]]));
    }

    #[test]
    fn mask_tile_requires_three_channels() {
        let tile = Array3::<f32>::zeros((2, 2, 4));
        assert!(matches!(
            encode_mask_tile(tile.view()),
            Err(Error::Shape { .. })
        ));
    }
}
