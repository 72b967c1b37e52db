//! Quadrant tiling of padded subscenes.
//!
//! A padded array is split in half along rows first, then each half along
//! columns, giving tiles in `Quadrant::ALL` order. Metadata labels are derived
//! from that enumeration index alone.
use ndarray::{Array3, ArrayView3, Axis};
use num_traits::Zero;

use crate::core::processing::padding::pad_spatial;
use crate::error::{Error, Result};
use crate::types::{PADDED_DIM, Quadrant, TILE_DIM, TILES_PER_SCENE};

/// Split a 1024x1024xC array into its four 512x512xC quadrants.
pub fn split_quadrants<'a, A>(
    padded: ArrayView3<'a, A>,
) -> Result<[ArrayView3<'a, A>; TILES_PER_SCENE]> {
    let (rows, cols, channels) = padded.dim();
    if rows != PADDED_DIM || cols != PADDED_DIM {
        return Err(Error::Shape {
            expected: format!("({PADDED_DIM}, {PADDED_DIM}, C)"),
            found: format!("({rows}, {cols}, {channels})"),
        });
    }
    Ok(split_unchecked(padded))
}

fn split_unchecked<'a, A>(padded: ArrayView3<'a, A>) -> [ArrayView3<'a, A>; TILES_PER_SCENE] {
    let (top, bottom) = padded.split_at(Axis(0), TILE_DIM);
    let (top_left, top_right) = top.split_at(Axis(1), TILE_DIM);
    let (bottom_left, bottom_right) = bottom.split_at(Axis(1), TILE_DIM);
    [top_left, top_right, bottom_left, bottom_right]
}

/// A subscene or mask after zero padding, ready to be cut into tiles.
#[derive(Debug, Clone)]
pub struct PaddedScene<A> {
    data: Array3<A>,
}

impl<A> PaddedScene<A>
where
    A: Clone + Zero,
{
    pub fn from_subscene(input: ArrayView3<'_, A>) -> Result<Self> {
        Ok(Self {
            data: pad_spatial(input)?,
        })
    }
}

impl<A> PaddedScene<A> {
    pub fn view(&self) -> ArrayView3<'_, A> {
        self.data.view()
    }

    /// Tiles in emission order, each paired with its quadrant.
    pub fn tiles(&self) -> impl Iterator<Item = (Quadrant, ArrayView3<'_, A>)> {
        Quadrant::ALL
            .into_iter()
            .zip(split_unchecked(self.data.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SUBSCENE_DIM;
    use ndarray::s;

    #[test]
    fn quadrants_match_padded_regions() {
        let input = Array3::<f32>::from_shape_fn((SUBSCENE_DIM, SUBSCENE_DIM, 2), |(r, c, b)| {
            (r * 10_000 + c * 10 + b) as f32
        });
        let scene = PaddedScene::from_subscene(input.view()).unwrap();
        let padded = scene.view();

        let tiles: Vec<_> = scene.tiles().collect();
        assert_eq!(tiles.len(), TILES_PER_SCENE);
        for (quadrant, tile) in tiles {
            assert_eq!(tile.dim(), (TILE_DIM, TILE_DIM, 2));
            let r0 = quadrant.row_offset();
            let c0 = quadrant.col_offset();
            let region = padded.slice(s![r0..r0 + TILE_DIM, c0..c0 + TILE_DIM, ..]);
            assert_eq!(tile, region);
        }
    }

    #[test]
    fn corner_pixels_land_in_expected_quadrants() {
        let mut input = Array3::<u8>::zeros((SUBSCENE_DIM, SUBSCENE_DIM, 1));
        input[[0, 0, 0]] = 1;
        input[[0, SUBSCENE_DIM - 1, 0]] = 2;
        input[[SUBSCENE_DIM - 1, 0, 0]] = 3;
        input[[SUBSCENE_DIM - 1, SUBSCENE_DIM - 1, 0]] = 4;
        let scene = PaddedScene::from_subscene(input.view()).unwrap();
        let tiles: Vec<_> = scene.tiles().map(|(_, t)| t).collect();
        assert_eq!(tiles[0][[1, 1, 0]], 1);
        assert_eq!(tiles[1][[1, TILE_DIM - 2, 0]], 2);
        assert_eq!(tiles[2][[TILE_DIM - 2, 1, 0]], 3);
        assert_eq!(tiles[3][[TILE_DIM - 2, TILE_DIM - 2, 0]], 4);
    }

    #[test]
    fn split_rejects_unpadded_input() {
        let input = Array3::<u8>::zeros((SUBSCENE_DIM, SUBSCENE_DIM, 1));
        assert!(matches!(
            split_quadrants(input.view()),
            Err(Error::Shape { .. })
        ));
    }
}
