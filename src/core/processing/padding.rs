use ndarray::{Array3, ArrayView3, s};
use num_traits::Zero;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{PAD, PADDED_DIM, SUBSCENE_DIM};

/// Fail with `Error::Shape` unless `dim` has 1022x1022 spatial extent.
pub fn ensure_subscene_shape(dim: (usize, usize, usize)) -> Result<()> {
    let (rows, cols, channels) = dim;
    if rows != SUBSCENE_DIM || cols != SUBSCENE_DIM {
        return Err(Error::Shape {
            expected: format!("({SUBSCENE_DIM}, {SUBSCENE_DIM}, C)"),
            found: format!("({rows}, {cols}, {channels})"),
        });
    }
    Ok(())
}

/// Zero-pad both spatial axes of a 1022x1022xC array by one pixel per side,
/// producing a new 1024x1024xC array. Channels are left untouched.
pub fn pad_spatial<A>(input: ArrayView3<'_, A>) -> Result<Array3<A>>
where
    A: Clone + Zero,
{
    ensure_subscene_shape(input.dim())?;
    let channels = input.dim().2;

    debug!(
        "Adding padding: rows={}, cols={}, pad={}, final={}x{}x{}",
        SUBSCENE_DIM, SUBSCENE_DIM, PAD, PADDED_DIM, PADDED_DIM, channels
    );

    let mut padded = Array3::<A>::zeros((PADDED_DIM, PADDED_DIM, channels));
    padded
        .slice_mut(s![PAD..PAD + SUBSCENE_DIM, PAD..PAD + SUBSCENE_DIM, ..])
        .assign(&input);
    Ok(padded)
}
