//! Conversion helpers shared by the `linfa`-backed model wrappers.
//!
//! The crate-wide arrays are `math::{Array1, Array2}` over `f32`; the
//! `linfa` family of crates wants `ndarray` containers over `f64`, so the
//! conversion lives here instead of being repeated per model.

use crate::math::Array2;

/// Convert the crate feature matrix into an owned `ndarray` f64 matrix.
pub fn to_ndarray_f64(x: &Array2<f32>) -> ndarray::Array2<f64> {
    let (nrows, ncols) = x.shape();
    let data = x.as_slice().iter().map(|&v| v as f64).collect::<Vec<_>>();
    ndarray::Array2::from_shape_vec((nrows, ncols), data)
        .expect("feature matrix shape mismatch during ndarray conversion")
}

/// Labels as an owned `ndarray` vector.
pub fn labels_to_ndarray(y: &[i32]) -> ndarray::Array1<i32> {
    ndarray::Array1::from(y.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Array2;

    #[test]
    fn conversion_preserves_shape_and_values() {
        let x = Array2::from_shape_vec((2, 3), vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let nd = to_ndarray_f64(&x);
        assert_eq!(nd.shape(), &[2, 3]);
        assert_eq!(nd[[1, 2]], 6.0);
    }
}
