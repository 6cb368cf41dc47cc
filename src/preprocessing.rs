//! Feature standardization.
//!
//! Provides a `StandardScaler` for per-column mean/std standardization.
//! The scaler is fit once on the full feature matrix and then applied
//! uniformly to the train and test partitions, so both sides see the same
//! transform.

use crate::math::Array2;

/// Per-column mean/std standard scaler.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl StandardScaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f32 = 1e-6;

    /// Fit a scaler from a matrix where rows are samples and columns are
    /// features. Panics on an empty matrix.
    pub fn fit(x: &Array2<f32>) -> StandardScaler {
        let (nrows, ncols) = x.shape();
        assert!(
            nrows > 0 && ncols > 0,
            "StandardScaler::fit requires non-empty matrix"
        );

        let mut mean = vec![0.0f32; ncols];
        for r in 0..nrows {
            for c in 0..ncols {
                mean[c] += x[(r, c)];
            }
        }
        let nrows_f = nrows as f32;
        for v in mean.iter_mut() {
            *v /= nrows_f;
        }

        let mut std = vec![0.0f32; ncols];
        for r in 0..nrows {
            for c in 0..ncols {
                let d = x[(r, c)] - mean[c];
                std[c] += d * d;
            }
        }
        for v in std.iter_mut() {
            *v = (*v / nrows_f).sqrt().max(Self::MIN_STD);
        }

        StandardScaler { mean, std }
    }

    /// Transform all rows and return a new matrix.
    pub fn transform(&self, x: &Array2<f32>) -> Array2<f32> {
        let (nrows, ncols) = x.shape();
        assert_eq!(ncols, self.mean.len(), "column count mismatch");
        let mut out = Vec::with_capacity(nrows * ncols);

        for r in 0..nrows {
            for c in 0..ncols {
                out.push((x[(r, c)] - self.mean[c]) / self.std[c]);
            }
        }

        Array2::from_shape_vec((nrows, ncols), out).expect("transform: shape mismatch")
    }

    /// Fit on `x` and transform it in one call.
    pub fn fit_transform(x: &Array2<f32>) -> (StandardScaler, Array2<f32>) {
        let scaler = Self::fit(x);
        let transformed = scaler.transform(x);
        (scaler, transformed)
    }

    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    pub fn std(&self) -> &[f32] {
        &self.std
    }
}
