use log::warn;
use ndarray::{Array1, Array2};
use ndarray_linalg::error::LinalgError;
use ndarray_linalg::{QR, SVD};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Iteration budget of the power-iteration fallback.
pub const DEFAULT_MAX_ITERATIONS: usize = 500;
/// Relative change of the eigenvalue estimate that ends the power iteration.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// What to report when the SVD of the canonical cross-product does not converge.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SvdFallback {
    /// Leading singular value from power iteration on `M^T M`.
    #[default]
    PowerIteration,
    /// Report a correlation of zero.
    Zero,
}

/// Leading canonical correlation between two observation-by-variable blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalCorrelation {
    pub fallback: SvdFallback,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for CanonicalCorrelation {
    fn default() -> Self {
        Self {
            fallback: SvdFallback::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl CanonicalCorrelation {
    /// Largest singular value of `Qx^T Qy`, where `Qx` and `Qy` are thin
    /// orthonormal bases of the column spaces of `x` and `y`.
    ///
    /// Both blocks must have the same number of rows, at least as many as
    /// their columns.
    pub fn leading(&self, x: &Array2<f64>, y: &Array2<f64>) -> Result<f64, LinalgError> {
        let qx = orthonormal_basis(x)?;
        let qy = orthonormal_basis(y)?;
        let cross = qx.t().dot(&qy);
        match cross.svd(false, false) {
            Ok((_, singular, _)) => Ok(singular.iter().copied().fold(0.0, f64::max)),
            Err(err) => {
                let recovered = self.recover(&cross);
                warn!(
                    "SVD of the {}x{} canonical cross-product failed ({err}); {} fallback gives {recovered}",
                    cross.nrows(),
                    cross.ncols(),
                    self.fallback,
                );
                Ok(recovered)
            }
        }
    }

    fn recover(&self, cross: &Array2<f64>) -> f64 {
        match self.fallback {
            SvdFallback::PowerIteration => {
                leading_singular_value(cross, self.max_iterations, self.tolerance)
            }
            SvdFallback::Zero => 0.0,
        }
    }
}

/// Thin `Q` factor: `rows x min(rows, cols)` with orthonormal columns.
pub fn orthonormal_basis(block: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    let (q, _r) = block.qr()?;
    Ok(q)
}

/// Largest singular value of `m` by power iteration on `m^T m`.
pub fn leading_singular_value(m: &Array2<f64>, max_iterations: usize, tolerance: f64) -> f64 {
    let cols = m.ncols();
    if cols == 0 || m.nrows() == 0 {
        return 0.0;
    }
    let gram = m.t().dot(m);
    // Uneven start so it is not orthogonal to the dominant direction by symmetry.
    let mut v = Array1::from_shape_fn(cols, |i| 1.0 + i as f64 / cols as f64);
    let norm = v.dot(&v).sqrt();
    v /= norm;

    let mut eigenvalue = 0.0;
    for _ in 0..max_iterations {
        let w = gram.dot(&v);
        let norm = w.dot(&w).sqrt();
        if norm == 0.0 {
            return 0.0;
        }
        v = w / norm;
        let converged = (norm - eigenvalue).abs() <= tolerance * norm;
        eigenvalue = norm;
        if converged {
            break;
        }
    }
    eigenvalue.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn basis_has_orthonormal_columns() {
        let block = array![[1.0, 2.0], [3.0, 4.0], [5.0, 7.0], [1.0, 0.0]];
        let q = orthonormal_basis(&block).unwrap();
        assert_eq!(q.dim(), (4, 2));
        let gram = q.t().dot(&q);
        for ((i, j), &g) in gram.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(g, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn identical_blocks_are_perfectly_correlated() {
        let x = array![[1.0], [2.0], [4.0], [8.0]];
        let cca = CanonicalCorrelation::default();
        assert_abs_diff_eq!(cca.leading(&x, &x).unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn orthogonal_blocks_are_uncorrelated() {
        let x = array![[1.0], [-1.0], [1.0], [-1.0]];
        let y = array![[1.0], [1.0], [-1.0], [-1.0]];
        let cca = CanonicalCorrelation::default();
        assert_abs_diff_eq!(cca.leading(&x, &y).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn correlation_is_bounded_by_one() {
        let x = array![[1.0, 0.3], [2.0, -1.0], [0.5, 2.0], [3.0, 1.0], [-1.0, 0.0]];
        let y = array![[0.2], [1.5], [-0.7], [2.2], [0.1]];
        let rho = CanonicalCorrelation::default().leading(&x, &y).unwrap();
        assert!((0.0..=1.0 + 1e-12).contains(&rho));
    }

    #[test]
    fn power_iteration_agrees_with_svd() {
        let m = array![[0.9, 0.1, 0.0], [0.2, 0.4, 0.3]];
        let (_, s, _) = m.svd(false, false).unwrap();
        assert_abs_diff_eq!(leading_singular_value(&m, 1000, 1e-14), s[0], epsilon = 1e-8);
    }

    #[test]
    fn power_iteration_on_zero_matrix_is_zero() {
        let m = Array2::<f64>::zeros((2, 2));
        assert_eq!(leading_singular_value(&m, 10, 1e-12), 0.0);
        assert_eq!(leading_singular_value(&Array2::zeros((0, 3)), 10, 1e-12), 0.0);
    }

    #[test]
    fn zero_fallback_reports_zero() {
        let cca = CanonicalCorrelation {
            fallback: SvdFallback::Zero,
            ..Default::default()
        };
        assert_eq!(cca.recover(&array![[0.5]]), 0.0);
        assert_abs_diff_eq!(
            CanonicalCorrelation::default().recover(&array![[0.5]]),
            0.5,
            epsilon = 1e-12
        );
    }
}
