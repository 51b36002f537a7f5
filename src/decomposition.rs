use nalgebra::{DMatrix, DVector, SVD};
use tracing::debug;

use crate::error::{ensure_dimension, RecommendError};

/// Singular value decomposition `A = U * diag(singular_values) * V^T`.
///
/// `v` is always a square `cols x cols` orthonormal basis and the singular values are
/// non-increasing, padded with zeros when the matrix has fewer rows than columns.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub u: DMatrix<f64>,
    pub singular_values: DVector<f64>,
    pub v: DMatrix<f64>,
}

impl Decomposition {

    /// The first `dimensions` right singular vectors, one per column.
    pub fn reduced_basis(&self, dimensions: usize) -> Result<DMatrix<f64>, RecommendError> {
        if dimensions > self.v.ncols() {
            return Err(RecommendError::DimensionMismatch {
                what: "reduced basis columns",
                expected: dimensions,
                actual: self.v.ncols(),
            });
        }
        Ok(self.v.columns(0, dimensions).into_owned())
    }

    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.u * DMatrix::from_diagonal(&self.singular_values) * self.v.transpose()
    }
}

/// A linear-algebra backend able to factor the incidence matrix.
pub trait Decomposer {
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<Decomposition, RecommendError>;
}

/// Decomposition backed by nalgebra's bidiagonalising SVD.
#[derive(Debug, Clone, Copy)]
pub struct NalgebraSvd {
    pub eps: f64,
    /// Zero means no iteration limit.
    pub max_iterations: usize,
}

impl Default for NalgebraSvd {
    fn default() -> Self {
        NalgebraSvd { eps: f64::EPSILON, max_iterations: 0 }
    }
}

impl Decomposer for NalgebraSvd {

    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<Decomposition, RecommendError> {
        let (rows, cols) = matrix.shape();
        if rows == 0 || cols == 0 {
            return Err(RecommendError::DegenerateMatrix { rows, cols });
        }

        // Zero rows leave A^T A unchanged, so padding to at least `cols` rows yields the
        // complete right basis without altering the nonzero spectrum.
        let padded_rows = rows.max(cols);
        let padded = matrix.clone().resize_vertically(padded_rows, 0.0);

        let svd = SVD::try_new(padded, true, true, self.eps, self.max_iterations)
            .ok_or_else(|| RecommendError::DecompositionFailed("did not converge".to_string()))?;

        let u = svd.u.ok_or_else(|| {
            RecommendError::DecompositionFailed("left singular vectors missing".to_string())
        })?;
        let v_t = svd.v_t.ok_or_else(|| {
            RecommendError::DecompositionFailed("right singular vectors missing".to_string())
        })?;

        ensure_dimension("singular values", cols, svd.singular_values.len())?;
        ensure_dimension("right singular vectors", cols, v_t.nrows())?;

        let decomposition = sorted(
            u.rows(0, rows).into_owned(),
            svd.singular_values,
            v_t.transpose(),
        );

        debug!(
            rows,
            cols,
            largest = decomposition.singular_values.get(0).copied().unwrap_or(0.0),
            "decomposed incidence matrix"
        );

        Ok(decomposition)
    }
}

/// Reorders the factors by non-increasing singular value. Equal values keep their
/// relative order.
fn sorted(u: DMatrix<f64>, singular_values: DVector<f64>, v: DMatrix<f64>) -> Decomposition {
    let mut order: Vec<usize> = (0..singular_values.len()).collect();
    order.sort_by(|&left, &right| {
        singular_values[right].total_cmp(&singular_values[left])
    });

    let u = DMatrix::from_fn(u.nrows(), order.len(), |row, col| u[(row, order[col])]);
    let v = DMatrix::from_fn(v.nrows(), order.len(), |row, col| v[(row, order[col])]);
    let singular_values = DVector::from_fn(order.len(), |index, _| singular_values[order[index]]);

    Decomposition { u, singular_values, v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn decompose(rows: usize, cols: usize, values: &[f64]) -> (DMatrix<f64>, Decomposition) {
        let matrix = DMatrix::from_row_slice(rows, cols, values);
        let decomposition = NalgebraSvd::default().decompose(&matrix).unwrap();
        (matrix, decomposition)
    }

    fn assert_orthonormal(v: &DMatrix<f64>) {
        let identity = DMatrix::<f64>::identity(v.ncols(), v.ncols());
        assert_relative_eq!(v.transpose() * v, identity, epsilon = 1e-10);
    }

    #[test]
    fn test_reconstruction_wide_matrix() {
        let (matrix, decomposition) = decompose(2, 3, &[
            1.0, 1.0, 0.0,
            1.0, 0.0, 1.0,
        ]);

        assert_eq!(decomposition.u.shape(), (2, 3));
        assert_eq!(decomposition.v.shape(), (3, 3));
        assert_relative_eq!(decomposition.reconstruct(), matrix, epsilon = 1e-10);
        assert_orthonormal(&decomposition.v);

        assert_relative_eq!(decomposition.singular_values[0], 3.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(decomposition.singular_values[1], 1.0, epsilon = 1e-10);
        assert_relative_eq!(decomposition.singular_values[2], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_reconstruction_tall_matrix() {
        let (matrix, decomposition) = decompose(4, 3, &[
            1.0, 1.0, 0.0,
            0.0, 1.0, 1.0,
            1.0, 0.0, 1.0,
            1.0, 1.0, 1.0,
        ]);

        assert_eq!(decomposition.u.shape(), (4, 3));
        assert_eq!(decomposition.v.shape(), (3, 3));
        assert_relative_eq!(decomposition.reconstruct(), matrix, epsilon = 1e-10);
        assert_orthonormal(&decomposition.v);
    }

    #[test]
    fn test_singular_values_non_increasing() {
        let (_, decomposition) = decompose(3, 5, &[
            1.0, 0.0, 1.0, 0.0, 1.0,
            0.0, 1.0, 1.0, 0.0, 0.0,
            1.0, 1.0, 1.0, 1.0, 0.0,
        ]);

        let values = decomposition.singular_values.as_slice();
        assert_eq!(values.len(), 5);
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_single_cell() {
        let (matrix, decomposition) = decompose(1, 1, &[1.0]);

        assert_relative_eq!(decomposition.singular_values[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(decomposition.v[(0, 0)].abs(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(decomposition.reconstruct(), matrix, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_matrix_is_rejected() {
        let result = NalgebraSvd::default().decompose(&DMatrix::zeros(0, 3));
        assert!(matches!(result, Err(RecommendError::DegenerateMatrix { rows: 0, cols: 3 })));

        let result = NalgebraSvd::default().decompose(&DMatrix::zeros(2, 0));
        assert!(matches!(result, Err(RecommendError::DegenerateMatrix { rows: 2, cols: 0 })));
    }

    #[test]
    fn test_reduced_basis() {
        let (_, decomposition) = decompose(2, 3, &[
            1.0, 1.0, 0.0,
            1.0, 0.0, 1.0,
        ]);

        let basis = decomposition.reduced_basis(2).unwrap();
        assert_eq!(basis.shape(), (3, 2));
        assert_eq!(basis.column(1), decomposition.v.column(1));

        assert!(matches!(
            decomposition.reduced_basis(4),
            Err(RecommendError::DimensionMismatch { expected: 4, actual: 3, .. })
        ));
    }
}
