//! Positive-definite solve helpers shared by the fitters

use crate::model::error::{ModelError, ModelResult};
use faer::linalg::solvers::{Llt, Solve};
use faer::{Mat, Side};

/// Cholesky-factor a symmetric positive definite matrix; a failed
/// factorization surfaces as `SingularMatrix`.
pub(crate) fn factor_spd(matrix: &Mat<f64>) -> ModelResult<Llt<f64>> {
    matrix
        .as_ref()
        .llt(Side::Lower)
        .map_err(|_| ModelError::SingularMatrix)
}

/// Invert through the factorization and verify the residual
/// max |A·A⁻¹ − I|. A rank-deficient system whose tiny pivot survives
/// rounding still fails this check.
pub(crate) fn verified_inverse(matrix: &Mat<f64>, llt: &Llt<f64>) -> ModelResult<Mat<f64>> {
    let p = matrix.nrows();
    let eye = Mat::<f64>::identity(p, p);
    let inverse = llt.solve(eye.as_ref());

    let product = matrix.as_ref() * inverse.as_ref();
    for i in 0..p {
        for j in 0..p {
            let expected = if i == j { 1.0 } else { 0.0 };
            let entry = product[(i, j)];
            if !entry.is_finite() || (entry - expected).abs() > 1e-3 {
                return Err(ModelError::SingularMatrix);
            }
        }
    }

    Ok(inverse)
}
