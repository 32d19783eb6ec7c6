use super::DenseMatrix;
use faer::linalg::solvers::{DenseSolveCore, PartialPivLu, Solve};

/// Rows and columns of the elemental balance system.
pub const SYSTEM_DIMENSION: usize = 3;

const SINGULAR_PIVOT_EPSILON: f64 = 1.0e-15;
const ILL_CONDITIONED_RELATIVE_PIVOT_EPSILON: f64 = 1.0e-12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LuError {
    #[error("matrix is singular at pivot index {pivot_index}")]
    SingularMatrix { pivot_index: usize },
    #[error("matrix is ill-conditioned at pivot index {pivot_index}")]
    IllConditionedMatrix { pivot_index: usize },
}

/// Row-pivoted LU factors of the 3x3 balance matrix.
///
/// Construction rejects zero or relatively tiny pivots in `U`, so `solve` and
/// `condition_number` always work on a usable factorization.
pub struct SystemFactorization {
    lu: PartialPivLu<f64>,
    matrix_norm_infty: f64,
}

impl SystemFactorization {
    pub fn new(rows: &[[f64; SYSTEM_DIMENSION]; SYSTEM_DIMENSION]) -> Result<Self, LuError> {
        let matrix = DenseMatrix::from_fn(SYSTEM_DIMENSION, SYSTEM_DIMENSION, |row, col| {
            rows[row][col]
        });
        let matrix_norm_infty = infinity_norm(&matrix);
        let lu = matrix.partial_piv_lu();

        let upper = lu.U();
        for pivot_index in 0..SYSTEM_DIMENSION {
            let pivot = upper[(pivot_index, pivot_index)].abs();
            if pivot.is_nan() || pivot <= SINGULAR_PIVOT_EPSILON {
                return Err(LuError::SingularMatrix { pivot_index });
            }
            if pivot <= matrix_norm_infty * ILL_CONDITIONED_RELATIVE_PIVOT_EPSILON {
                return Err(LuError::IllConditionedMatrix { pivot_index });
            }
        }

        Ok(Self {
            lu,
            matrix_norm_infty,
        })
    }

    pub fn solve(&self, rhs: [f64; SYSTEM_DIMENSION]) -> [f64; SYSTEM_DIMENSION] {
        let rhs = DenseMatrix::from_fn(SYSTEM_DIMENSION, 1, |row, _| rhs[row]);
        let solution = self.lu.solve(&rhs);
        std::array::from_fn(|row| solution[(row, 0)])
    }

    /// Infinity-norm condition number `||A|| * ||A^-1||`.
    pub fn condition_number(&self) -> f64 {
        self.matrix_norm_infty * infinity_norm(&self.lu.inverse())
    }
}

/// Largest absolute row sum.
fn infinity_norm(matrix: &DenseMatrix) -> f64 {
    (0..matrix.nrows())
        .map(|row| {
            (0..matrix.ncols())
                .map(|col| matrix[(row, col)].abs())
                .sum::<f64>()
        })
        .fold(0.0, f64::max)
}
