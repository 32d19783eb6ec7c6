//! Regression coefficients for the splitting-parameter model.
//!
//! Each block is a 3x5 matrix: row 0 holds the intercepts, row 1 the carbon
//! coefficients and row 2 the hydrogen coefficients; column `k` produces the
//! `k`-th splitting parameter (alpha, beta, gamma, delta, epsilon).

use crate::domain::RegressionSet;

pub const SPLITTING_PARAMETER_COUNT: usize = 5;
pub const REGRESSION_TERM_COUNT: usize = 3;

pub type CoefficientBlock = [[f64; SPLITTING_PARAMETER_COUNT]; REGRESSION_TERM_COUNT];

const OVERALL_BLOCK: CoefficientBlock = [
    [-0.586, 0.995, 1.015, 0.294, 0.734],
    [2.255, -0.012, -0.045, 0.986, -0.372],
    [0.0, 0.162, 0.005, 0.002, -0.021],
];

const GRASS_BLOCK: CoefficientBlock = [
    [0.626, 0.155, 6.944, -2.249, -3.501],
    [0.877, -2.11, -13.983, 0.731, 3.038],
    [-8.681, 29.643, 13.707, 33.856, 45.092],
];

const WOOD_BLOCK: CoefficientBlock = [
    [1.503, 2.079, 12.697, -1.75, -2.339],
    [-0.037, -2.16, -25.284, 3.428, 1.303],
    [-13.807, -0.207, 12.461, 13.422, 41.335],
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationParameterSet {
    blocks: [CoefficientBlock; 3],
}

impl OptimizationParameterSet {
    pub const fn new(overall: CoefficientBlock, grass: CoefficientBlock, wood: CoefficientBlock) -> Self {
        Self {
            blocks: [overall, grass, wood],
        }
    }

    pub fn block(&self, set: RegressionSet) -> &CoefficientBlock {
        &self.blocks[set.index()]
    }

    /// Coefficients `(intercept, carbon, hydrogen)` for one splitting parameter.
    pub fn column(&self, set: RegressionSet, parameter: usize) -> (f64, f64, f64) {
        let block = self.block(set);
        (block[0][parameter], block[1][parameter], block[2][parameter])
    }
}

pub static STANDARD_CALIBRATION: OptimizationParameterSet =
    OptimizationParameterSet::new(OVERALL_BLOCK, GRASS_BLOCK, WOOD_BLOCK);

#[cfg(test)]
mod tests {
    use super::{STANDARD_CALIBRATION, SPLITTING_PARAMETER_COUNT};
    use crate::domain::RegressionSet;

    #[test]
    fn blocks_are_selected_by_regression_set() {
        assert_eq!(
            STANDARD_CALIBRATION.column(RegressionSet::Overall, 0),
            (-0.586, 2.255, 0.0)
        );
        assert_eq!(
            STANDARD_CALIBRATION.column(RegressionSet::Grass, 2),
            (6.944, -13.983, 13.707)
        );
        assert_eq!(
            STANDARD_CALIBRATION.column(RegressionSet::Wood, 4),
            (-2.339, 1.303, 41.335)
        );
    }

    #[test]
    fn every_coefficient_is_finite() {
        for set in [RegressionSet::Overall, RegressionSet::Grass, RegressionSet::Wood] {
            for parameter in 0..SPLITTING_PARAMETER_COUNT {
                let (a, b, c) = STANDARD_CALIBRATION.column(set, parameter);
                assert!(a.is_finite() && b.is_finite() && c.is_finite());
            }
        }
    }
}
