use crate::common::calibration::{
    OptimizationParameterSet, SPLITTING_PARAMETER_COUNT, STANDARD_CALIBRATION,
};
use crate::domain::{RegressionSet, SurrogateError, SurrogateResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplittingParameters {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
    pub epsilon: f64,
}

impl SplittingParameters {
    /// Clips every entry into `[0, 1]`.
    pub fn from_raw(raw: [f64; SPLITTING_PARAMETER_COUNT]) -> Self {
        let [alpha, beta, gamma, delta, epsilon] = raw.map(|value| value.clamp(0.0, 1.0));
        Self {
            alpha,
            beta,
            gamma,
            delta,
            epsilon,
        }
    }

    pub fn as_array(&self) -> [f64; SPLITTING_PARAMETER_COUNT] {
        [self.alpha, self.beta, self.gamma, self.delta, self.epsilon]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SplittingParameterModel<'a> {
    calibration: &'a OptimizationParameterSet,
}

impl Default for SplittingParameterModel<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_CALIBRATION)
    }
}

impl<'a> SplittingParameterModel<'a> {
    pub fn new(calibration: &'a OptimizationParameterSet) -> Self {
        Self { calibration }
    }

    pub fn evaluate(
        &self,
        carbon: f64,
        hydrogen: f64,
        set: RegressionSet,
    ) -> SurrogateResult<SplittingParameters> {
        if !carbon.is_finite() || !hydrogen.is_finite() {
            return Err(SurrogateError::InvalidComposition(format!(
                "splitting regression needs finite C and H, got C={carbon}, H={hydrogen}"
            )));
        }

        let mut raw = [0.0; SPLITTING_PARAMETER_COUNT];
        for (parameter, value) in raw.iter_mut().enumerate() {
            let (intercept, carbon_slope, hydrogen_slope) =
                self.calibration.column(set, parameter);
            *value = intercept + carbon_slope * carbon + hydrogen_slope * hydrogen;
        }

        Ok(SplittingParameters::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::{SplittingParameterModel, SplittingParameters};
    use crate::common::calibration::OptimizationParameterSet;
    use crate::domain::RegressionSet;

    #[test]
    fn wood_regression_matches_hand_evaluation() {
        let parameters = SplittingParameterModel::default()
            .evaluate(0.53, 0.06, RegressionSet::Wood)
            .expect("finite inputs");

        let alpha = 1.503 - 0.037 * 0.53 - 13.807 * 0.06;
        let gamma = 12.697 - 25.284 * 0.53 + 12.461 * 0.06;
        assert!((parameters.alpha - alpha).abs() < 1.0e-12);
        assert!((parameters.gamma - gamma).abs() < 1.0e-12);
        assert!((parameters.alpha - 0.6550).abs() < 1.0e-4);
        assert!((parameters.beta - 0.9218).abs() < 1.0e-4);
        assert!((parameters.gamma - 0.0441).abs() < 1.0e-4);
        assert!((parameters.delta - 0.8722).abs() < 1.0e-4);
        assert!((parameters.epsilon - 0.8317).abs() < 1.0e-4);
    }

    #[test]
    fn regression_output_is_clipped_into_unit_interval() {
        let model = SplittingParameterModel::default();
        let grid = [0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0];
        for set in [RegressionSet::Overall, RegressionSet::Grass, RegressionSet::Wood] {
            for carbon in grid {
                for hydrogen in grid {
                    let parameters = model.evaluate(carbon, hydrogen, set).expect("finite");
                    for value in parameters.as_array() {
                        assert!((0.0..=1.0).contains(&value), "{set:?} C={carbon} H={hydrogen}");
                    }
                }
            }
        }
    }

    #[test]
    fn clipping_saturates_at_both_bounds() {
        let parameters = SplittingParameters::from_raw([-2.5, 3.0, 0.25, 1.0, 0.0]);
        assert_eq!(parameters.as_array(), [0.0, 1.0, 0.25, 1.0, 0.0]);
    }

    #[test]
    fn custom_calibration_blocks_are_honoured() {
        let zero = [[0.0; 5]; 3];
        let half = [[0.5; 5], [0.0; 5], [0.0; 5]];
        let calibration = OptimizationParameterSet::new(zero, half, zero);

        let parameters = SplittingParameterModel::new(&calibration)
            .evaluate(0.5, 0.06, RegressionSet::Grass)
            .expect("finite");
        assert_eq!(parameters.as_array(), [0.5; 5]);
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let error = SplittingParameterModel::default()
            .evaluate(f64::NAN, 0.06, RegressionSet::Overall)
            .expect_err("NaN should fail");
        assert_eq!(error.placeholder(), "INPUT.INVALID_COMPOSITION");
    }
}
