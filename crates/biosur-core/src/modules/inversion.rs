//! Expresses the sample's (C, H, O) mass fractions as a blend of the three
//! reference mixtures.

use super::mixture::ReferenceMixture;
use crate::common::constants::{
    DEFAULT_MAX_CONDITION_NUMBER, DEFAULT_NORMALIZATION_TOLERANCE, VANISHING_BASIS_EPSILON,
};
use crate::domain::{ElementalComposition, SurrogateError, SurrogateResult};
use crate::numerics::{LuError, SystemFactorization};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverSettings {
    /// Systems whose infinity-norm condition number exceeds this are rejected
    /// as singular.
    pub max_condition_number: f64,
    /// Allowed deviation of `x1 + x2 + x3` from one.
    pub normalization_tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_condition_number: DEFAULT_MAX_CONDITION_NUMBER,
            normalization_tolerance: DEFAULT_NORMALIZATION_TOLERANCE,
        }
    }
}

impl SolverSettings {
    /// Both limits must be finite and positive; anything else rejects every
    /// sample.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("maxConditionNumber", self.max_condition_number),
            ("normalizationTolerance", self.normalization_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a finite positive number, got {value}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InversionSolution {
    /// Mass fraction of each mixture; negative entries mean the sample lies
    /// outside the characterization triangle.
    pub mass_fractions: [f64; 3],
    pub mole_fractions: [f64; 3],
    pub condition_number: f64,
}

impl InversionSolution {
    pub fn has_negative_mass_fraction(&self) -> bool {
        self.mass_fractions.iter().any(|value| *value < 0.0)
    }
}

pub struct LinearInversionSolver {
    settings: SolverSettings,
}

impl Default for LinearInversionSolver {
    fn default() -> Self {
        Self::new(SolverSettings::default())
    }
}

impl LinearInversionSolver {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn solve(
        &self,
        mixtures: &[ReferenceMixture; 3],
        sample: &ElementalComposition,
    ) -> SurrogateResult<InversionSolution> {
        let factorization = SystemFactorization::new(&[
            mixtures.each_ref().map(ReferenceMixture::carbon_fraction),
            mixtures.each_ref().map(ReferenceMixture::hydrogen_fraction),
            mixtures.each_ref().map(ReferenceMixture::oxygen_fraction),
        ])
        .map_err(singular_system)?;
        let condition_number = factorization.condition_number();
        if !condition_number.is_finite() || condition_number > self.settings.max_condition_number {
            return Err(SurrogateError::SingularSystem(format!(
                "condition number {condition_number:e} exceeds limit {:e}",
                self.settings.max_condition_number
            )));
        }

        let mass_fractions =
            factorization.solve([sample.carbon(), sample.hydrogen(), sample.oxygen()]);

        let total: f64 = mass_fractions.iter().sum();
        if !total.is_finite() || (total - 1.0).abs() > self.settings.normalization_tolerance {
            return Err(SurrogateError::Normalization(format!(
                "mixture mass fractions sum to {total}, expected 1"
            )));
        }

        let mole_fractions = mass_to_mole_fractions(mixtures, &mass_fractions)?;
        Ok(InversionSolution {
            mass_fractions,
            mole_fractions,
            condition_number,
        })
    }
}

/// `fraction_i = (x_i / MW_i) / sum_j (x_j / MW_j)`
pub fn mass_to_mole_fractions(
    mixtures: &[ReferenceMixture; 3],
    mass_fractions: &[f64; 3],
) -> SurrogateResult<[f64; 3]> {
    let moles = [0, 1, 2].map(|index| mass_fractions[index] / mixtures[index].molecular_weight());
    let total_moles: f64 = moles.iter().sum();
    if !total_moles.is_finite() || total_moles.abs() <= VANISHING_BASIS_EPSILON {
        return Err(SurrogateError::Normalization(format!(
            "mole basis of the mixture blend vanishes (sum of x/MW = {total_moles})"
        )));
    }

    Ok(moles.map(|value| value / total_moles))
}

fn singular_system(error: LuError) -> SurrogateError {
    SurrogateError::SingularSystem(error.to_string())
}
