//! Reference mixtures: calibrated blends of two or three reference species
//! forming the vertices of the characterization triangle.

use super::splitting::SplittingParameters;
use crate::common::constants::{
    CARBON_ATOMIC_WEIGHT, HYDROGEN_ATOMIC_WEIGHT, OXYGEN_ATOMIC_WEIGHT, molecular_weight,
};
use crate::common::species::ReferenceSpecies;
use crate::domain::{MixtureRole, SurrogateError, SurrogateResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixtureComponent {
    pub species: ReferenceSpecies,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceMixture {
    role: MixtureRole,
    composition: Vec<MixtureComponent>,
    carbon_atoms: f64,
    hydrogen_atoms: f64,
    oxygen_atoms: f64,
    molecular_weight: f64,
    carbon_fraction: f64,
    hydrogen_fraction: f64,
    oxygen_fraction: f64,
    fraction: f64,
}

impl ReferenceMixture {
    /// Aggregates a weight map into atom counts, molecular weight and
    /// elemental mass fractions. `fraction` starts at zero.
    pub fn from_weights(
        role: MixtureRole,
        weights: &[(ReferenceSpecies, f64)],
    ) -> SurrogateResult<Self> {
        let invalid = |reason: String| SurrogateError::InvalidMixture {
            mixture: role.as_str(),
            reason,
        };

        if weights.is_empty() {
            return Err(invalid("no species weights supplied".to_string()));
        }
        if let Some((species, weight)) = weights.iter().find(|(_, weight)| !weight.is_finite()) {
            return Err(invalid(format!("weight of {species} is not finite ({weight})")));
        }

        let (mut carbon, mut hydrogen, mut oxygen) = (0.0, 0.0, 0.0);
        for (species, weight) in weights {
            let record = species.record();
            carbon += weight * f64::from(record.carbon_atoms);
            hydrogen += weight * f64::from(record.hydrogen_atoms);
            oxygen += weight * f64::from(record.oxygen_atoms);
        }

        if carbon < 0.0 || hydrogen < 0.0 || oxygen < 0.0 {
            return Err(invalid(format!(
                "aggregate atom counts must be non-negative, got C={carbon}, H={hydrogen}, O={oxygen}"
            )));
        }

        let weight = molecular_weight(carbon, hydrogen, oxygen);
        if weight <= 0.0 {
            return Err(invalid("blend has zero molecular weight".to_string()));
        }

        Ok(Self {
            role,
            composition: weights
                .iter()
                .map(|&(species, weight)| MixtureComponent { species, weight })
                .collect(),
            carbon_atoms: carbon,
            hydrogen_atoms: hydrogen,
            oxygen_atoms: oxygen,
            molecular_weight: weight,
            carbon_fraction: carbon * CARBON_ATOMIC_WEIGHT / weight,
            hydrogen_fraction: hydrogen * HYDROGEN_ATOMIC_WEIGHT / weight,
            oxygen_fraction: oxygen * OXYGEN_ATOMIC_WEIGHT / weight,
            fraction: 0.0,
        })
    }

    pub fn with_fraction(self, fraction: f64) -> Self {
        Self { fraction, ..self }
    }

    pub fn role(&self) -> MixtureRole {
        self.role
    }

    pub fn composition(&self) -> &[MixtureComponent] {
        &self.composition
    }

    /// Weight of `species` in this blend, zero when it is not a member.
    pub fn weight_of(&self, species: ReferenceSpecies) -> f64 {
        self.composition
            .iter()
            .filter(|component| component.species == species)
            .map(|component| component.weight)
            .sum()
    }

    pub fn contains(&self, species: ReferenceSpecies) -> bool {
        self.composition
            .iter()
            .any(|component| component.species == species)
    }

    pub fn atom_counts(&self) -> (f64, f64, f64) {
        (self.carbon_atoms, self.hydrogen_atoms, self.oxygen_atoms)
    }

    pub fn molecular_weight(&self) -> f64 {
        self.molecular_weight
    }

    pub fn carbon_fraction(&self) -> f64 {
        self.carbon_fraction
    }

    pub fn hydrogen_fraction(&self) -> f64 {
        self.hydrogen_fraction
    }

    pub fn oxygen_fraction(&self) -> f64 {
        self.oxygen_fraction
    }

    /// Mole fraction of this mixture in the three-mixture blend.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

pub struct MixtureBuilder;

impl MixtureBuilder {
    pub fn weights(
        role: MixtureRole,
        parameters: &SplittingParameters,
    ) -> Vec<(ReferenceSpecies, f64)> {
        let SplittingParameters {
            alpha,
            beta,
            gamma,
            delta,
            epsilon,
        } = *parameters;

        match role {
            MixtureRole::Rm1 => vec![
                (ReferenceSpecies::Cellulose, alpha),
                (ReferenceSpecies::Hemicellulose, 1.0 - alpha),
            ],
            MixtureRole::Rm2 => vec![
                (ReferenceSpecies::LigninH, delta * beta),
                (ReferenceSpecies::LigninC, delta * (1.0 - beta)),
                (
                    ReferenceSpecies::Triglyceride,
                    1.0 - delta * beta - delta * (1.0 - beta),
                ),
            ],
            MixtureRole::Rm3 => vec![
                (ReferenceSpecies::LigninO, epsilon * gamma),
                (ReferenceSpecies::LigninC, epsilon * (1.0 - gamma)),
                (
                    ReferenceSpecies::Tannin,
                    1.0 - epsilon * gamma - epsilon * (1.0 - gamma),
                ),
            ],
        }
    }

    pub fn build(parameters: &SplittingParameters) -> SurrogateResult<[ReferenceMixture; 3]> {
        let [rm1, rm2, rm3] = MixtureRole::ALL;
        Ok([
            ReferenceMixture::from_weights(rm1, &Self::weights(rm1, parameters))?,
            ReferenceMixture::from_weights(rm2, &Self::weights(rm2, parameters))?,
            ReferenceMixture::from_weights(rm3, &Self::weights(rm3, parameters))?,
        ])
    }
}
