//! Converts the solved mixture blend back into species mass fractions of the
//! whole sample.

use super::mixture::ReferenceMixture;
use crate::common::constants::VANISHING_BASIS_EPSILON;
use crate::common::species::{ReferenceSpecies, SPECIES_COUNT};
use crate::domain::{ElementalComposition, OutputComposition, SurrogateError, SurrogateResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionAssembler;

impl CompositionAssembler {
    /// Expects mixtures whose `fraction` already holds the solved mole fraction.
    pub fn assemble(
        &self,
        mixtures: &[ReferenceMixture; 3],
        sample: &ElementalComposition,
    ) -> SurrogateResult<OutputComposition> {
        let moles = species_mole_amounts(mixtures);

        let average_molecular_weight: f64 = ReferenceSpecies::ALL
            .into_iter()
            .map(|species| moles[species.index()] * species.record().molecular_weight_f64())
            .sum();
        if !average_molecular_weight.is_finite()
            || average_molecular_weight.abs() <= VANISHING_BASIS_EPSILON
        {
            return Err(SurrogateError::Normalization(format!(
                "average molecular weight of the species blend vanishes ({average_molecular_weight})"
            )));
        }

        let dry_ash_free = sample.dry_ash_free_share();
        let mass = |species: ReferenceSpecies| {
            moles[species.index()] * species.record().molecular_weight_f64()
                / average_molecular_weight
                * dry_ash_free
        };

        Ok(OutputComposition {
            cellulose: mass(ReferenceSpecies::Cellulose),
            hemicellulose: mass(ReferenceSpecies::Hemicellulose),
            lignin_o: mass(ReferenceSpecies::LigninO),
            lignin_h: mass(ReferenceSpecies::LigninH),
            lignin_c: mass(ReferenceSpecies::LigninC),
            tannin: mass(ReferenceSpecies::Tannin),
            triglyceride: mass(ReferenceSpecies::Triglyceride),
            ash: sample.ash(),
            moisture: sample.moisture(),
        })
    }
}

/// Mole amount of each species, indexed by catalog order. LIGC collects
/// contributions from both RM2 and RM3.
fn species_mole_amounts(mixtures: &[ReferenceMixture; 3]) -> [f64; SPECIES_COUNT] {
    let mut moles = [0.0; SPECIES_COUNT];
    for mixture in mixtures {
        for component in mixture.composition() {
            moles[component.species.index()] += component.weight * mixture.fraction();
        }
    }
    moles
}
