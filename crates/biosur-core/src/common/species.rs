//! Reference species catalog.
//!
//! The seven biopolymer building blocks used by the surrogate model, keyed by
//! [`ReferenceSpecies`]. Elemental mass fractions are derived at compile time
//! from the atom counts and the atomic weights in [`super::constants`].

use super::constants::{
    CARBON_ATOMIC_WEIGHT, HYDROGEN_ATOMIC_WEIGHT, OXYGEN_ATOMIC_WEIGHT, molecular_weight,
};
use crate::domain::{SurrogateError, SurrogateResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const SPECIES_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReferenceSpecies {
    #[serde(rename = "CELL")]
    Cellulose,
    #[serde(rename = "HCELL")]
    Hemicellulose,
    #[serde(rename = "LIGC")]
    LigninC,
    #[serde(rename = "LIGH")]
    LigninH,
    #[serde(rename = "LIGO")]
    LigninO,
    #[serde(rename = "TGL")]
    Triglyceride,
    #[serde(rename = "TANN")]
    Tannin,
}

impl ReferenceSpecies {
    /// Catalog order.
    pub const ALL: [Self; SPECIES_COUNT] = [
        Self::Cellulose,
        Self::Hemicellulose,
        Self::LigninC,
        Self::LigninH,
        Self::LigninO,
        Self::Triglyceride,
        Self::Tannin,
    ];

    /// Order of the species block in an output composition.
    pub const OUTPUT_ORDER: [Self; SPECIES_COUNT] = [
        Self::Cellulose,
        Self::Hemicellulose,
        Self::LigninO,
        Self::LigninH,
        Self::LigninC,
        Self::Tannin,
        Self::Triglyceride,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cellulose => "CELL",
            Self::Hemicellulose => "HCELL",
            Self::LigninC => "LIGC",
            Self::LigninH => "LIGH",
            Self::LigninO => "LIGO",
            Self::Triglyceride => "TGL",
            Self::Tannin => "TANN",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Cellulose => 0,
            Self::Hemicellulose => 1,
            Self::LigninC => 2,
            Self::LigninH => 3,
            Self::LigninO => 4,
            Self::Triglyceride => 5,
            Self::Tannin => 6,
        }
    }

    pub fn record(self) -> &'static SpeciesRecord {
        &SPECIES_TABLE[self.index()]
    }
}

impl Display for ReferenceSpecies {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for ReferenceSpecies {
    type Err = SurrogateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|species| species.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| SurrogateError::UnknownSpecies(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    pub species: ReferenceSpecies,
    pub carbon_atoms: u32,
    pub hydrogen_atoms: u32,
    pub oxygen_atoms: u32,
    pub molecular_weight: u32,
    pub carbon_fraction: f64,
    pub hydrogen_fraction: f64,
    pub oxygen_fraction: f64,
}

impl SpeciesRecord {
    const fn new(
        species: ReferenceSpecies,
        carbon_atoms: u32,
        hydrogen_atoms: u32,
        oxygen_atoms: u32,
        molecular_weight_rounded: u32,
    ) -> Self {
        let carbon = carbon_atoms as f64;
        let hydrogen = hydrogen_atoms as f64;
        let oxygen = oxygen_atoms as f64;
        let exact_weight = molecular_weight(carbon, hydrogen, oxygen);

        Self {
            species,
            carbon_atoms,
            hydrogen_atoms,
            oxygen_atoms,
            molecular_weight: molecular_weight_rounded,
            carbon_fraction: carbon * CARBON_ATOMIC_WEIGHT / exact_weight,
            hydrogen_fraction: hydrogen * HYDROGEN_ATOMIC_WEIGHT / exact_weight,
            oxygen_fraction: oxygen * OXYGEN_ATOMIC_WEIGHT / exact_weight,
        }
    }

    pub fn molecular_weight_f64(&self) -> f64 {
        f64::from(self.molecular_weight)
    }
}

pub static SPECIES_TABLE: [SpeciesRecord; SPECIES_COUNT] = [
    SpeciesRecord::new(ReferenceSpecies::Cellulose, 6, 10, 5, 162),
    SpeciesRecord::new(ReferenceSpecies::Hemicellulose, 5, 8, 4, 133),
    SpeciesRecord::new(ReferenceSpecies::LigninC, 15, 14, 4, 258),
    SpeciesRecord::new(ReferenceSpecies::LigninH, 22, 28, 9, 436),
    SpeciesRecord::new(ReferenceSpecies::LigninO, 20, 22, 10, 422),
    SpeciesRecord::new(ReferenceSpecies::Triglyceride, 57, 100, 7, 896),
    SpeciesRecord::new(ReferenceSpecies::Tannin, 15, 12, 7, 304),
];

/// Looks up a species record by its canonical name (`CELL`, `HCELL`, ...).
pub fn lookup(name: &str) -> SurrogateResult<&'static SpeciesRecord> {
    name.parse::<ReferenceSpecies>().map(ReferenceSpecies::record)
}
