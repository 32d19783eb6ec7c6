pub mod errors;

pub use errors::{ErrorCategory, SurrogateError, SurrogateResult};

use crate::common::constants::COMPOSITION_SUM_SLACK;
use crate::common::species::ReferenceSpecies;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const OUTPUT_FIELDS: [&str; 9] = [
    "CELL", "HCELL", "LIGO", "LIGH", "LIGC", "TANN", "TGL", "ASH", "MOIST",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomassClass {
    #[default]
    Others,
    Grass,
    Hardwood,
    Softwood,
}

impl BiomassClass {
    pub const ALL: [Self; 4] = [Self::Others, Self::Grass, Self::Hardwood, Self::Softwood];

    pub const fn code(self) -> u8 {
        match self {
            Self::Others => 0,
            Self::Grass => 1,
            Self::Hardwood => 2,
            Self::Softwood => 3,
        }
    }

    pub fn from_code(code: u8) -> SurrogateResult<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.code() == code)
            .ok_or_else(|| SurrogateError::UnknownBiomassClass(code.to_string()))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Others => "Others",
            Self::Grass => "Grass",
            Self::Hardwood => "Hardwood",
            Self::Softwood => "Softwood",
        }
    }

    /// Both wood classes share the wood regression block.
    pub const fn regression_set(self) -> RegressionSet {
        match self {
            Self::Others => RegressionSet::Overall,
            Self::Grass => RegressionSet::Grass,
            Self::Hardwood => RegressionSet::Wood,
            Self::Softwood => RegressionSet::Wood,
        }
    }

    /// Label under which the hemicellulose species is reported for this class.
    pub const fn hemicellulose_label(self) -> &'static str {
        match self {
            Self::Hardwood => "XYHW",
            Self::Softwood => "GMSW",
            Self::Others | Self::Grass => "XYGR",
        }
    }
}

impl Display for BiomassClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for BiomassClass {
    type Err = SurrogateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        if let Ok(code) = normalized.parse::<u8>() {
            return Self::from_code(code);
        }

        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| SurrogateError::UnknownBiomassClass(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegressionSet {
    Overall,
    Grass,
    Wood,
}

impl RegressionSet {
    pub const fn index(self) -> usize {
        match self {
            Self::Overall => 0,
            Self::Grass => 1,
            Self::Wood => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MixtureRole {
    #[serde(rename = "RM1")]
    Rm1,
    #[serde(rename = "RM2")]
    Rm2,
    #[serde(rename = "RM3")]
    Rm3,
}

impl MixtureRole {
    pub const ALL: [Self; 3] = [Self::Rm1, Self::Rm2, Self::Rm3];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rm1 => "RM1",
            Self::Rm2 => "RM2",
            Self::Rm3 => "RM3",
        }
    }
}

impl Display for MixtureRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Ultimate analysis of a sample. Oxygen is always derived as `1 - C - H`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementalComposition {
    #[serde(rename = "C")]
    carbon: f64,
    #[serde(rename = "H")]
    hydrogen: f64,
    #[serde(rename = "O")]
    oxygen: f64,
    #[serde(rename = "ASH")]
    ash: f64,
    #[serde(rename = "MOIST")]
    moisture: f64,
}

impl ElementalComposition {
    pub fn new(carbon: f64, hydrogen: f64, ash: f64, moisture: f64) -> SurrogateResult<Self> {
        for (field, value) in [("C", carbon), ("H", hydrogen), ("ASH", ash), ("MOIST", moisture)] {
            validate_mass_fraction(field, value)?;
        }

        if carbon + hydrogen > 1.0 + COMPOSITION_SUM_SLACK {
            return Err(SurrogateError::InvalidComposition(format!(
                "C + H = {} exceeds 1, oxygen would be negative",
                carbon + hydrogen
            )));
        }
        if ash + moisture > 1.0 {
            return Err(SurrogateError::InvalidComposition(format!(
                "ASH + MOIST = {} exceeds 1",
                ash + moisture
            )));
        }

        Ok(Self {
            carbon,
            hydrogen,
            oxygen: (1.0 - carbon - hydrogen).max(0.0),
            ash,
            moisture,
        })
    }

    pub fn carbon(&self) -> f64 {
        self.carbon
    }

    pub fn hydrogen(&self) -> f64 {
        self.hydrogen
    }

    pub fn oxygen(&self) -> f64 {
        self.oxygen
    }

    pub fn ash(&self) -> f64 {
        self.ash
    }

    pub fn moisture(&self) -> f64 {
        self.moisture
    }

    /// Share of the sample that is neither ash nor moisture.
    pub fn dry_ash_free_share(&self) -> f64 {
        1.0 - self.ash - self.moisture
    }

    /// `[C, H, O, ASH, MOIST]`
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.carbon,
            self.hydrogen,
            self.oxygen,
            self.ash,
            self.moisture,
        ]
    }
}

fn validate_mass_fraction(field: &str, value: f64) -> SurrogateResult<()> {
    if !value.is_finite() {
        return Err(SurrogateError::InvalidComposition(format!(
            "{field} must be finite, got {value}"
        )));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(SurrogateError::InvalidComposition(format!(
            "{field} must lie within [0, 1], got {value}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    composition: ElementalComposition,
    biomass_class: BiomassClass,
}

impl Sample {
    pub fn create(carbon: f64, hydrogen: f64, ash: f64, moisture: f64) -> SurrogateResult<Self> {
        Ok(Self {
            composition: ElementalComposition::new(carbon, hydrogen, ash, moisture)?,
            biomass_class: BiomassClass::default(),
        })
    }

    /// Builds a sample from `[C, H, O, ASH, MOIST]`; the oxygen entry is re-derived.
    pub fn from_composition_array(values: [f64; 5]) -> SurrogateResult<Self> {
        Self::create(values[0], values[1], values[3], values[4])
    }

    pub fn with_biomass_class(self, biomass_class: BiomassClass) -> Self {
        Self {
            biomass_class,
            ..self
        }
    }

    pub fn composition(&self) -> &ElementalComposition {
        &self.composition
    }

    pub fn biomass_class(&self) -> BiomassClass {
        self.biomass_class
    }

    pub fn regression_set(&self) -> RegressionSet {
        self.biomass_class.regression_set()
    }

    pub fn input_array(&self) -> [f64; 5] {
        self.composition.as_array()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputComposition {
    #[serde(rename = "CELL")]
    pub cellulose: f64,
    #[serde(rename = "HCELL")]
    pub hemicellulose: f64,
    #[serde(rename = "LIGO")]
    pub lignin_o: f64,
    #[serde(rename = "LIGH")]
    pub lignin_h: f64,
    #[serde(rename = "LIGC")]
    pub lignin_c: f64,
    #[serde(rename = "TANN")]
    pub tannin: f64,
    #[serde(rename = "TGL")]
    pub triglyceride: f64,
    #[serde(rename = "ASH")]
    pub ash: f64,
    #[serde(rename = "MOIST")]
    pub moisture: f64,
}

impl OutputComposition {
    pub fn mass_fraction(&self, species: ReferenceSpecies) -> f64 {
        match species {
            ReferenceSpecies::Cellulose => self.cellulose,
            ReferenceSpecies::Hemicellulose => self.hemicellulose,
            ReferenceSpecies::LigninC => self.lignin_c,
            ReferenceSpecies::LigninH => self.lignin_h,
            ReferenceSpecies::LigninO => self.lignin_o,
            ReferenceSpecies::Triglyceride => self.triglyceride,
            ReferenceSpecies::Tannin => self.tannin,
        }
    }

    pub fn species_total(&self) -> f64 {
        ReferenceSpecies::OUTPUT_ORDER
            .into_iter()
            .map(|species| self.mass_fraction(species))
            .sum()
    }

    pub fn negative_species(&self) -> Vec<ReferenceSpecies> {
        ReferenceSpecies::OUTPUT_ORDER
            .into_iter()
            .filter(|species| self.mass_fraction(*species) < 0.0)
            .collect()
    }

    /// `[CELL, HCELL, LIGO, LIGH, LIGC, TANN, TGL, ASH, MOIST]`
    pub fn as_array(&self) -> [f64; 9] {
        [
            self.cellulose,
            self.hemicellulose,
            self.lignin_o,
            self.lignin_h,
            self.lignin_c,
            self.tannin,
            self.triglyceride,
            self.ash,
            self.moisture,
        ]
    }
}

/// Whether the sample is reproducible as a convex blend of the three mixtures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EnvelopeCondition {
    #[default]
    Inside,
    #[serde(rename_all = "camelCase")]
    Outside {
        negative_mixtures: Vec<MixtureRole>,
        negative_species: Vec<ReferenceSpecies>,
    },
}

impl EnvelopeCondition {
    pub fn from_negatives(
        negative_mixtures: Vec<MixtureRole>,
        negative_species: Vec<ReferenceSpecies>,
    ) -> Self {
        if negative_mixtures.is_empty() && negative_species.is_empty() {
            Self::Inside
        } else {
            Self::Outside {
                negative_mixtures,
                negative_species,
            }
        }
    }

    pub fn is_out_of_envelope(&self) -> bool {
        matches!(self, Self::Outside { .. })
    }
}
