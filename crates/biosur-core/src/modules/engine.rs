use super::assembler::CompositionAssembler;
use super::inversion::{LinearInversionSolver, SolverSettings};
use super::mixture::{MixtureBuilder, ReferenceMixture};
use super::splitting::{SplittingParameterModel, SplittingParameters};
use super::traits::SurrogateModel;
use crate::common::calibration::{OptimizationParameterSet, STANDARD_CALIBRATION};
use crate::domain::{
    EnvelopeCondition, MixtureRole, OutputComposition, RegressionSet, Sample, SurrogateResult,
};
use serde::Serialize;

/// Everything produced for one sample: the surrogate breakdown plus the
/// intermediate quantities that explain it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Characterization {
    pub sample: Sample,
    pub regression_set: RegressionSet,
    pub splitting: SplittingParameters,
    /// RM1, RM2, RM3 with their solved mole fractions assigned.
    pub mixtures: [ReferenceMixture; 3],
    pub mass_fractions: [f64; 3],
    pub condition_number: f64,
    pub output: OutputComposition,
    pub envelope: EnvelopeCondition,
}

impl Characterization {
    pub fn mixture(&self, role: MixtureRole) -> &ReferenceMixture {
        match role {
            MixtureRole::Rm1 => &self.mixtures[0],
            MixtureRole::Rm2 => &self.mixtures[1],
            MixtureRole::Rm3 => &self.mixtures[2],
        }
    }

    pub fn is_out_of_envelope(&self) -> bool {
        self.envelope.is_out_of_envelope()
    }
}

/// Stateless pipeline: splitting regression, mixture construction, linear
/// inversion and species assembly. Cheap to copy and safe to share.
#[derive(Debug, Clone, Copy)]
pub struct SurrogateEngine {
    calibration: &'static OptimizationParameterSet,
    settings: SolverSettings,
}

impl Default for SurrogateEngine {
    fn default() -> Self {
        Self::new(SolverSettings::default())
    }
}

impl SurrogateEngine {
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            calibration: &STANDARD_CALIBRATION,
            settings,
        }
    }

    pub fn with_calibration(self, calibration: &'static OptimizationParameterSet) -> Self {
        Self {
            calibration,
            ..self
        }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn compute_output_composition(&self, sample: &Sample) -> SurrogateResult<Characterization> {
        let composition = sample.composition();
        let regression_set = sample.regression_set();
        tracing::debug!(
            carbon = composition.carbon(),
            hydrogen = composition.hydrogen(),
            biomass_class = %sample.biomass_class(),
            ?regression_set,
            "characterizing sample"
        );

        let splitting = SplittingParameterModel::new(self.calibration).evaluate(
            composition.carbon(),
            composition.hydrogen(),
            regression_set,
        )?;
        tracing::debug!(parameters = ?splitting.as_array(), "evaluated splitting parameters");

        let mixtures = MixtureBuilder::build(&splitting)?;
        let solution = LinearInversionSolver::new(self.settings).solve(&mixtures, composition)?;
        tracing::debug!(
            mass_fractions = ?solution.mass_fractions,
            mole_fractions = ?solution.mole_fractions,
            condition_number = solution.condition_number,
            "solved mixture blend"
        );

        let [rm1, rm2, rm3] = mixtures;
        let mixtures = [
            rm1.with_fraction(solution.mole_fractions[0]),
            rm2.with_fraction(solution.mole_fractions[1]),
            rm3.with_fraction(solution.mole_fractions[2]),
        ];
        let output = CompositionAssembler.assemble(&mixtures, composition)?;

        let negative_mixtures = MixtureRole::ALL
            .into_iter()
            .zip(solution.mass_fractions)
            .filter(|(_, fraction)| *fraction < 0.0)
            .map(|(role, _)| role)
            .collect();
        let envelope = EnvelopeCondition::from_negatives(negative_mixtures, output.negative_species());
        if let EnvelopeCondition::Outside {
            negative_mixtures,
            negative_species,
        } = &envelope
        {
            tracing::warn!(
                carbon = composition.carbon(),
                hydrogen = composition.hydrogen(),
                ?negative_mixtures,
                ?negative_species,
                "sample composition lies outside the characterization triangle"
            );
        }

        Ok(Characterization {
            sample: *sample,
            regression_set,
            splitting,
            mixtures,
            mass_fractions: solution.mass_fractions,
            condition_number: solution.condition_number,
            output,
            envelope,
        })
    }
}

impl SurrogateModel for SurrogateEngine {
    fn characterize(&self, sample: &Sample) -> SurrogateResult<Characterization> {
        self.compute_output_composition(sample)
    }
}

/// Characterizes `sample` with the standard calibration and default solver settings.
pub fn compute_output_composition(sample: &Sample) -> SurrogateResult<Characterization> {
    SurrogateEngine::default().compute_output_composition(sample)
}

#[cfg(test)]
mod tests {
    use super::{SurrogateEngine, compute_output_composition};
    use crate::common::calibration::OptimizationParameterSet;
    use crate::domain::{BiomassClass, EnvelopeCondition, MixtureRole, RegressionSet, Sample};
    use crate::modules::inversion::SolverSettings;

    fn hardwood(carbon: f64, hydrogen: f64) -> Sample {
        Sample::create(carbon, hydrogen, 0.0, 0.0)
            .expect("sample")
            .with_biomass_class(BiomassClass::Hardwood)
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SurrogateEngine>();
    }

    #[test]
    fn characterization_exposes_intermediate_quantities() {
        let characterization = compute_output_composition(&hardwood(0.53, 0.06)).expect("run");

        assert_eq!(characterization.regression_set, RegressionSet::Wood);
        assert_eq!(characterization.envelope, EnvelopeCondition::Inside);
        assert!((characterization.splitting.alpha - 0.6550).abs() < 1.0e-4);

        let rm1 = characterization.mixture(MixtureRole::Rm1);
        assert!((rm1.carbon_fraction() - 0.4475).abs() < 1.0e-4);
        assert!((rm1.hydrogen_fraction() - 0.0618).abs() < 1.0e-4);

        let fractions: f64 = characterization
            .mixtures
            .iter()
            .map(|mixture| mixture.fraction())
            .sum();
        assert!((fractions - 1.0).abs() < 1.0e-12);
        assert!(characterization.condition_number > 1.0);
    }

    #[test]
    fn out_of_envelope_sample_reports_negative_members() {
        let characterization = compute_output_composition(&hardwood(0.30, 0.02)).expect("run");

        match &characterization.envelope {
            EnvelopeCondition::Outside {
                negative_mixtures,
                negative_species,
            } => {
                assert!(!negative_mixtures.is_empty());
                assert!(!negative_species.is_empty());
            }
            EnvelopeCondition::Inside => panic!("sample should be outside the triangle"),
        }
        assert!(characterization.is_out_of_envelope());
    }

    #[test]
    fn strict_settings_propagate_to_solver() {
        let engine = SurrogateEngine::new(SolverSettings {
            max_condition_number: 1.0,
            ..SolverSettings::default()
        });
        let error = engine
            .compute_output_composition(&hardwood(0.53, 0.06))
            .expect_err("strict limit");
        assert_eq!(error.placeholder(), "RUN.SINGULAR_SYSTEM");
    }

    #[test]
    fn custom_calibration_replaces_standard_blocks() {
        const HALF: [[f64; 5]; 3] = [[0.5; 5], [0.0; 5], [0.0; 5]];
        static FLAT: OptimizationParameterSet = OptimizationParameterSet::new(HALF, HALF, HALF);
        let engine = SurrogateEngine::default().with_calibration(&FLAT);

        let characterization = engine
            .compute_output_composition(&hardwood(0.53, 0.06))
            .expect("run");
        assert_eq!(characterization.splitting.as_array(), [0.5; 5]);
    }
}
