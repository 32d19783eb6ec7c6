use biosur_core::common::species::ReferenceSpecies;
use biosur_core::domain::{BiomassClass, EnvelopeCondition, RegressionSet, Sample};
use biosur_core::modules::{
    CharacterizationDiagram, SolverSettings, SurrogateEngine, SurrogateModel,
    compute_output_composition,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const SUM_TOLERANCE: f64 = 1.0e-6;
const FIXTURE_TOLERANCE: f64 = 1.0e-5;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("reference_samples.json")
}

#[derive(Debug, Deserialize)]
struct ReferenceFixtures {
    cases: Vec<ReferenceCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceCase {
    id: String,
    carbon: f64,
    hydrogen: f64,
    ash: f64,
    moisture: f64,
    biomass_class: String,
    expected_mixture_mass_fractions: [f64; 3],
    expected_output: BTreeMap<String, f64>,
}

fn load_fixtures() -> ReferenceFixtures {
    let content = fs::read_to_string(fixture_path()).expect("fixture file should be readable");
    serde_json::from_str(&content).expect("fixture file should parse")
}

fn sample(carbon: f64, hydrogen: f64, ash: f64, moisture: f64, class: BiomassClass) -> Sample {
    Sample::create(carbon, hydrogen, ash, moisture)
        .expect("valid sample")
        .with_biomass_class(class)
}

#[test]
fn reference_samples_match_recorded_breakdowns() {
    let fixtures = load_fixtures();
    assert!(!fixtures.cases.is_empty());

    for case in &fixtures.cases {
        let class: BiomassClass = case.biomass_class.parse().expect("known class");
        let characterization =
            compute_output_composition(&sample(case.carbon, case.hydrogen, case.ash, case.moisture, class))
                .expect("reference sample should characterize");

        assert_eq!(
            characterization.envelope,
            EnvelopeCondition::Inside,
            "{} should lie inside the triangle",
            case.id
        );
        for (actual, expected) in characterization
            .mass_fractions
            .iter()
            .zip(case.expected_mixture_mass_fractions)
        {
            assert!(
                (actual - expected).abs() < FIXTURE_TOLERANCE,
                "{}: mixture fraction {actual} vs {expected}",
                case.id
            );
        }
        for (name, expected) in &case.expected_output {
            let species: ReferenceSpecies = name.parse().expect("known species");
            let actual = characterization.output.mass_fraction(species);
            assert!(
                (actual - expected).abs() < FIXTURE_TOLERANCE,
                "{}: {name} {actual} vs {expected}",
                case.id
            );
        }
        assert_eq!(characterization.output.ash, case.ash);
        assert_eq!(characterization.output.moisture, case.moisture);
    }
}

#[test]
fn hardwood_reference_sample_lies_inside_wood_triangle() {
    let characterization =
        compute_output_composition(&sample(0.53, 0.06, 0.0, 0.0, BiomassClass::Hardwood))
            .expect("scenario A");

    assert_eq!(characterization.regression_set, RegressionSet::Wood);
    assert_eq!(characterization.regression_set.index(), 2);
    assert!((characterization.output.species_total() - 1.0).abs() < SUM_TOLERANCE);
    assert!(!characterization.is_out_of_envelope());
    assert!(
        CharacterizationDiagram::from_characterization(&characterization).sample_inside
    );
}

#[test]
fn ash_and_moisture_scale_the_species_block() {
    for class in BiomassClass::ALL {
        let characterization =
            compute_output_composition(&sample(0.40, 0.10, 0.05, 0.10, class)).expect("scenario B");

        assert!(
            (characterization.output.species_total() - 0.85).abs() < SUM_TOLERANCE,
            "{class}"
        );
        assert_eq!(characterization.output.ash, 0.05);
        assert_eq!(characterization.output.moisture, 0.10);
    }
}

#[test]
fn low_carbon_sample_completes_outside_envelope() {
    let characterization =
        compute_output_composition(&sample(0.30, 0.02, 0.0, 0.0, BiomassClass::Others))
            .expect("scenario C");

    assert!(characterization.is_out_of_envelope());
    assert!(
        characterization
            .output
            .as_array()
            .iter()
            .any(|value| *value < 0.0)
    );
    assert!(characterization.mass_fractions.iter().any(|value| *value < 0.0));
    assert!((characterization.output.species_total() - 1.0).abs() < SUM_TOLERANCE);
}

#[test]
fn oxygen_free_boundary_is_accepted_and_overflow_rejected() {
    let boundary = compute_output_composition(&sample(1.0, 0.0, 0.0, 0.0, BiomassClass::Hardwood))
        .expect("C + H = 1 is accepted");
    assert_eq!(boundary.sample.composition().oxygen(), 0.0);
    assert!(boundary.is_out_of_envelope());

    let error = Sample::create(0.8, 0.3, 0.0, 0.0).expect_err("C + H > 1");
    assert_eq!(error.placeholder(), "INPUT.INVALID_COMPOSITION");
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn repeated_characterization_is_identical() {
    let engine = SurrogateEngine::default();
    let input = sample(0.51, 0.061, 0.02, 0.05, BiomassClass::Softwood);

    let first = engine.characterize(&input).expect("first run");
    let second = engine.characterize(&input).expect("second run");
    assert_eq!(first, second);
    assert_eq!(first.output.as_array(), second.output.as_array());
}

#[test]
fn species_sum_and_mixture_fractions_hold_across_grid() {
    let engine = SurrogateEngine::new(SolverSettings::default());

    for class in BiomassClass::ALL {
        for carbon in [0.40, 0.45, 0.50, 0.55, 0.60, 0.65] {
            for hydrogen in [0.04, 0.05, 0.06, 0.07, 0.08] {
                for (ash, moisture) in [(0.0, 0.0), (0.03, 0.12)] {
                    let input = sample(carbon, hydrogen, ash, moisture, class);
                    let characterization = engine
                        .characterize(&input)
                        .unwrap_or_else(|error| panic!("{class} C={carbon} H={hydrogen}: {error}"));

                    let expected = 1.0 - ash - moisture;
                    assert!(
                        (characterization.output.species_total() - expected).abs() < SUM_TOLERANCE,
                        "{class} C={carbon} H={hydrogen}"
                    );
                    let fractions: f64 = characterization
                        .mixtures
                        .iter()
                        .map(|mixture| mixture.fraction())
                        .sum();
                    assert!((fractions - 1.0).abs() < SUM_TOLERANCE);
                    for parameter in characterization.splitting.as_array() {
                        assert!((0.0..=1.0).contains(&parameter));
                    }
                    assert_eq!(characterization.output.ash, ash);
                    assert_eq!(characterization.output.moisture, moisture);
                }
            }
        }
    }
}

#[test]
fn flat_array_accessors_follow_documented_order() {
    let input = Sample::from_composition_array([0.53, 0.06, 0.0, 0.01, 0.02])
        .expect("valid array")
        .with_biomass_class(BiomassClass::Hardwood);
    let values = input.input_array();
    assert!((values[2] - 0.41).abs() < 1.0e-15);

    let characterization = compute_output_composition(&input).expect("characterization");
    let output = characterization.output.as_array();
    assert_eq!(output[0], characterization.output.cellulose);
    assert_eq!(output[2], characterization.output.lignin_o);
    assert_eq!(output[6], characterization.output.triglyceride);
    assert_eq!(output[7], 0.01);
    assert_eq!(output[8], 0.02);
}
