use super::engine::SurrogateEngine;
use super::inversion::SolverSettings;
use super::serialization::write_json_artifact;
use super::traits::SurrogateModel;
use crate::domain::{
    BiomassClass, EnvelopeCondition, OutputComposition, Sample, SurrogateError, SurrogateResult,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_REPORT_PATH: &str = "artifacts/batch/report.json";

#[derive(Debug, Clone)]
pub struct BatchRunnerConfig {
    pub manifest_path: PathBuf,
    pub report_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchManifest {
    #[serde(default)]
    pub settings: SolverSettings,
    pub samples: Vec<BatchEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub id: String,
    pub carbon: f64,
    pub hydrogen: f64,
    #[serde(default)]
    pub ash: f64,
    #[serde(default)]
    pub moisture: f64,
    #[serde(default)]
    pub biomass_class: Option<ClassSelector>,
}

/// Biomass class given either by numeric code or by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassSelector {
    Code(u8),
    Name(String),
}

impl ClassSelector {
    pub fn resolve(&self) -> SurrogateResult<BiomassClass> {
        match self {
            Self::Code(code) => BiomassClass::from_code(*code),
            Self::Name(name) => name.parse(),
        }
    }
}

impl BatchEntry {
    /// Unspecified classes fall back to hardwood, matching the CLI default.
    pub fn to_sample(&self) -> SurrogateResult<Sample> {
        let biomass_class = match &self.biomass_class {
            Some(selector) => selector.resolve()?,
            None => BiomassClass::Hardwood,
        };
        Ok(Sample::create(self.carbon, self.hydrogen, self.ash, self.moisture)?
            .with_biomass_class(biomass_class))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at_unix_seconds: u64,
    pub passed: bool,
    pub manifest_path: String,
    pub settings: SolverSettings,
    pub sample_count: usize,
    pub succeeded_sample_count: usize,
    pub failed_sample_count: usize,
    pub out_of_envelope_count: usize,
    pub samples: Vec<BatchSampleReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSampleReport {
    pub id: String,
    pub succeeded: bool,
    pub out_of_envelope: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biomass_class: Option<BiomassClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputComposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<EnvelopeCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchSampleError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSampleError {
    pub placeholder: String,
    pub message: String,
}

impl From<&SurrogateError> for BatchSampleError {
    fn from(error: &SurrogateError) -> Self {
        Self {
            placeholder: error.placeholder().to_string(),
            message: error.to_string(),
        }
    }
}

pub fn run_batch(config: &BatchRunnerConfig) -> SurrogateResult<BatchReport> {
    let manifest = load_manifest(&config.manifest_path)?;
    let engine = SurrogateEngine::new(manifest.settings);

    let mut report = evaluate_manifest(&engine, &manifest);
    report.manifest_path = normalize_path(&config.manifest_path);

    write_json_artifact(&config.report_path, &report)?;
    Ok(report)
}

/// Characterizes every manifest entry independently; a failing sample is
/// recorded in the report and does not stop the batch.
pub fn evaluate_manifest<M: SurrogateModel>(model: &M, manifest: &BatchManifest) -> BatchReport {
    let samples: Vec<BatchSampleReport> = manifest
        .samples
        .iter()
        .map(|entry| evaluate_entry(model, entry))
        .collect();

    let sample_count = samples.len();
    let succeeded_sample_count = samples.iter().filter(|sample| sample.succeeded).count();
    let failed_sample_count = sample_count.saturating_sub(succeeded_sample_count);
    let out_of_envelope_count = samples.iter().filter(|sample| sample.out_of_envelope).count();

    BatchReport {
        generated_at_unix_seconds: current_unix_timestamp_seconds(),
        passed: failed_sample_count == 0,
        manifest_path: String::new(),
        settings: manifest.settings,
        sample_count,
        succeeded_sample_count,
        failed_sample_count,
        out_of_envelope_count,
        samples,
    }
}

fn evaluate_entry<M: SurrogateModel>(model: &M, entry: &BatchEntry) -> BatchSampleReport {
    let result = entry
        .to_sample()
        .and_then(|sample| model.characterize(&sample));

    match result {
        Ok(characterization) => BatchSampleReport {
            id: entry.id.clone(),
            succeeded: true,
            out_of_envelope: characterization.is_out_of_envelope(),
            biomass_class: Some(characterization.sample.biomass_class()),
            output: Some(characterization.output),
            envelope: Some(characterization.envelope),
            error: None,
        },
        Err(error) => {
            tracing::warn!(
                sample = %entry.id,
                placeholder = error.placeholder(),
                "batch sample failed: {error}"
            );
            BatchSampleReport {
                id: entry.id.clone(),
                succeeded: false,
                out_of_envelope: false,
                biomass_class: None,
                output: None,
                envelope: None,
                error: Some(BatchSampleError::from(&error)),
            }
        }
    }
}

pub fn render_human_summary(report: &BatchReport) -> String {
    let mut lines = Vec::new();
    let status = if report.passed { "PASS" } else { "FAIL" };
    lines.push(format!("Batch status: {status}"));
    lines.push(format!(
        "Samples: {} total ({} succeeded, {} failed, {} outside the characterization triangle)",
        report.sample_count,
        report.succeeded_sample_count,
        report.failed_sample_count,
        report.out_of_envelope_count
    ));

    for sample in &report.samples {
        match &sample.error {
            Some(error) => lines.push(format!(
                "Sample {}: FAIL [{}] {}",
                sample.id, error.placeholder, error.message
            )),
            None if sample.out_of_envelope => {
                lines.push(format!("Sample {}: OUTSIDE", sample.id));
            }
            None => lines.push(format!("Sample {}: OK", sample.id)),
        }
    }

    lines.join("\n")
}

pub fn load_manifest(manifest_path: &Path) -> SurrogateResult<BatchManifest> {
    let content = fs::read_to_string(manifest_path).map_err(|source| SurrogateError::Io {
        path: manifest_path.to_path_buf(),
        message: format!("failed to read manifest: {source}"),
    })?;
    let manifest: BatchManifest =
        serde_json::from_str(&content).map_err(|source| SurrogateError::Manifest {
            path: manifest_path.to_path_buf(),
            message: source.to_string(),
        })?;

    manifest
        .settings
        .validate()
        .map_err(|message| SurrogateError::Manifest {
            path: manifest_path.to_path_buf(),
            message: format!("invalid settings: {message}"),
        })?;

    let mut seen = BTreeSet::new();
    for entry in &manifest.samples {
        if !seen.insert(entry.id.as_str()) {
            return Err(SurrogateError::Manifest {
                path: manifest_path.to_path_buf(),
                message: format!("duplicate sample id '{}'", entry.id),
            });
        }
    }

    Ok(manifest)
}

fn current_unix_timestamp_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
