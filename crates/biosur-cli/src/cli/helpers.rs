use super::CliError;
use anyhow::Context;
use biosur_core::domain::{BiomassClass, Sample};
use serde::Serialize;

pub(super) const DEFAULT_CARBON: f64 = 0.53;
pub(super) const DEFAULT_HYDROGEN: f64 = 0.06;

/// `value_parser` for `--class`: accepts a class name or its numeric code.
pub(super) fn parse_biomass_class(value: &str) -> Result<BiomassClass, String> {
    value.parse().map_err(|error| format!("{error}"))
}

pub(super) fn build_sample(
    carbon: f64,
    hydrogen: f64,
    ash: f64,
    moisture: f64,
    biomass_class: BiomassClass,
) -> Result<Sample, CliError> {
    Sample::create(carbon, hydrogen, ash, moisture)
        .map(|sample| sample.with_biomass_class(biomass_class))
        .map_err(CliError::Compute)
}

pub(super) fn render_json<T: Serialize>(value: &T, what: &str) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {what} as JSON"))?;
    Ok(json)
}
