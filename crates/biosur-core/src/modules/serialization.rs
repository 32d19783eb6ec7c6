use super::engine::Characterization;
use crate::common::species::SPECIES_TABLE;
use crate::domain::{
    BiomassClass, EnvelopeCondition, OUTPUT_FIELDS, OutputComposition, SurrogateError,
    SurrogateResult,
};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const STATUS_DONE: &str = "Done!";
pub const STATUS_OUT_OF_ENVELOPE: &str =
    "The sample composition lies outside the characterization triangle!";

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

/// One `KEY    value` line per output field, with HCELL reported under the
/// class-specific hemicellulose label.
pub fn render_composition_table(output: &OutputComposition, biomass_class: BiomassClass) -> String {
    let mut lines = Vec::with_capacity(OUTPUT_FIELDS.len());
    for (field, value) in OUTPUT_FIELDS.into_iter().zip(output.as_array()) {
        let label = if field == "HCELL" {
            biomass_class.hemicellulose_label()
        } else {
            field
        };
        lines.push(format!("{label:<6} {value:.4}"));
    }
    lines.join("\n")
}

pub fn render_status_line(envelope: &EnvelopeCondition) -> &'static str {
    match envelope {
        EnvelopeCondition::Inside => STATUS_DONE,
        EnvelopeCondition::Outside { .. } => STATUS_OUT_OF_ENVELOPE,
    }
}

pub fn render_characterization(characterization: &Characterization) -> String {
    format!(
        "{}\n{}",
        render_composition_table(
            &characterization.output,
            characterization.sample.biomass_class()
        ),
        render_status_line(&characterization.envelope)
    )
}

pub fn render_species_table() -> String {
    let mut lines = vec![format!(
        "{:<6}{:>4}{:>4}{:>4}{:>6}{:>9}{:>9}{:>9}",
        "NAME", "C", "H", "O", "MW", "C_FRAC", "H_FRAC", "O_FRAC"
    )];
    for record in &SPECIES_TABLE {
        lines.push(format!(
            "{:<6}{:>4}{:>4}{:>4}{:>6}{}{}{}",
            record.species.as_str(),
            record.carbon_atoms,
            record.hydrogen_atoms,
            record.oxygen_atoms,
            record.molecular_weight,
            format_fixed_f64(record.carbon_fraction, 9, 4),
            format_fixed_f64(record.hydrogen_fraction, 9, 4),
            format_fixed_f64(record.oxygen_fraction, 9, 4),
        ));
    }
    lines.join("\n")
}

/// Pretty-prints `value` to `path`, creating parent directories as needed.
pub fn write_json_artifact<T: Serialize>(path: &Path, value: &T) -> SurrogateResult<()> {
    let io_error = |path: &Path, message: String| SurrogateError::Io {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent_dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent_dir).map_err(|source| {
            io_error(parent_dir, format!("failed to create directory: {source}"))
        })?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|source| io_error(path, format!("failed to serialize JSON: {source}")))?;
    fs::write(path, json).map_err(|source| io_error(path, format!("failed to write: {source}")))
}
