use super::CliError;
use super::helpers::*;
use biosur_core::common::species::SPECIES_TABLE;
use biosur_core::domain::{BiomassClass, Sample};
use biosur_core::modules::batch::{
    BatchRunnerConfig, DEFAULT_REPORT_PATH, render_human_summary, run_batch,
};
use biosur_core::modules::serialization::{
    render_characterization, render_species_table, write_json_artifact,
};
use biosur_core::modules::{CharacterizationDiagram, compute_output_composition};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct SampleArgs {
    /// Carbon mass fraction, dry basis
    #[arg(long, default_value_t = DEFAULT_CARBON)]
    carbon: f64,

    /// Hydrogen mass fraction, dry basis
    #[arg(long, default_value_t = DEFAULT_HYDROGEN)]
    hydrogen: f64,

    /// Ash mass fraction
    #[arg(long, default_value_t = 0.0)]
    ash: f64,

    /// Moisture mass fraction
    #[arg(long, default_value_t = 0.0)]
    moisture: f64,

    /// Biomass class: others, grass, hardwood, softwood (or 0-3)
    #[arg(long = "class", value_parser = parse_biomass_class, default_value = "hardwood")]
    biomass_class: BiomassClass,
}

impl SampleArgs {
    fn to_sample(&self) -> Result<Sample, CliError> {
        build_sample(
            self.carbon,
            self.hydrogen,
            self.ash,
            self.moisture,
            self.biomass_class,
        )
    }
}

#[derive(clap::Args)]
pub(super) struct CharacterizeArgs {
    #[command(flatten)]
    sample: SampleArgs,

    /// Print the full characterization as JSON instead of the composition table
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct DiagramArgs {
    #[command(flatten)]
    sample: SampleArgs,

    /// Write the diagram JSON here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct SpeciesArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct BatchArgs {
    /// Sample manifest path
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// JSON report output path
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,
}

impl BatchArgs {
    fn into_config(self) -> BatchRunnerConfig {
        BatchRunnerConfig {
            manifest_path: self.input,
            report_path: self.report,
        }
    }
}

pub(super) fn run_characterize_command(args: CharacterizeArgs) -> Result<i32, CliError> {
    let sample = args.sample.to_sample()?;
    let characterization = compute_output_composition(&sample).map_err(CliError::Compute)?;

    if args.json {
        println!("{}", render_json(&characterization, "characterization")?);
    } else {
        println!("{}", render_characterization(&characterization));
    }
    Ok(0)
}

pub(super) fn run_diagram_command(args: DiagramArgs) -> Result<i32, CliError> {
    let sample = args.sample.to_sample()?;
    let characterization = compute_output_composition(&sample).map_err(CliError::Compute)?;
    let diagram = CharacterizationDiagram::from_characterization(&characterization);

    match args.output {
        Some(path) => {
            write_json_artifact(&path, &diagram).map_err(CliError::Compute)?;
            println!("Diagram data: {}", path.display());
        }
        None => println!("{}", render_json(&diagram, "diagram")?),
    }
    Ok(0)
}

pub(super) fn run_species_command(args: SpeciesArgs) -> Result<i32, CliError> {
    if args.json {
        println!("{}", render_json(&SPECIES_TABLE, "species catalog")?);
    } else {
        println!("{}", render_species_table());
    }
    Ok(0)
}

pub(super) fn run_batch_command(args: BatchArgs) -> Result<i32, CliError> {
    let config = args.into_config();
    tracing::info!(manifest = %config.manifest_path.display(), "running batch");
    let report = run_batch(&config).map_err(CliError::Compute)?;
    println!("{}", render_human_summary(&report));
    println!("JSON report: {}", config.report_path.display());

    if report.passed { Ok(0) } else { Ok(1) }
}
