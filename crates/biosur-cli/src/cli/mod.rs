mod commands;
mod helpers;

use crate::logging;
use biosur_core::domain::SurrogateError;
use clap::Parser;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let compatibility_error = error.as_surrogate_error();
            eprintln!("{}", compatibility_error.diagnostic_line());
            if let Some(summary_line) = compatibility_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            compatibility_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("biosur".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            let filter = logging::build_filter(cli.log_level.as_deref()).map_err(CliError::Usage)?;
            logging::init(filter);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "biosur",
    version,
    about = "Biomass surrogate composition from ultimate analysis"
)]
struct Cli {
    /// Log filter directive (overrides RUST_LOG), e.g. `debug` or `biosur_core=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Compute the surrogate species composition of one sample
    Characterize(commands::CharacterizeArgs),
    /// Emit Van Krevelen diagram data for one sample as JSON
    Diagram(commands::DiagramArgs),
    /// Print the reference species catalog
    Species(commands::SpeciesArgs),
    /// Characterize every sample in a JSON manifest and write a report
    Batch(commands::BatchArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Characterize(args) => commands::run_characterize_command(args),
        CliCommand::Diagram(args) => commands::run_diagram_command(args),
        CliCommand::Species(args) => commands::run_species_command(args),
        CliCommand::Batch(args) => commands::run_batch_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(SurrogateError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_surrogate_error(&self) -> SurrogateError {
        match self {
            Self::Usage(message) => SurrogateError::Usage(message.trim_end().to_string()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => SurrogateError::System(format!("{error:#}")),
        }
    }
}
