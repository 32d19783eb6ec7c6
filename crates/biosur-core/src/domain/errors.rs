use std::path::PathBuf;

pub type SurrogateResult<T> = Result<T, SurrogateError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurrogateError {
    #[error("invalid composition: {0}")]
    InvalidComposition(String),
    #[error("unknown reference species '{0}'")]
    UnknownSpecies(String),
    #[error("unknown biomass class '{0}'")]
    UnknownBiomassClass(String),
    #[error("invalid reference mixture {mixture}: {reason}")]
    InvalidMixture {
        mixture: &'static str,
        reason: String,
    },
    #[error("singular inversion system: {0}")]
    SingularSystem(String),
    #[error("normalization failed: {0}")]
    Normalization(String),
    #[error("failed to access '{}': {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[error("invalid batch manifest '{}': {message}", path.display())]
    Manifest { path: PathBuf, message: String },
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    System(String),
}

impl SurrogateError {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidComposition(_)
            | Self::UnknownSpecies(_)
            | Self::UnknownBiomassClass(_)
            | Self::Manifest { .. }
            | Self::Usage(_) => ErrorCategory::InputValidationError,
            Self::Io { .. } | Self::System(_) => ErrorCategory::IoSystemError,
            Self::InvalidMixture { .. } | Self::SingularSystem(_) | Self::Normalization(_) => {
                ErrorCategory::ComputationError
            }
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::InvalidComposition(_) => "INPUT.INVALID_COMPOSITION",
            Self::UnknownSpecies(_) => "INPUT.UNKNOWN_SPECIES",
            Self::UnknownBiomassClass(_) => "INPUT.UNKNOWN_BIOMASS_CLASS",
            Self::Manifest { .. } => "INPUT.BATCH_MANIFEST",
            Self::Io { .. } => "IO.BATCH",
            Self::Usage(_) => "INPUT.CLI_USAGE",
            Self::System(_) => "IO.CLI",
            Self::InvalidMixture { .. } => "RUN.INVALID_MIXTURE",
            Self::SingularSystem(_) => "RUN.SINGULAR_SYSTEM",
            Self::Normalization(_) => "RUN.NORMALIZATION",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category().is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}
