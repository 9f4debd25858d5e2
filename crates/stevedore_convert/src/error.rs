use stevedore_common::diagnostic::{Diagnosable, DiagnosticCode};
use thiserror::Error;

/// Everything that can go wrong during a conversion.
///
/// Errors are plain values; the engine never panics on user input.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not parse the command: {0}")]
    Tokenize(#[from] shell_words::ParseError),

    #[error("flag '{flag}' is missing its value")]
    MissingFlagValue { flag: String },

    #[error("input is not a 'docker run' command")]
    NotRunCommand,

    #[error("no image specified in the docker run command")]
    MissingImage,

    #[error("service '{service}' is missing the required 'image' field")]
    MissingServiceImage { service: String },

    #[error("invalid YAML format: {0}")]
    ManifestParse(#[from] serde_yaml::Error),

    #[error("invalid compose structure (missing 'services' or services are empty)")]
    InvalidStructure,

    #[error("input is neither a 'docker run' command nor a compose manifest")]
    UnrecognizedInput,
}

impl Diagnosable for ConvertError {
    fn code(&self) -> DiagnosticCode {
        match self {
            Self::Tokenize(_) => DiagnosticCode("CONVERT_BAD_QUOTING"),
            Self::MissingFlagValue { .. } => DiagnosticCode("CONVERT_FLAG_NO_VALUE"),
            Self::NotRunCommand => DiagnosticCode("CONVERT_NOT_RUN_COMMAND"),
            Self::MissingImage => DiagnosticCode("CONVERT_NO_IMAGE"),
            Self::MissingServiceImage { .. } => DiagnosticCode("CONVERT_SERVICE_NO_IMAGE"),
            Self::ManifestParse(_) => DiagnosticCode("CONVERT_BAD_YAML"),
            Self::InvalidStructure => DiagnosticCode("CONVERT_BAD_STRUCTURE"),
            Self::UnrecognizedInput => DiagnosticCode("CONVERT_UNRECOGNIZED"),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Self::Tokenize(_) => Some("Check for an unclosed quote in the command.".to_string()),
            Self::MissingImage => {
                Some("The image name must follow the flags, e.g. 'docker run -d nginx'.".to_string())
            }
            Self::InvalidStructure => {
                Some("A compose manifest needs a top-level 'services' mapping with at least one service.".to_string())
            }
            Self::UnrecognizedInput => {
                Some("Input must start with 'docker run' or be a compose YAML document.".to_string())
            }
            _ => None,
        }
    }
}
