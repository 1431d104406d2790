use thiserror::Error;

use crate::{
    configuration::ConfigurationError, edge_api::ApiError, exit_codes::EdgeExitCode,
    format::FormattingError, input::InputError, validation::ValidationError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),

    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),

    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),

    #[error("{0}")]
    InputError(#[from] InputError),

    /// A dependency rule rejected the requested changes
    #[error("{0}")]
    ValidationError(#[from] ValidationError),

    #[error("{0}")]
    ApiError(#[from] ApiError),

    /// Error when the output file cannot be written
    #[error("Failed to write output file: {0}")]
    OutputError(#[source] std::io::Error),

    /// The user interrupted the command (Ctrl-C)
    #[error("Interrupted")]
    Interrupted,
}

impl CliError {
    /// Get the appropriate exit code for this error
    ///
    /// Input problems the user can fix on the command line map to
    /// `UsageError`, content problems to `DataError`, and API failures are
    /// split by where they happened so that scripts can decide to retry.
    pub fn exit_code(&self) -> EdgeExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => EdgeExitCode::UsageError,
            CliError::ConfigurationError(_) => EdgeExitCode::ConfigError,
            CliError::FormattingError(_) => EdgeExitCode::DataError,
            CliError::InputError(e) => match e {
                InputError::MandatoryFlagsMissing(_)
                | InputError::NothingToUpdate
                | InputError::InvalidFieldValue { .. } => EdgeExitCode::UsageError,
                InputError::ReadDocument { .. } => EdgeExitCode::NoInput,
                InputError::Unmarshal { .. } => EdgeExitCode::DataError,
            },
            CliError::ValidationError(_) => EdgeExitCode::DataError,
            CliError::ApiError(e) => match e {
                _ if e.is_not_found() => EdgeExitCode::NotFound,
                ApiError::Server { .. } => EdgeExitCode::TempFail,
                ApiError::Client { .. } | ApiError::InvalidToken => EdgeExitCode::ApiError,
                ApiError::Unavailable(_) => EdgeExitCode::NetworkError,
                ApiError::InvalidResponse(_)
                | ApiError::InvalidRequest(_)
                | ApiError::InvalidPayload(_)
                | ApiError::InvalidUrl(_) => EdgeExitCode::SoftwareError,
            },
            CliError::OutputError(_) => EdgeExitCode::CantCreate,
            CliError::Interrupted => EdgeExitCode::Interrupted,
        }
    }
}
