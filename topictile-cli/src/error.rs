//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Dataset table not found or inaccessible
    DataFileNotFound(String),
    /// Dataset table could not be parsed
    InvalidTable(String),
    /// Configuration error
    ConfigError(String),
    /// Embedding backend unavailable in this build
    BackendUnavailable(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::DataFileNotFound(path) => write!(f, "Data file not found: {path}"),
            CliError::InvalidTable(msg) => write!(f, "Invalid dataset table: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::BackendUnavailable(name) => write!(
                f,
                "Embedding backend '{name}' is not available in this build"
            ),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_file_not_found_display() {
        let error = CliError::DataFileNotFound("data/ami/utterances.csv".to_string());
        assert_eq!(
            error.to_string(),
            "Data file not found: data/ami/utterances.csv"
        );
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("threshold must be finite".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: threshold must be finite"
        );
    }

    #[test]
    fn test_backend_unavailable_display() {
        let error = CliError::BackendUnavailable("fastembed".to_string());
        assert!(error.to_string().contains("'fastembed'"));
    }

    #[test]
    fn test_cli_result_wraps_cli_error() {
        let failure: CliResult<()> = Err(CliError::InvalidTable("missing column".into()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("missing column"));
    }
}
