//! CLI error types.

use std::fmt;

use astcpack::PipelineError;

/// Errors that can occur while running a CLI command.
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments or build configuration.
    Config(String),

    /// A pipeline stage failed.
    Pipeline(PipelineError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            CliError::Pipeline(e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Pipeline(e) => Some(e),
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("unknown quality preset".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("unknown quality preset"));
    }

    #[test]
    fn test_pipeline_error_passes_through() {
        let err: CliError =
            PipelineError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")).into();
        assert!(err.to_string().contains("disk full"));
    }
}
