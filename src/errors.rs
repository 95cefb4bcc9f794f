//! Error mapping guide:
//! - Every `RenderError` is terminal; the Display text is the run's failure message.
//! - Keep message texts stable (integration tests and workflow logs match on them).
//! - All failures exit with code 1; a missing file is a failed render, not a missing command.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    #[error("Task definition file does not exist: {0}")]
    TaskDefinitionNotFound(String),

    #[error("Invalid task definition file {path}: {message}")]
    InvalidDocument { path: PathBuf, message: String },

    #[error("Invalid task definition format: containerDefinitions section is not present or is not an array")]
    InvalidDocumentShape,

    #[error("Invalid task definition: Could not find container definition with matching name '{0}'")]
    ContainerNotFound(String),

    #[error("Environment file not found: {0}")]
    EnvironmentFileNotFound(String),

    #[error("Cannot parse the environment variable '{0}'. Environment variable pairs must be of the form NAME=value.")]
    MalformedEnvironmentLine(String),

    #[error("Failed to serialize task definition: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RenderError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_line_message_quotes_the_line() {
        let e = RenderError::MalformedEnvironmentLine("JUSTANAME".to_string());
        assert_eq!(
            e.to_string(),
            "Cannot parse the environment variable 'JUSTANAME'. Environment variable pairs must be of the form NAME=value."
        );
    }

    #[test]
    fn io_error_names_the_path() {
        let e = RenderError::io(
            "/tmp/x.env",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(e.to_string(), "/tmp/x.env: denied");
    }
}
