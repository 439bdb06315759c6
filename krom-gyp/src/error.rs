//! Error types for descriptor generation and projection.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the individual pipeline steps.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Failures of a single pipeline step. None of them are recovered locally.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// The generator could not be spawned or exited unsuccessfully.
    #[error("generator `{program}` failed: {reason}")]
    Process { program: String, reason: String },

    /// The working directory lacks the layout the generator path expects.
    #[error("generator path {path} does not exist in the working directory")]
    Environment { path: PathBuf },

    /// The descriptor was not produced where it was expected.
    #[error("descriptor not found: {path}")]
    DescriptorNotFound { path: PathBuf },

    /// The descriptor is not well-formed JSON of the expected shape.
    #[error("failed to parse descriptor {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required descriptor key is absent.
    #[error("descriptor is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
