//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add loading and config context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no org chart file given (use --file, ORGCHART_FILE or org_file in config)")]
    NoOrgFile,

    #[error("unsupported org chart format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("cannot parse org chart {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("cannot render org chart: {message}")]
    Render { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
