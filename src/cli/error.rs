//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(DomainError::EmployeeNotFound(_)) => {
                    crate::exitcode::NOTFOUND
                }
                ApplicationError::Domain(DomainError::DuplicateEmployee(_)) => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Domain(_) => crate::exitcode::REJECTED,
                ApplicationError::NoOrgFile => crate::exitcode::USAGE,
                ApplicationError::UnsupportedFormat(_) | ApplicationError::Parse { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                ApplicationError::Render { .. } => crate::exitcode::SOFTWARE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_domain_errors_when_mapping_then_uses_distinct_codes() {
        let not_found: CliError = DomainError::EmployeeNotFound(9).into();
        let rejected: CliError = DomainError::CeoCannotBeSubordinate(0).into();

        assert_eq!(not_found.exit_code(), crate::exitcode::NOTFOUND);
        assert_eq!(rejected.exit_code(), crate::exitcode::REJECTED);
        assert_eq!(
            CliError::Usage("x".into()).exit_code(),
            crate::exitcode::USAGE
        );
    }
}
