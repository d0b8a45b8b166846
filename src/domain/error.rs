//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::EmployeeId;

/// Domain errors represent violations of the org chart rules.
/// A failing operation leaves the tree untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("employee {employee} cannot be its own supervisor")]
    SelfSupervision { employee: EmployeeId },

    #[error("the CEO ({0}) cannot become a subordinate")]
    CeoCannotBeSubordinate(EmployeeId),

    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    #[error("employee {employee} is already a subordinate of {supervisor}")]
    AlreadySubordinate {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },

    #[error("duplicate employee id in org chart: {0}")]
    DuplicateEmployee(EmployeeId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
