//! Error types for the domain and repository layers.

use std::error::Error;
use thiserror::Error;

/// Errors that occur during entity construction or mutation.
///
/// Returned by entity constructors and mutators; a failed validation never
/// produces a partially constructed entity.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at least {min}, got {actual}")]
    OutOfRange { field: String, min: i64, actual: i64 },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failures of repository operations, one variant per error category.
///
/// Callers test the category by matching or through the `is_*` helpers,
/// never by comparing against shared sentinel values.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Malformed caller input, or a stored row that no longer satisfies
    /// entity invariants. `context` identifies the offending row when the
    /// error comes from rehydration.
    #[error("{context}: {source}")]
    Validation {
        context: String,
        #[source]
        source: ValidationError,
    },

    /// A get-by-id or get-by-email matched no row.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The store rejected a statement due to a uniqueness or foreign-key
    /// rule.
    #[error("constraint violated while {operation}: {message}")]
    ConstraintViolation {
        operation: &'static str,
        message: String,
    },

    /// A stored timestamp column did not match any recognized layout.
    #[error("cannot parse {value:?} as timestamp")]
    MalformedTimestamp { value: String },

    /// A stored identifier column does not hold a canonical UUID.
    #[error("invalid identifier {value:?} in {entity} row")]
    InvalidIdentifier {
        entity: &'static str,
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// Connection-level failure, statement error, or cancelled execution.
    #[error("database failure while {operation}")]
    Database {
        operation: &'static str,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl RepositoryError {
    /// Creates a not-found error for the given entity kind and identifier.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a constraint-violation error for the given operation.
    pub fn constraint(operation: &'static str, message: impl Into<String>) -> Self {
        RepositoryError::ConstraintViolation {
            operation,
            message: message.into(),
        }
    }

    /// Wraps a store-level failure with the operation it interrupted.
    pub fn database(operation: &'static str, source: impl Error + Send + Sync + 'static) -> Self {
        RepositoryError::Database {
            operation,
            source: Box::new(source),
        }
    }

    /// Wraps a rehydration failure with the identity of the offending row.
    pub fn invalid_row(entity: &'static str, id: impl ToString, source: ValidationError) -> Self {
        RepositoryError::Validation {
            context: format!("invalid {} row {}", entity, id.to_string()),
            source,
        }
    }

    /// Returns true if this error is the not-found category.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// Returns true if this error is the constraint-violation category.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, RepositoryError::ConstraintViolation { .. })
    }

    /// Returns true if this error is the validation category.
    pub fn is_validation(&self) -> bool {
        matches!(self, RepositoryError::Validation { .. })
    }
}

impl From<ValidationError> for RepositoryError {
    fn from(source: ValidationError) -> Self {
        RepositoryError::Validation {
            context: "validation failed".to_string(),
            source,
        }
    }
}
