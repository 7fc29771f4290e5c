//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Duplicate ISBN, email, phone or username
    #[error("Unique constraint violation: {0}")]
    UniqueConstraintViolation(String),
    /// Delete or insert blocked by a foreign key
    #[error("Referential constraint violation: {0}")]
    ReferentialConstraintViolation(String),
    /// Issue attempted on a copy that is not `Available`
    #[error("Copy {0} is not available")]
    CopyUnavailable(i32),
    /// Return attempted on a transaction that already has a return date
    #[error("Transaction {0} is already closed")]
    LoanAlreadyClosed(i32),
    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    /// Any other database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Stable machine-readable name, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound => "not_found",
            DomainError::UniqueConstraintViolation(_) => "unique_constraint_violation",
            DomainError::ReferentialConstraintViolation(_) => "referential_constraint_violation",
            DomainError::CopyUnavailable(_) => "copy_unavailable",
            DomainError::LoanAlreadyClosed(_) => "loan_already_closed",
            DomainError::StoreUnavailable(_) => "store_unavailable",
            DomainError::Database(_) => "database",
            DomainError::Internal(_) => "internal",
        }
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                return DomainError::UniqueConstraintViolation(msg);
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return DomainError::ReferentialConstraintViolation(msg);
            }
            _ => {}
        }

        match &e {
            DbErr::RecordNotFound(_) => DomainError::NotFound,
            DbErr::Conn(_) => DomainError::StoreUnavailable(e.to_string()),
            _ => classify_message(e.to_string()),
        }
    }
}

// Drivers that don't report a constraint code still name the constraint in
// the message (SQLite and MySQL wording).
fn classify_message(msg: String) -> DomainError {
    let lower = msg.to_lowercase();
    if lower.contains("unique constraint failed") || lower.contains("duplicate entry") {
        DomainError::UniqueConstraintViolation(msg)
    } else if lower.contains("foreign key constraint") {
        DomainError::ReferentialConstraintViolation(msg)
    } else {
        DomainError::Database(msg)
    }
}
