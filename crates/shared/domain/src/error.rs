//! Domain-level errors.
//!
//! Raised by domain value objects before anything touches storage or HTTP.

use thiserror::Error;

/// Business rule violations in account data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Plain text password below the minimum length
    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    /// Hashing backend failure or a stored hash that cannot be parsed
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
