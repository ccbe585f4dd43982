//! Unified error types for the domain layer
//!
//! Provides a common error type for tree edits and draft validation so the
//! engine can report failures without falling back to strings.

use thiserror::Error;

use crate::category::ActionTarget;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a required field is empty)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An edit targeted a container or position that does not exist
    #[error("Invalid category target {target} at index {index}: {reason}")]
    InvalidCategory {
        target: ActionTarget,
        index: usize,
        reason: &'static str,
    },

    /// Parse error (for value objects such as modified-action keys)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for draft and form input.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Action name is required"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid category error for a missing or mis-shaped target.
    pub fn invalid_category(target: &ActionTarget, index: usize, reason: &'static str) -> Self {
        Self::InvalidCategory {
            target: target.clone(),
            index,
            reason,
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this is an invalid category error.
    pub fn is_invalid_category(&self) -> bool {
        matches!(self, Self::InvalidCategory { .. })
    }
}
