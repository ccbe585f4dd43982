//! Error types for port operations.

/// Settings store errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization of a slot value failed.
    #[error("Serialization error in slot {slot}: {message}")]
    Serialization { slot: String, message: String },

    /// The store refused the write (read-only host, quota, ...).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error for one slot.
    pub fn serialization(slot: impl Into<String>, message: impl ToString) -> Self {
        Self::Serialization {
            slot: slot.into(),
            message: message.to_string(),
        }
    }

    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }
}

/// The baseline document could not be fetched or parsed.
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("Failed to read baseline {location}: {message}")]
    Unreachable { location: String, message: String },

    #[error("Failed to parse baseline {location}: {message}")]
    Invalid { location: String, message: String },
}

impl BaselineError {
    pub fn unreachable(location: impl Into<String>, message: impl ToString) -> Self {
        Self::Unreachable {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid(location: impl Into<String>, message: impl ToString) -> Self {
        Self::Invalid {
            location: location.into(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ChatError {
    #[error("No action selected to send to chat")]
    NoActionSelected,
    #[error("Failed to post chat message: {0}")]
    PostFailed(String),
}
