//! Library errors and non-fatal warnings.

use grc_domain::DomainError;

use crate::infrastructure::ports::{BaselineError, StoreError};

/// Errors that stop a library operation before anything changes.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The baseline document could not be fetched or parsed.
    #[error("Failed to load actions data: {0}")]
    Load(#[from] BaselineError),

    /// Reading the settings store failed during load.
    #[error("Settings store error: {0}")]
    Store(#[from] StoreError),

    /// The target list or index is invalid; nothing was changed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Action library is not loaded")]
    NotLoaded,

    #[error("{0}")]
    PermissionDenied(String),
}

impl LibraryError {
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }
}

/// Something the user should hear about even though the operation went through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LibraryWarning {
    /// A slot write failed. The in-memory change stands.
    #[error("Failed to save {slot}, the change may not survive a reload: {message}")]
    Persistence { slot: &'static str, message: String },

    /// An import file carried another data version. The import still applied.
    #[error("Import file version {found} does not match {expected}, imported anyway")]
    ImportVersion { found: String, expected: &'static str },
}

impl LibraryWarning {
    pub fn persistence(slot: &'static str, error: impl ToString) -> Self {
        Self::Persistence {
            slot,
            message: error.to_string(),
        }
    }
}

/// Outcome of a committed change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    pub warnings: Vec<LibraryWarning>,
}

impl ChangeReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warn(&mut self, warning: LibraryWarning) {
        self.warnings.push(warning);
    }

    /// Slots whose write failed.
    pub fn failed_slots(&self) -> Vec<&'static str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                LibraryWarning::Persistence { slot, .. } => Some(*slot),
                LibraryWarning::ImportVersion { .. } => None,
            })
            .collect()
    }
}
