//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The host's settings store (could swap SQLite -> browser settings -> memory)
//! - The baseline document (file on disk or served over HTTP)
//! - The legacy per-user cache (migrated once, then removed)
//! - The chat log the host exposes
//! - Clock (for testing)

mod error;
mod external;
mod storage;
mod testing;

// =============================================================================
// Storage Ports
// =============================================================================
pub use storage::{BaselineSource, LegacyCache, SettingsStore};

#[cfg(test)]
pub use storage::{MockBaselineSource, MockSettingsStore};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{ChatMessage, ChatPort};

#[cfg(test)]
pub use external::MockChatPort;

// =============================================================================
// Errors
// =============================================================================
pub use error::{BaselineError, ChatError, StoreError};

// =============================================================================
// Testability Ports
// =============================================================================
pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;
