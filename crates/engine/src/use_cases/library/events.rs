//! Library change notifications.

use grc_domain::LayerChange;

/// Sent on the library's broadcast channel after state changes.
///
/// Receivers re-read whatever view they render; the event only says what
/// moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEvent {
    /// `load()` finished. `reset` is true when defaults came from the baseline.
    Loaded { reset: bool, migrated_legacy: bool },
    /// A mutation was applied to the in-memory layers.
    Changed(LayerChange),
}
