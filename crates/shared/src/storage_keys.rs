//! Storage slot names and the data version tag.
//!
//! The four slots live in the host's key/value settings store and are shared
//! by every window of one deployment; the last writer wins.

/// Identifier of the module inside the host application.
pub const MODULE_ID: &str = "gurps-rules-companion";

/// Current data version. A stored version that differs triggers a reset.
pub const DATA_VERSION: &str = "1.0.0";

/// Baseline document location, relative to the host's asset root.
pub const BASELINE_PATH: &str = "modules/gurps-rules-companion/data.json";

/// Slot holding the default category tree.
pub const DEFAULT_DATA: &str = "defaultData";

/// Slot holding the custom category tree.
pub const CUSTOM_DATA: &str = "customData";

/// Slot holding the modified-action keys.
pub const MODIFIED_ACTIONS: &str = "modifiedActions";

/// Slot holding the data version tag.
pub const DATA_VERSION_KEY: &str = "dataVersion";

/// Legacy per-user cache entry that held custom actions before the shared store.
pub const LEGACY_CUSTOM_ACTIONS: &str = "gurps-rules-companion.customActions";

/// All persisted slots, in the order they are written on a reset.
pub const ALL_SLOTS: [&str; 4] = [DEFAULT_DATA, CUSTOM_DATA, MODIFIED_ACTIONS, DATA_VERSION_KEY];
