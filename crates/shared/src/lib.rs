//! GRC Shared - contracts every host of the action library agrees on
//!
//! - Storage slot names and the data version tag
//! - Export/import payloads
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde, chrono and the domain crate
//! 2. **No business logic** - pure data types and serialization

pub mod storage_keys;
pub mod transfer;

pub use transfer::{export_file_name, ExportPayload, ImportPayload};
