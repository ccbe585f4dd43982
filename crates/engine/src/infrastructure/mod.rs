//! Infrastructure adapters - implementations of port traits.

pub mod baseline;
pub mod chat;
pub mod clock;
pub mod config;
pub mod legacy_cache;
pub mod memory;
pub mod ports;
pub mod settings;
