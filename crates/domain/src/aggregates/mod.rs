//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns domain events from mutations

pub mod action_layers;

pub use action_layers::{ActionLayers, ActionView, ChangedLayers, LayerChange};
