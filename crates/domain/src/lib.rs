//! GRC Domain - action records, category trees and the layered merge.
//!
//! Everything here is pure: no storage, no async. The engine crate reaches
//! persistence through its ports and keeps this crate's invariants intact by
//! only mutating data through `ActionLayers`.

pub mod action;
pub mod aggregates;
pub mod category;
pub mod error;
pub mod merge;
pub mod modified;
pub mod naming;

pub use action::{Action, ActionDraft, Defenses, Movement};
pub use aggregates::{ActionLayers, ActionView, ChangedLayers, LayerChange};
pub use category::{ActionTarget, CategoryTree, CategoryValue, Subcategories};
pub use error::DomainError;
pub use merge::{merge_layers, ActionSource, LayerPosition, CUSTOM_SUBCATEGORY, DEFAULT_SUBCATEGORY};
pub use modified::{ActionKey, ModifiedActions};
pub use naming::format_category_name;
