//! ActionLayers aggregate - default data, custom data and their merged view
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: the merged view can only change through a mutation
//! - **Derived state**: every mutation recomputes the merged tree before returning
//! - **Validate first**: tree edits fail before anything is touched
//! - **Domain events**: mutations return a `LayerChange` describing what moved

use serde::Serialize;

use crate::action::Action;
use crate::category::{ActionTarget, CategoryTree, CategoryValue};
use crate::error::DomainError;
use crate::merge::{self, ActionSource, LayerPosition};
use crate::modified::{ActionKey, ModifiedActions};

/// An action as shown to the user, with its provenance.
///
/// The action stays nested so its own fields never collide with the view's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
    pub action: Action,
    pub is_modified: bool,
    pub source: ActionSource,
}

/// Which stored layers a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangedLayers {
    pub default_data: bool,
    pub custom_data: bool,
    pub modified: bool,
}

/// Domain event returned from `ActionLayers` mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerChange {
    CustomActionAdded { target: ActionTarget, index: usize },
    CustomActionUpdated { target: ActionTarget, index: usize },
    CustomActionDeleted { target: ActionTarget, index: usize },
    DefaultActionUpdated { target: ActionTarget, index: usize },
    DefaultActionDeleted { target: ActionTarget, index: usize },
    CustomDataReplaced,
    CustomDataReset,
    ResetToDefaults,
    AllReplaced,
}

impl LayerChange {
    pub fn layers(&self) -> ChangedLayers {
        match self {
            Self::CustomActionAdded { .. }
            | Self::CustomActionUpdated { .. }
            | Self::CustomActionDeleted { .. }
            | Self::CustomDataReplaced
            | Self::CustomDataReset => ChangedLayers {
                custom_data: true,
                ..Default::default()
            },
            Self::DefaultActionUpdated { .. } | Self::DefaultActionDeleted { .. } => {
                ChangedLayers {
                    default_data: true,
                    modified: true,
                    ..Default::default()
                }
            }
            Self::ResetToDefaults | Self::AllReplaced => ChangedLayers {
                default_data: true,
                custom_data: true,
                modified: true,
            },
        }
    }
}

/// Default and custom layers plus the merged view the UI renders from.
///
/// # Invariants
///
/// - `merged == merge_layers(default_data, custom_data)` after every public call
/// - `modified` has set semantics (no duplicate keys)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLayers {
    default_data: CategoryTree,
    custom_data: CategoryTree,
    modified: ModifiedActions,
    merged: CategoryTree,
}

impl ActionLayers {
    pub fn new(
        default_data: CategoryTree,
        custom_data: CategoryTree,
        modified: ModifiedActions,
    ) -> Self {
        let mut layers = Self {
            default_data,
            custom_data,
            modified,
            merged: CategoryTree::new(),
        };
        layers.remerge();
        layers
    }

    /// Fresh layers from a baseline document: no custom data, nothing modified.
    pub fn from_baseline(baseline: CategoryTree) -> Self {
        Self::new(baseline, CategoryTree::new(), ModifiedActions::new())
    }

    fn remerge(&mut self) {
        self.merged = merge::merge_layers(&self.default_data, &self.custom_data);
    }

    // =========================================================================
    // Layer Accessors
    // =========================================================================

    pub fn default_data(&self) -> &CategoryTree {
        &self.default_data
    }

    pub fn custom_data(&self) -> &CategoryTree {
        &self.custom_data
    }

    pub fn modified(&self) -> &ModifiedActions {
        &self.modified
    }

    pub fn merged(&self) -> &CategoryTree {
        &self.merged
    }

    // =========================================================================
    // Merged View Queries
    // =========================================================================

    pub fn main_categories(&self) -> Vec<&str> {
        self.merged.categories().collect()
    }

    pub fn has_subcategories(&self, category: &str) -> bool {
        self.merged.get(category).is_some_and(CategoryValue::is_nested)
    }

    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        match self.merged.get(category) {
            Some(CategoryValue::Nested(subs)) => subs.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn actions_for_subcategory(&self, category: &str, subcategory: &str) -> &[Action] {
        self.merged
            .actions(&ActionTarget::nested(category, subcategory))
            .unwrap_or_default()
    }

    pub fn actions_for_main_category(&self, category: &str) -> &[Action] {
        self.merged
            .actions(&ActionTarget::flat(category))
            .unwrap_or_default()
    }

    /// The merged-view action at `index`, or `None` when out of range.
    pub fn action(&self, target: &ActionTarget, index: usize) -> Option<ActionView> {
        let action = self.merged.actions(target)?.get(index)?.clone();
        let position = self.locate(target, index);
        let source = position
            .as_ref()
            .map_or_else(|| self.action_source(target, index), |p| p.source);
        let is_modified = position.is_some_and(|p| {
            p.source == ActionSource::Default
                && self.modified.contains(&ActionKey::new(p.target, p.index))
        });

        Some(ActionView {
            action,
            is_modified,
            source,
        })
    }

    /// `Default` iff `index` is inside the current default list for `target`.
    ///
    /// This compares against the live default length; it is not a stored tag.
    pub fn action_source(&self, target: &ActionTarget, index: usize) -> ActionSource {
        if index < merge::default_len(&self.default_data, target) {
            ActionSource::Default
        } else {
            ActionSource::Custom
        }
    }

    /// Translate a merged-view index into the layer position that stores it.
    pub fn locate(&self, target: &ActionTarget, index: usize) -> Option<LayerPosition> {
        merge::locate(&self.default_data, &self.custom_data, target, index)
    }

    pub fn is_action_modified(&self, target: &ActionTarget, index: usize) -> bool {
        self.modified
            .contains(&ActionKey::new(target.clone(), index))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add_custom_action(
        &mut self,
        target: &ActionTarget,
        action: Action,
    ) -> Result<LayerChange, DomainError> {
        let index = self.custom_data.push_action(target, action)?;
        self.remerge();
        Ok(LayerChange::CustomActionAdded {
            target: target.clone(),
            index,
        })
    }

    pub fn update_custom_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
        action: Action,
    ) -> Result<LayerChange, DomainError> {
        self.custom_data.replace_action(target, index, action)?;
        self.remerge();
        Ok(LayerChange::CustomActionUpdated {
            target: target.clone(),
            index,
        })
    }

    /// Replace a default action in place and mark its position as modified.
    pub fn update_default_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
        action: Action,
    ) -> Result<LayerChange, DomainError> {
        self.default_data.replace_action(target, index, action)?;
        self.modified.mark(ActionKey::new(target.clone(), index));
        self.remerge();
        Ok(LayerChange::DefaultActionUpdated {
            target: target.clone(),
            index,
        })
    }

    pub fn delete_custom_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
    ) -> Result<LayerChange, DomainError> {
        self.custom_data.remove_action(target, index)?;
        self.remerge();
        Ok(LayerChange::CustomActionDeleted {
            target: target.clone(),
            index,
        })
    }

    /// Remove a default action and unmark the removed position.
    ///
    /// Keys for later positions in the same list are left as they are, so a
    /// marker can end up on the entry that shifted into a modified slot.
    pub fn delete_default_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
    ) -> Result<LayerChange, DomainError> {
        self.default_data.remove_action(target, index)?;
        self.modified.unmark(&ActionKey::new(target.clone(), index));
        self.remerge();
        Ok(LayerChange::DefaultActionDeleted {
            target: target.clone(),
            index,
        })
    }

    pub fn set_custom_data(&mut self, custom_data: CategoryTree) -> LayerChange {
        self.custom_data = custom_data;
        self.remerge();
        LayerChange::CustomDataReplaced
    }

    pub fn reset_custom_data(&mut self) -> LayerChange {
        self.custom_data = CategoryTree::new();
        self.remerge();
        LayerChange::CustomDataReset
    }

    pub fn reset_to_defaults(&mut self, baseline: CategoryTree) -> LayerChange {
        self.default_data = baseline;
        self.custom_data = CategoryTree::new();
        self.modified.clear();
        self.remerge();
        LayerChange::ResetToDefaults
    }

    pub fn replace_all(
        &mut self,
        default_data: CategoryTree,
        custom_data: CategoryTree,
        modified: ModifiedActions,
    ) -> LayerChange {
        self.default_data = default_data;
        self.custom_data = custom_data;
        self.modified = modified;
        self.remerge();
        LayerChange::AllReplaced
    }
}
