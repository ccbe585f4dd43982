//! Layered merge of default and custom category trees
//!
//! The merged view is always `default` first, then `custom`. When the two
//! layers disagree on a category's shape, one side is wrapped in a synthetic
//! subcategory:
//!
//! | default | custom | merged                                        |
//! |---------|--------|-----------------------------------------------|
//! | flat    | flat   | flat, `default ++ custom`                     |
//! | nested  | nested | nested, per-subcategory `default ++ custom`   |
//! | flat    | nested | nested, default list under `"default"`        |
//! | nested  | flat   | nested, custom list under `"custom"`          |
//!
//! The wrapping only exists in the merged view; stored layers keep their shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::{ActionTarget, CategoryTree, CategoryValue, Subcategories};
use crate::error::DomainError;

/// Subcategory that holds a flat default list when custom data nests the category.
pub const DEFAULT_SUBCATEGORY: &str = "default";

/// Subcategory that holds a flat custom list when default data nests the category.
pub const CUSTOM_SUBCATEGORY: &str = "custom";

/// Which layer an entry in the merged view comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSource {
    Default,
    Custom,
}

impl ActionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ActionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::parse(format!("Unknown action source: {other}"))),
        }
    }
}

/// A merged-view position translated back to the layer that stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPosition {
    pub source: ActionSource,
    pub target: ActionTarget,
    pub index: usize,
}

/// Merge `custom` over `default` into a new tree.
pub fn merge_layers(default: &CategoryTree, custom: &CategoryTree) -> CategoryTree {
    let mut merged = default.clone();

    for (category, custom_value) in custom.iter() {
        if !merged.contains(category) {
            merged.insert(category, custom_value.clone());
            continue;
        }
        let Some(existing) = merged.get_mut(category) else {
            continue;
        };

        let base = std::mem::replace(existing, CategoryValue::Flat(Vec::new()));
        *existing = match (base, custom_value) {
            (CategoryValue::Flat(mut actions), CategoryValue::Flat(extra)) => {
                actions.extend(extra.iter().cloned());
                CategoryValue::Flat(actions)
            }
            (CategoryValue::Nested(mut subs), CategoryValue::Nested(extra)) => {
                merge_subcategories(&mut subs, extra);
                CategoryValue::Nested(subs)
            }
            (CategoryValue::Flat(actions), CategoryValue::Nested(extra)) => {
                let mut subs = Subcategories::new();
                subs.insert(DEFAULT_SUBCATEGORY.to_string(), actions);
                merge_subcategories(&mut subs, extra);
                CategoryValue::Nested(subs)
            }
            (CategoryValue::Nested(mut subs), CategoryValue::Flat(extra)) => {
                subs.entry(CUSTOM_SUBCATEGORY.to_string())
                    .or_default()
                    .extend(extra.iter().cloned());
                CategoryValue::Nested(subs)
            }
        };
    }

    merged
}

fn merge_subcategories(into: &mut Subcategories, extra: &Subcategories) {
    for (sub, actions) in extra {
        into.entry(sub.clone())
            .or_default()
            .extend(actions.iter().cloned());
    }
}

/// The default-layer list backing `target` in the merged view.
fn default_target(default: &CategoryTree, target: &ActionTarget) -> ActionTarget {
    match (default.get(target.category()), target.subcategory()) {
        (Some(CategoryValue::Flat(_)), Some(DEFAULT_SUBCATEGORY)) => {
            ActionTarget::flat(target.category())
        }
        _ => target.clone(),
    }
}

/// The custom-layer list backing `target` in the merged view.
fn custom_target(custom: &CategoryTree, target: &ActionTarget) -> ActionTarget {
    match (custom.get(target.category()), target.subcategory()) {
        (Some(CategoryValue::Flat(_)), Some(CUSTOM_SUBCATEGORY)) => {
            ActionTarget::flat(target.category())
        }
        _ => target.clone(),
    }
}

/// Number of default entries at the front of `target` in the merged view.
pub fn default_len(default: &CategoryTree, target: &ActionTarget) -> usize {
    default
        .actions(&default_target(default, target))
        .map_or(0, <[_]>::len)
}

/// Map a merged-view index to the layer, list and index that store it.
///
/// Returns `None` when `index` is past the end of the merged list.
pub fn locate(
    default: &CategoryTree,
    custom: &CategoryTree,
    target: &ActionTarget,
    index: usize,
) -> Option<LayerPosition> {
    let defaults = default_len(default, target);
    if index < defaults {
        return Some(LayerPosition {
            source: ActionSource::Default,
            target: default_target(default, target),
            index,
        });
    }

    let custom_target = custom_target(custom, target);
    let customs = custom.actions(&custom_target).map_or(0, <[_]>::len);
    let custom_index = index - defaults;
    (custom_index < customs).then_some(LayerPosition {
        source: ActionSource::Custom,
        target: custom_target,
        index: custom_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> CategoryTree {
        serde_json::from_value(value).expect("valid tree")
    }

    #[test]
    fn flat_layers_concatenate_default_first() {
        let default = tree(json!({"maneuvers": [{"name": "A"}, {"name": "B"}]}));
        let custom = tree(json!({"maneuvers": [{"name": "C"}]}));

        let merged = merge_layers(&default, &custom);
        assert_eq!(
            merged,
            tree(json!({"maneuvers": [{"name": "A"}, {"name": "B"}, {"name": "C"}]}))
        );

        let target = ActionTarget::flat("maneuvers");
        assert_eq!(default_len(&default, &target), 2);
    }

    #[test]
    fn nested_layers_merge_per_subcategory() {
        let default = tree(json!({"Melee": {"Swords": [{"name": "Slash"}]}}));
        let custom = tree(json!({"Melee": {"Swords": [{"name": "Riposte"}], "Axes": [{"name": "Hook"}]}}));

        let merged = merge_layers(&default, &custom);
        assert_eq!(
            merged,
            tree(json!({"Melee": {
                "Swords": [{"name": "Slash"}, {"name": "Riposte"}],
                "Axes": [{"name": "Hook"}]
            }}))
        );
    }

    #[test]
    fn flat_default_with_nested_custom_wraps_defaults() {
        let default = tree(json!({"Melee": [{"name": "A"}]}));
        let custom = tree(json!({"Melee": {"x": [{"name": "B"}]}}));

        let merged = merge_layers(&default, &custom);
        assert_eq!(
            merged,
            tree(json!({"Melee": {"default": [{"name": "A"}], "x": [{"name": "B"}]}}))
        );
        // Stored layer keeps its shape
        assert!(!default.get("Melee").expect("present").is_nested());
    }

    #[test]
    fn nested_default_with_flat_custom_adds_custom_subcategory() {
        let default = tree(json!({"Melee": {"Swords": [{"name": "Slash"}]}}));
        let custom = tree(json!({"Melee": [{"name": "Shove"}]}));

        let merged = merge_layers(&default, &custom);
        assert_eq!(
            merged,
            tree(json!({"Melee": {"Swords": [{"name": "Slash"}], "custom": [{"name": "Shove"}]}}))
        );
    }

    #[test]
    fn custom_only_categories_follow_default_keys() {
        let default = tree(json!({"b": [{"name": "1"}], "a": [{"name": "2"}]}));
        let custom = tree(json!({"z": [{"name": "3"}], "a": [{"name": "4"}], "c": [{"name": "5"}]}));

        let merged = merge_layers(&default, &custom);
        assert_eq!(merged.categories().collect::<Vec<_>>(), vec!["b", "a", "z", "c"]);
    }

    #[test]
    fn locate_maps_merged_index_to_layers() {
        let default = tree(json!({"Melee": {"Swords": [{"name": "Slash"}]}}));
        let mut custom = CategoryTree::new();
        custom
            .push_action(&ActionTarget::nested("Melee", "Swords"), Action::named("Riposte"))
            .expect("pushed");
        let target = ActionTarget::nested("Melee", "Swords");

        let first = locate(&default, &custom, &target, 0).expect("in range");
        assert_eq!(first.source, ActionSource::Default);
        assert_eq!(first.index, 0);

        let second = locate(&default, &custom, &target, 1).expect("in range");
        assert_eq!(second.source, ActionSource::Custom);
        assert_eq!(second.index, 0);

        assert!(locate(&default, &custom, &target, 2).is_none());
    }

    #[test]
    fn locate_sees_through_synthetic_subcategories() {
        let default = tree(json!({"Melee": [{"name": "A"}], "Ranged": {"Bows": [{"name": "Aim"}]}}));
        let custom = tree(json!({"Melee": {"x": [{"name": "B"}]}, "Ranged": [{"name": "Throw"}]}));

        let wrapped = locate(&default, &custom, &ActionTarget::nested("Melee", "default"), 0)
            .expect("in range");
        assert_eq!(wrapped.source, ActionSource::Default);
        assert_eq!(wrapped.target, ActionTarget::flat("Melee"));

        let appended = locate(&default, &custom, &ActionTarget::nested("Ranged", "custom"), 0)
            .expect("in range");
        assert_eq!(appended.source, ActionSource::Custom);
        assert_eq!(appended.target, ActionTarget::flat("Ranged"));
    }

    #[test]
    fn action_source_parses() {
        assert_eq!("custom".parse::<ActionSource>(), Ok(ActionSource::Custom));
        assert!("both".parse::<ActionSource>().is_err());
    }
}
