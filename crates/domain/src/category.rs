//! Category trees
//!
//! A category maps either to a flat list of actions or to named subcategory
//! lists. The shape is carried by `CategoryValue` rather than inferred from
//! JSON types at each call site.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::error::DomainError;

/// Subcategory name -> ordered actions.
pub type Subcategories = IndexMap<String, Vec<Action>>;

/// The value stored under one category key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Flat(Vec<Action>),
    Nested(Subcategories),
}

impl CategoryValue {
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// Total number of actions across all lists in this category.
    pub fn action_count(&self) -> usize {
        match self {
            Self::Flat(actions) => actions.len(),
            Self::Nested(subs) => subs.values().map(Vec::len).sum(),
        }
    }
}

/// Names one action list: a flat category, or a subcategory of a nested one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionTarget {
    category: String,
    subcategory: Option<String>,
}

impl ActionTarget {
    /// Host forms submit `""` for "no subcategory"; that is normalized to `None`.
    pub fn new(category: impl Into<String>, subcategory: Option<&str>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.filter(|s| !s.is_empty()).map(String::from),
        }
    }

    pub fn flat(category: impl Into<String>) -> Self {
        Self::new(category, None)
    }

    pub fn nested(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        let subcategory = subcategory.into();
        Self::new(category, Some(subcategory.as_str()))
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subcategory {
            Some(sub) => write!(f, "{}/{}", self.category, sub),
            None => write!(f, "{}", self.category),
        }
    }
}

/// Category name -> category value, in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree(IndexMap<String, CategoryValue>);

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, category: &str) -> Option<&CategoryValue> {
        self.0.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert or replace a whole category.
    pub fn insert(&mut self, category: impl Into<String>, value: CategoryValue) {
        self.0.insert(category.into(), value);
    }

    pub(crate) fn get_mut(&mut self, category: &str) -> Option<&mut CategoryValue> {
        self.0.get_mut(category)
    }

    /// The action list at `target`, or `None` when missing or mis-shaped.
    pub fn actions(&self, target: &ActionTarget) -> Option<&[Action]> {
        match (self.0.get(target.category())?, target.subcategory()) {
            (CategoryValue::Flat(actions), None) => Some(actions.as_slice()),
            (CategoryValue::Nested(subs), Some(sub)) => subs.get(sub).map(Vec::as_slice),
            _ => None,
        }
    }

    fn actions_mut(&mut self, target: &ActionTarget) -> Option<&mut Vec<Action>> {
        match (self.0.get_mut(target.category())?, target.subcategory()) {
            (CategoryValue::Flat(actions), None) => Some(actions),
            (CategoryValue::Nested(subs), Some(sub)) => subs.get_mut(sub),
            _ => None,
        }
    }

    /// Append an action, creating the category or subcategory on demand.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCategory` if the category exists with the
    /// other shape (a subcategory append into a flat category, or a direct
    /// append into a nested one).
    pub fn push_action(&mut self, target: &ActionTarget, action: Action) -> Result<usize, DomainError> {
        let entry = self
            .0
            .entry(target.category().to_string())
            .or_insert_with(|| match target.subcategory() {
                Some(_) => CategoryValue::Nested(Subcategories::new()),
                None => CategoryValue::Flat(Vec::new()),
            });

        let list = match (entry, target.subcategory()) {
            (CategoryValue::Flat(actions), None) => actions,
            (CategoryValue::Nested(subs), Some(sub)) => subs.entry(sub.to_string()).or_default(),
            (CategoryValue::Flat(actions), Some(_)) => {
                return Err(DomainError::invalid_category(
                    target,
                    actions.len(),
                    "category holds actions directly, not subcategories",
                ))
            }
            (CategoryValue::Nested(_), None) => {
                return Err(DomainError::invalid_category(
                    target,
                    0,
                    "category holds subcategories, not actions",
                ))
            }
        };

        list.push(action);
        Ok(list.len() - 1)
    }

    /// Replace the action at `index` in place.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCategory` if the list does not exist or
    /// `index` is out of range. The tree is unchanged on error.
    pub fn replace_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
        action: Action,
    ) -> Result<Action, DomainError> {
        let list = self
            .actions_mut(target)
            .ok_or_else(|| DomainError::invalid_category(target, index, "no such action list"))?;
        let slot = list
            .get_mut(index)
            .ok_or_else(|| DomainError::invalid_category(target, index, "index out of range"))?;
        Ok(std::mem::replace(slot, action))
    }

    /// Remove the action at `index`, shifting later entries down.
    ///
    /// When the list becomes empty its key is removed: the subcategory key for
    /// nested categories, the category key for flat ones. A nested category
    /// left without subcategories is kept as an empty mapping.
    pub fn remove_action(&mut self, target: &ActionTarget, index: usize) -> Result<Action, DomainError> {
        let list = self
            .actions_mut(target)
            .ok_or_else(|| DomainError::invalid_category(target, index, "no such action list"))?;
        if index >= list.len() {
            return Err(DomainError::invalid_category(target, index, "index out of range"));
        }

        let removed = list.remove(index);
        if list.is_empty() {
            match target.subcategory() {
                Some(sub) => {
                    if let Some(CategoryValue::Nested(subs)) = self.0.get_mut(target.category()) {
                        subs.shift_remove(sub);
                    }
                }
                None => {
                    self.0.shift_remove(target.category());
                }
            }
        }
        Ok(removed)
    }
}

impl CategoryTree {
    /// Rebuild a stored tree entry by entry, keeping every action that parses.
    ///
    /// Anything that does not fit is left out and named in the returned list
    /// as `category`, `category/sub` or `category/sub[index]`. Returns `None`
    /// when `value` is not a JSON object at all.
    pub fn from_json_tolerant(value: Value) -> Option<(Self, Vec<String>)> {
        let Value::Object(categories) = value else {
            return None;
        };

        let mut tree = Self::new();
        let mut skipped = Vec::new();
        for (category, value) in categories {
            match value {
                Value::Array(items) => {
                    let actions = tolerant_actions(&category, items, &mut skipped);
                    tree.insert(category, CategoryValue::Flat(actions));
                }
                Value::Object(subs) => {
                    let mut nested = Subcategories::new();
                    for (sub, value) in subs {
                        let path = format!("{category}/{sub}");
                        match value {
                            Value::Array(items) => {
                                let actions = tolerant_actions(&path, items, &mut skipped);
                                nested.insert(sub, actions);
                            }
                            _ => skipped.push(path),
                        }
                    }
                    tree.insert(category, CategoryValue::Nested(nested));
                }
                _ => skipped.push(category),
            }
        }
        Some((tree, skipped))
    }
}

fn tolerant_actions(path: &str, items: Vec<Value>, skipped: &mut Vec<String>) -> Vec<Action> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(action) => Some(action),
            Err(_) => {
                skipped.push(format!("{path}[{index}]"));
                None
            }
        })
        .collect()
}

impl FromIterator<(String, CategoryValue)> for CategoryTree {
    fn from_iter<I: IntoIterator<Item = (String, CategoryValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(actions: &[Action]) -> Vec<&str> {
        actions.iter().map(|a| a.name.as_str()).collect()
    }

    fn sample() -> CategoryTree {
        serde_json::from_value(json!({
            "maneuvers": [{"name": "Attack"}, {"name": "Feint"}],
            "Melee": {"Swords": [{"name": "Slash"}], "Axes": [{"name": "Chop"}]}
        }))
        .expect("valid tree")
    }

    #[test]
    fn shape_comes_from_json_type() {
        let tree = sample();
        assert!(!tree.get("maneuvers").expect("present").is_nested());
        assert!(tree.get("Melee").expect("present").is_nested());
        assert_eq!(tree.categories().collect::<Vec<_>>(), vec!["maneuvers", "Melee"]);
    }

    #[test]
    fn empty_subcategory_normalizes_to_flat_target() {
        assert_eq!(ActionTarget::new("maneuvers", Some("")), ActionTarget::flat("maneuvers"));
    }

    #[test]
    fn actions_respects_shape() {
        let tree = sample();
        assert_eq!(
            names(tree.actions(&ActionTarget::flat("maneuvers")).expect("flat")),
            vec!["Attack", "Feint"]
        );
        assert!(tree.actions(&ActionTarget::flat("Melee")).is_none());
        assert!(tree.actions(&ActionTarget::nested("maneuvers", "x")).is_none());
    }

    #[test]
    fn push_creates_containers_on_demand() {
        let mut tree = CategoryTree::new();
        tree.push_action(&ActionTarget::nested("Ranged", "Bows"), Action::named("Aim"))
            .expect("created");
        tree.push_action(&ActionTarget::flat("postures"), Action::named("Crouch"))
            .expect("created");

        assert!(tree.get("Ranged").expect("present").is_nested());
        assert_eq!(
            names(tree.actions(&ActionTarget::flat("postures")).expect("flat")),
            vec!["Crouch"]
        );
    }

    #[test]
    fn push_rejects_shape_conflict() {
        let mut tree = sample();
        let err = tree
            .push_action(&ActionTarget::nested("maneuvers", "extra"), Action::named("X"))
            .expect_err("conflict");
        assert!(err.is_invalid_category());
        assert_eq!(tree, sample());
    }

    #[test]
    fn replace_validates_index() {
        let mut tree = sample();
        let err = tree
            .replace_action(&ActionTarget::flat("maneuvers"), 2, Action::named("X"))
            .expect_err("out of range");
        assert!(err.is_invalid_category());

        let old = tree
            .replace_action(&ActionTarget::flat("maneuvers"), 1, Action::named("Feint!"))
            .expect("replaced");
        assert_eq!(old.name, "Feint");
    }

    #[test]
    fn removing_last_subcategory_action_drops_only_the_subcategory() {
        let mut tree = sample();
        tree.remove_action(&ActionTarget::nested("Melee", "Swords"), 0)
            .expect("removed");
        tree.remove_action(&ActionTarget::nested("Melee", "Axes"), 0)
            .expect("removed");

        match tree.get("Melee") {
            Some(CategoryValue::Nested(subs)) => assert!(subs.is_empty()),
            other => panic!("expected empty nested category, got {other:?}"),
        }
    }

    #[test]
    fn tolerant_read_keeps_every_action_that_parses() {
        let (tree, skipped) = CategoryTree::from_json_tolerant(json!({
            "postures": [{"name": "Kneel"}, {"name": "Crawl", "attack": "no"}],
            "Ranged": [{"name": "Aim"}],
            "Melee": {"Swords": [{"name": "Slash"}, 7], "Axes": "chop"},
            "broken": 3
        }))
        .expect("object");

        assert_eq!(
            tree.categories().collect::<Vec<_>>(),
            vec!["postures", "Ranged", "Melee"]
        );
        assert_eq!(
            names(tree.actions(&ActionTarget::flat("postures")).expect("flat")),
            vec!["Kneel"]
        );
        assert_eq!(
            names(tree.actions(&ActionTarget::nested("Melee", "Swords")).expect("nested")),
            vec!["Slash"]
        );
        assert_eq!(
            skipped,
            vec!["postures[1]", "Melee/Swords[1]", "Melee/Axes", "broken"]
        );
    }

    #[test]
    fn tolerant_read_of_valid_tree_matches_strict_read() {
        let value = json!({
            "maneuvers": [{"name": "Attack"}, {"name": "Feint"}],
            "Melee": {"Swords": [{"name": "Slash"}], "Axes": [{"name": "Chop"}]}
        });
        let (tree, skipped) = CategoryTree::from_json_tolerant(value).expect("object");
        assert_eq!(tree, sample());
        assert!(skipped.is_empty());
        assert!(CategoryTree::from_json_tolerant(json!("garbage")).is_none());
    }

    #[test]
    fn removing_last_flat_action_drops_the_category() {
        let mut tree = sample();
        tree.remove_action(&ActionTarget::flat("maneuvers"), 0).expect("removed");
        tree.remove_action(&ActionTarget::flat("maneuvers"), 0).expect("removed");
        assert!(!tree.contains("maneuvers"));
    }
}
