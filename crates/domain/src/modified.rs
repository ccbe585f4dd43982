//! Modified-action index
//!
//! Tracks which default actions were edited in place. Keys are positional
//! (`category:index` or `category:subcategory:index`), so they go stale when a
//! deletion shifts later entries of the same list.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::ActionTarget;
use crate::error::DomainError;

/// Composite key for one position in a default action list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionKey {
    target: ActionTarget,
    index: usize,
}

impl ActionKey {
    pub fn new(target: ActionTarget, index: usize) -> Self {
        Self { target, index }
    }

    pub fn target(&self) -> &ActionTarget {
        &self.target
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target.subcategory() {
            Some(sub) => write!(f, "{}:{}:{}", self.target.category(), sub, self.index),
            None => write!(f, "{}:{}", self.target.category(), self.index),
        }
    }
}

impl FromStr for ActionKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, index) = s
            .rsplit_once(':')
            .ok_or_else(|| DomainError::parse(format!("Modified action key has no index: {s}")))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| DomainError::parse(format!("Modified action key has a bad index: {s}")))?;

        let target = match head.split_once(':') {
            Some((category, sub)) => ActionTarget::new(category, Some(sub)),
            None => ActionTarget::flat(head),
        };
        if target.category().is_empty() {
            return Err(DomainError::parse(format!(
                "Modified action key has no category: {s}"
            )));
        }

        Ok(Self { target, index })
    }
}

impl TryFrom<String> for ActionKey {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ActionKey> for String {
    fn from(key: ActionKey) -> String {
        key.to_string()
    }
}

/// Insertion-ordered set of modified default positions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifiedActions(IndexSet<ActionKey>);

impl ModifiedActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the key was already marked.
    pub fn mark(&mut self, key: ActionKey) -> bool {
        self.0.insert(key)
    }

    /// Returns `false` if the key was not marked.
    pub fn unmark(&mut self, key: &ActionKey) -> bool {
        self.0.shift_remove(key)
    }

    pub fn contains(&self, key: &ActionKey) -> bool {
        self.0.contains(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionKey> {
        self.0.iter()
    }

    /// Rebuild a stored index key by key, skipping keys that do not parse.
    ///
    /// Returns the skipped entries as text, or `None` when `value` is not a
    /// JSON array.
    pub fn from_json_tolerant(value: Value) -> Option<(Self, Vec<String>)> {
        let Value::Array(items) = value else {
            return None;
        };

        let mut keys = Self::new();
        let mut skipped = Vec::new();
        for item in items {
            match item.as_str().map(str::parse::<ActionKey>) {
                Some(Ok(key)) => {
                    keys.mark(key);
                }
                _ => skipped.push(item.to_string()),
            }
        }
        Some((keys, skipped))
    }
}

impl FromIterator<ActionKey> for ModifiedActions {
    fn from_iter<I: IntoIterator<Item = ActionKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_format_matches_storage() {
        let flat = ActionKey::new(ActionTarget::flat("maneuvers"), 3);
        let nested = ActionKey::new(ActionTarget::nested("Melee", "Swords"), 0);
        assert_eq!(flat.to_string(), "maneuvers:3");
        assert_eq!(nested.to_string(), "Melee:Swords:0");
    }

    #[test]
    fn key_parses_both_forms() {
        let nested: ActionKey = "Melee:Swords:12".parse().expect("valid key");
        assert_eq!(nested.target(), &ActionTarget::nested("Melee", "Swords"));
        assert_eq!(nested.index(), 12);

        let flat: ActionKey = "maneuvers:0".parse().expect("valid key");
        assert_eq!(flat.target(), &ActionTarget::flat("maneuvers"));
    }

    #[test]
    fn key_rejects_garbage() {
        assert!("maneuvers".parse::<ActionKey>().is_err());
        assert!("maneuvers:x".parse::<ActionKey>().is_err());
        assert!(":1".parse::<ActionKey>().is_err());
    }

    #[test]
    fn marking_twice_keeps_one_entry() {
        let mut modified = ModifiedActions::new();
        let key = ActionKey::new(ActionTarget::nested("Melee", "Swords"), 0);
        assert!(modified.mark(key.clone()));
        assert!(!modified.mark(key.clone()));
        assert_eq!(modified.len(), 1);
        assert!(modified.unmark(&key));
        assert!(modified.is_empty());
    }

    #[test]
    fn serializes_as_string_array_in_order() {
        let modified: ModifiedActions = [
            ActionKey::new(ActionTarget::flat("b"), 1),
            ActionKey::new(ActionTarget::nested("a", "x"), 0),
        ]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&modified).expect("serializable");
        assert_eq!(value, json!(["b:1", "a:x:0"]));

        let back: ModifiedActions = serde_json::from_value(value).expect("valid");
        assert_eq!(back, modified);
    }

    #[test]
    fn tolerant_read_skips_only_bad_keys() {
        let (modified, skipped) =
            ModifiedActions::from_json_tolerant(json!(["Melee:Swords:0", "Melee:Swords:", 4]))
                .expect("array");

        assert_eq!(modified.len(), 1);
        assert!(modified.contains(&ActionKey::new(ActionTarget::nested("Melee", "Swords"), 0)));
        assert_eq!(skipped, vec!["\"Melee:Swords:\"", "4"]);
        assert!(ModifiedActions::from_json_tolerant(json!({"a": 1})).is_none());
    }
}
