//! Action records - the leaf entries of a category tree
//!
//! Field names follow the persisted JSON documents (`ref`, `notes`, ...).
//! Keys this crate does not model are kept in `extra` so a baseline document
//! survives a load/save cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;

fn is_false(value: &bool) -> bool {
    !*value
}

/// One selectable game maneuver.
///
/// Actions carry no identity of their own; they are addressed by
/// category, optional subcategory and position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    pub name: String,

    /// Cross-reference code such as `B364` or `[PDF: MA102]`
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub attack: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defenses: Option<Defenses>,

    /// Rendered with the abbreviated detail template
    #[serde(default, skip_serializing_if = "is_false")]
    pub special: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Action {
    /// Create an action with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = Some(movement);
        self
    }

    pub fn with_defenses(mut self, defenses: Defenses) -> Self {
        self.defenses = Some(defenses);
        self
    }

    pub fn with_attack(mut self, attack: bool) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_special(mut self, special: bool) -> Self {
        self.special = special;
        self
    }

    /// Whether the action allows any movement.
    pub fn has_movement(&self) -> bool {
        self.movement.as_ref().is_some_and(Movement::is_active)
    }
}

/// Movement allowed by an action.
///
/// Baseline documents use descriptors ("none", "step", "half move"); the
/// simplified editor only records a checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Movement {
    Flag(bool),
    Descriptor(String),
}

impl Movement {
    pub fn is_active(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Descriptor(text) => !text.is_empty() && text != "none",
        }
    }

    /// Descriptor text worth showing to a user, if any.
    pub fn display_descriptor(&self) -> Option<&str> {
        match self {
            Self::Flag(_) => None,
            Self::Descriptor(text) if text.is_empty() || text == "none" || text == "no" => None,
            Self::Descriptor(text) => Some(text.as_str()),
        }
    }

    /// Descriptor text for chat cards. Unlike the detail pane, chat only
    /// hides `"none"`.
    pub fn chat_descriptor(&self) -> Option<&str> {
        match self {
            Self::Flag(_) => None,
            Self::Descriptor(text) if text.is_empty() || text == "none" => None,
            Self::Descriptor(text) => Some(text.as_str()),
        }
    }
}

/// Active defenses an action permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Defenses {
    #[serde(default)]
    pub dodge: bool,
    #[serde(default)]
    pub block: bool,
    #[serde(default)]
    pub parry: bool,
}

impl Defenses {
    pub fn new(dodge: bool, block: bool, parry: bool) -> Self {
        Self { dodge, block, parry }
    }

    /// Capitalized names of the allowed defenses, in dodge/block/parry order.
    pub fn active(&self) -> Vec<&'static str> {
        [
            (self.dodge, "Dodge"),
            (self.block, "Block"),
            (self.parry, "Parry"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }

    pub fn any(&self) -> bool {
        self.dodge || self.block || self.parry
    }
}

/// Raw input from the add/edit action form.
///
/// Text fields arrive untrimmed; `tags` is a comma separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDraft {
    pub name: String,
    pub reference: String,
    pub notes: String,
    pub description: String,
    pub tags: String,
    pub attack: bool,
    pub movement: bool,
    pub dodge: bool,
    pub block: bool,
    pub parry: bool,
}

impl ActionDraft {
    /// Prefill a form from an existing action.
    pub fn from_action(action: &Action) -> Self {
        let defenses = action.defenses.unwrap_or_default();
        Self {
            name: action.name.clone(),
            reference: action.reference.clone().unwrap_or_default(),
            notes: action.notes.clone().unwrap_or_default(),
            description: action.description.clone().unwrap_or_default(),
            tags: action.tags.as_deref().map(|t| t.join(", ")).unwrap_or_default(),
            attack: action.attack,
            movement: action.has_movement(),
            dodge: defenses.dodge,
            block: defenses.block,
            parry: defenses.parry,
        }
    }

    /// Validate the draft and build an action from it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty.
    pub fn into_action(self) -> Result<Action, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Action name is required"));
        }

        let tags: Vec<String> = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();

        let defenses = Defenses::new(self.dodge, self.block, self.parry);

        Ok(Action {
            name: name.to_string(),
            reference: non_empty(&self.reference),
            notes: non_empty(&self.notes),
            description: non_empty(&self.description),
            tags: (!tags.is_empty()).then_some(tags),
            attack: self.attack,
            movement: self.movement.then_some(Movement::Flag(true)),
            defenses: defenses.any().then_some(defenses),
            special: false,
            extra: Map::new(),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
