//! Export/import file format
//!
//! ```json
//! {"version": "1.0.0", "defaultData": {...}, "customData": {...}, "modifiedActions": ["Melee:Swords:0"]}
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use grc_domain::{CategoryTree, ModifiedActions};

/// Everything needed to recreate a library elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub version: String,
    pub default_data: CategoryTree,
    pub custom_data: CategoryTree,
    pub modified_actions: ModifiedActions,
}

/// An import file; any missing field keeps the current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub default_data: Option<CategoryTree>,
    #[serde(default)]
    pub custom_data: Option<CategoryTree>,
    #[serde(default)]
    pub modified_actions: Option<ModifiedActions>,
}

impl ImportPayload {
    pub fn version_matches(&self, expected: &str) -> bool {
        self.version.as_deref() == Some(expected)
    }
}

impl From<ExportPayload> for ImportPayload {
    fn from(export: ExportPayload) -> Self {
        Self {
            version: Some(export.version),
            default_data: Some(export.default_data),
            custom_data: Some(export.custom_data),
            modified_actions: Some(export.modified_actions),
        }
    }
}

/// Download name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("gurps-actions-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn export_uses_camel_case_keys() {
        let payload = ExportPayload {
            version: "1.0.0".into(),
            default_data: CategoryTree::new(),
            custom_data: CategoryTree::new(),
            modified_actions: ModifiedActions::new(),
        };

        assert_eq!(
            serde_json::to_value(&payload).expect("serializable"),
            json!({"version": "1.0.0", "defaultData": {}, "customData": {}, "modifiedActions": []})
        );
    }

    #[test]
    fn import_tolerates_missing_fields() {
        let payload: ImportPayload =
            serde_json::from_value(json!({"customData": {"postures": [{"name": "Kneel"}]}}))
                .expect("valid payload");

        assert_eq!(payload.version, None);
        assert!(payload.default_data.is_none());
        assert!(payload.custom_data.is_some());
        assert!(!payload.version_matches("1.0.0"));
    }

    #[test]
    fn file_name_carries_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).expect("valid date");
        assert_eq!(export_file_name(date), "gurps-actions-2026-03-07.json");
    }
}
