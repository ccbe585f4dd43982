//! The action library: layered action data behind the host settings store.
//!
//! Wraps the `ActionLayers` aggregate with the load sequence, slot
//! persistence and change notifications. Mutations take `&mut self`, so one
//! library instance can never interleave two edits.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use grc_domain::{
    Action, ActionLayers, ActionSource, ActionTarget, ActionView, CategoryTree, ChangedLayers,
    LayerChange, LayerPosition, ModifiedActions,
};
use grc_shared::storage_keys::{
    CUSTOM_DATA, DATA_VERSION, DATA_VERSION_KEY, DEFAULT_DATA, LEGACY_CUSTOM_ACTIONS,
    MODIFIED_ACTIONS,
};
use grc_shared::{ExportPayload, ImportPayload};

use super::error::{ChangeReport, LibraryError, LibraryWarning};
use super::events::LibraryEvent;
use crate::infrastructure::ports::{BaselineSource, LegacyCache, SettingsStore, StoreError};

const EVENT_CAPACITY: usize = 64;

const ALL_LAYERS: ChangedLayers = ChangedLayers {
    default_data: true,
    custom_data: true,
    modified: true,
};

/// Default and custom actions for one deployment.
///
/// Starts Unloaded: queries return empty results and mutations fail with
/// `LibraryError::NotLoaded` until `load()` succeeds.
pub struct ActionLibrary {
    store: Arc<dyn SettingsStore>,
    baseline: Arc<dyn BaselineSource>,
    legacy: Arc<dyn LegacyCache>,
    layers: ActionLayers,
    loaded: bool,
    events: broadcast::Sender<LibraryEvent>,
}

impl ActionLibrary {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        baseline: Arc<dyn BaselineSource>,
        legacy: Arc<dyn LegacyCache>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            baseline,
            legacy,
            layers: ActionLayers::default(),
            loaded: false,
            events,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Receive a `LibraryEvent` after load and after every committed mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> {
        self.events.subscribe()
    }

    pub fn layers(&self) -> &ActionLayers {
        &self.layers
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Read the stored slots, reinitializing from the baseline when the
    /// default data is missing or the data version changed, then run the
    /// one-time legacy migration.
    ///
    /// # Errors
    ///
    /// `LibraryError::Store` when a slot cannot be read, `LibraryError::Load`
    /// when the baseline is needed and cannot be fetched. Either way the
    /// library stays as it was.
    pub async fn load(&mut self) -> Result<ChangeReport, LibraryError> {
        let stored_version: Option<String> = self.read_slot(DATA_VERSION_KEY).await?;
        let stored_default = self
            .read_tolerant(DEFAULT_DATA, CategoryTree::from_json_tolerant)
            .await?;
        let stored_custom = self
            .read_tolerant(CUSTOM_DATA, CategoryTree::from_json_tolerant)
            .await?;
        let stored_modified = self
            .read_tolerant(MODIFIED_ACTIONS, ModifiedActions::from_json_tolerant)
            .await?;

        let mut report = ChangeReport::default();
        let version_current = stored_version.as_deref() == Some(DATA_VERSION);

        let reset = match stored_default {
            Some(default_data) if version_current => {
                self.layers = ActionLayers::new(
                    default_data,
                    stored_custom.unwrap_or_default(),
                    stored_modified.unwrap_or_default(),
                );
                false
            }
            stored_default => {
                if stored_default.is_none() {
                    tracing::info!("No stored default actions, initializing from baseline");
                } else {
                    tracing::warn!(
                        stored_version = ?stored_version,
                        expected = DATA_VERSION,
                        "Data version changed, discarding custom and modified actions"
                    );
                }

                let baseline = self.fetch_baseline().await?;
                self.layers = ActionLayers::from_baseline(baseline);
                self.write_layers(ALL_LAYERS, &mut report).await;
                self.write_slot(DATA_VERSION_KEY, DATA_VERSION, &mut report)
                    .await;
                true
            }
        };

        let migrated_legacy = self.migrate_legacy(&mut report).await;
        self.loaded = true;

        tracing::info!(
            categories = self.layers.main_categories().len(),
            reset,
            migrated_legacy,
            "Action library loaded"
        );
        self.notify(LibraryEvent::Loaded {
            reset,
            migrated_legacy,
        });
        Ok(report)
    }

    /// Adopt the legacy per-user cache as custom data, once.
    ///
    /// Skipped when custom data already has content. The legacy entry is only
    /// removed after the custom slot was written.
    async fn migrate_legacy(&mut self, report: &mut ChangeReport) -> bool {
        if !self.layers.custom_data().is_empty() {
            return false;
        }
        let Some(raw) = self.legacy.load(LEGACY_CUSTOM_ACTIONS) else {
            return false;
        };
        let legacy: CategoryTree = match serde_json::from_str(&raw) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(error = %e, "Legacy custom actions are unreadable, leaving them in place");
                return false;
            }
        };

        let change = self.layers.set_custom_data(legacy);
        let failures_before = report.warnings.len();
        self.write_layers(change.layers(), report).await;

        if report.warnings.len() == failures_before {
            self.legacy.remove(LEGACY_CUSTOM_ACTIONS);
            tracing::info!("Migrated custom actions from the legacy cache");
        } else {
            tracing::warn!("Legacy custom actions adopted but not saved, keeping the legacy cache");
        }
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn main_categories(&self) -> Vec<&str> {
        self.layers.main_categories()
    }

    pub fn has_subcategories(&self, category: &str) -> bool {
        self.layers.has_subcategories(category)
    }

    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        self.layers.subcategories(category)
    }

    pub fn actions_for_subcategory(&self, category: &str, subcategory: &str) -> &[Action] {
        self.layers.actions_for_subcategory(category, subcategory)
    }

    pub fn actions_for_main_category(&self, category: &str) -> &[Action] {
        self.layers.actions_for_main_category(category)
    }

    pub fn action(&self, target: &ActionTarget, index: usize) -> Option<ActionView> {
        self.layers.action(target, index)
    }

    pub fn action_source(&self, target: &ActionTarget, index: usize) -> ActionSource {
        self.layers.action_source(target, index)
    }

    pub fn locate(&self, target: &ActionTarget, index: usize) -> Option<LayerPosition> {
        self.layers.locate(target, index)
    }

    pub fn is_action_modified(&self, target: &ActionTarget, index: usize) -> bool {
        self.layers.is_action_modified(target, index)
    }

    pub fn format_category_name(&self, category: &str) -> String {
        grc_domain::format_category_name(category)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn add_custom_action(
        &mut self,
        target: &ActionTarget,
        action: Action,
    ) -> Result<ChangeReport, LibraryError> {
        let change = self.loaded_layers()?.add_custom_action(target, action)?;
        Ok(self.commit(change).await)
    }

    pub async fn update_custom_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
        action: Action,
    ) -> Result<ChangeReport, LibraryError> {
        let change = self
            .loaded_layers()?
            .update_custom_action(target, index, action)?;
        Ok(self.commit(change).await)
    }

    pub async fn update_default_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
        action: Action,
    ) -> Result<ChangeReport, LibraryError> {
        let change = self
            .loaded_layers()?
            .update_default_action(target, index, action)?;
        Ok(self.commit(change).await)
    }

    pub async fn delete_custom_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
    ) -> Result<ChangeReport, LibraryError> {
        let change = self.loaded_layers()?.delete_custom_action(target, index)?;
        Ok(self.commit(change).await)
    }

    pub async fn delete_default_action(
        &mut self,
        target: &ActionTarget,
        index: usize,
    ) -> Result<ChangeReport, LibraryError> {
        let change = self.loaded_layers()?.delete_default_action(target, index)?;
        Ok(self.commit(change).await)
    }

    pub async fn set_custom_data(
        &mut self,
        custom_data: CategoryTree,
    ) -> Result<ChangeReport, LibraryError> {
        let change = self.loaded_layers()?.set_custom_data(custom_data);
        Ok(self.commit(change).await)
    }

    pub async fn reset_custom_data(&mut self) -> Result<ChangeReport, LibraryError> {
        let change = self.loaded_layers()?.reset_custom_data();
        tracing::info!("Custom actions reset");
        Ok(self.commit(change).await)
    }

    /// Refetch the baseline and drop all custom and modified data.
    ///
    /// A failed fetch leaves everything unchanged.
    pub async fn reset_to_defaults(&mut self) -> Result<ChangeReport, LibraryError> {
        self.loaded_layers()?;
        let baseline = self.fetch_baseline().await?;
        let change = self.layers.reset_to_defaults(baseline);
        tracing::info!("Action library reset to defaults");
        Ok(self.commit(change).await)
    }

    // =========================================================================
    // Export / Import
    // =========================================================================

    pub fn export_all_data(&self) -> ExportPayload {
        ExportPayload {
            version: DATA_VERSION.to_string(),
            default_data: self.layers.default_data().clone(),
            custom_data: self.layers.custom_data().clone(),
            modified_actions: self.layers.modified().clone(),
        }
    }

    /// Apply every field present in `payload` and keep the current value for
    /// the rest. A version mismatch is reported, not refused.
    pub async fn import_all_data(
        &mut self,
        payload: ImportPayload,
    ) -> Result<ChangeReport, LibraryError> {
        self.loaded_layers()?;

        let mut report = ChangeReport::default();
        if !payload.version_matches(DATA_VERSION) {
            let found = payload
                .version
                .clone()
                .unwrap_or_else(|| "(none)".to_string());
            tracing::warn!(%found, expected = DATA_VERSION, "Import version mismatch, importing anyway");
            report.warn(LibraryWarning::ImportVersion {
                found,
                expected: DATA_VERSION,
            });
        }

        let ImportPayload {
            default_data,
            custom_data,
            modified_actions,
            ..
        } = payload;
        let default_data = default_data.unwrap_or_else(|| self.layers.default_data().clone());
        let custom_data = custom_data.unwrap_or_else(|| self.layers.custom_data().clone());
        let modified = modified_actions.unwrap_or_else(|| self.layers.modified().clone());

        let change = self.layers.replace_all(default_data, custom_data, modified);
        self.write_layers(change.layers(), &mut report).await;
        self.write_slot(DATA_VERSION_KEY, DATA_VERSION, &mut report)
            .await;

        tracing::info!(
            categories = self.layers.main_categories().len(),
            "Imported action data"
        );
        self.notify(LibraryEvent::Changed(change));
        Ok(report)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn loaded_layers(&mut self) -> Result<&mut ActionLayers, LibraryError> {
        if !self.loaded {
            return Err(LibraryError::NotLoaded);
        }
        Ok(&mut self.layers)
    }

    async fn commit(&self, change: LayerChange) -> ChangeReport {
        let mut report = ChangeReport::default();
        self.write_layers(change.layers(), &mut report).await;
        tracing::debug!(?change, "Action layers changed");
        self.notify(LibraryEvent::Changed(change));
        report
    }

    fn notify(&self, event: LibraryEvent) {
        // Err only means nobody is subscribed
        let _ = self.events.send(event);
    }

    async fn fetch_baseline(&self) -> Result<CategoryTree, LibraryError> {
        match self.baseline.fetch().await {
            Ok(tree) => {
                tracing::info!(categories = tree.len(), "Fetched baseline actions");
                Ok(tree)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load actions data");
                Err(e.into())
            }
        }
    }

    /// Read one slot. Unparsable content is logged and treated as absent.
    async fn read_slot<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, StoreError> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                tracing::warn!(slot = key, error = %e, "Stored slot is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    /// Read one slot entry by entry. Entries that do not parse are logged and
    /// dropped; the rest is adopted as stored.
    async fn read_tolerant<T>(
        &self,
        key: &'static str,
        parse: fn(Value) -> Option<(T, Vec<String>)>,
    ) -> Result<Option<T>, StoreError> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };
        match parse(value) {
            Some((parsed, skipped)) => {
                if !skipped.is_empty() {
                    tracing::warn!(slot = key, ?skipped, "Dropped unreadable entries from stored slot");
                }
                Ok(Some(parsed))
            }
            None => {
                tracing::warn!(slot = key, "Stored slot has the wrong shape, ignoring it");
                Ok(None)
            }
        }
    }

    async fn write_layers(&self, changed: ChangedLayers, report: &mut ChangeReport) {
        if changed.default_data {
            self.write_slot(DEFAULT_DATA, self.layers.default_data(), report)
                .await;
        }
        if changed.custom_data {
            self.write_slot(CUSTOM_DATA, self.layers.custom_data(), report)
                .await;
        }
        if changed.modified {
            self.write_slot(MODIFIED_ACTIONS, self.layers.modified(), report)
                .await;
        }
    }

    /// Write one slot. Failures become warnings; memory is never rolled back.
    async fn write_slot<T: Serialize + Sync + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
        report: &mut ChangeReport,
    ) {
        let result = match serde_json::to_value(value) {
            Ok(json) => self.store.set(key, json).await,
            Err(e) => Err(StoreError::serialization(key, e)),
        };
        if let Err(e) = result {
            tracing::warn!(slot = key, error = %e, "Failed to persist slot, change kept in memory");
            report.warn(LibraryWarning::persistence(key, e));
        }
    }
}
