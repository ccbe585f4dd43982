//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    baseline::{FileBaselineSource, HttpBaselineSource},
    chat::StdoutChat,
    clock::SystemClock,
    config::CompanionConfig,
    legacy_cache::FileLegacyCache,
    memory::InMemoryLegacyCache,
    ports::{BaselineSource, ChatPort, ClockPort, LegacyCache, SettingsStore, StoreError},
    settings::SqliteSettingsStore,
};
use crate::use_cases::{ActionEditor, ActionLibrary, LibraryError, SendToChat};

/// Main application state.
///
/// Owns the action library and the ports the use cases need beyond it.
pub struct App {
    pub library: ActionLibrary,
    pub chat: Arc<dyn ChatPort>,
    pub clock: Arc<dyn ClockPort>,
    is_gm: bool,
}

impl App {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        baseline: Arc<dyn BaselineSource>,
        legacy: Arc<dyn LegacyCache>,
        chat: Arc<dyn ChatPort>,
        clock: Arc<dyn ClockPort>,
        is_gm: bool,
    ) -> Self {
        Self {
            library: ActionLibrary::new(store, baseline, legacy),
            chat,
            clock,
            is_gm,
        }
    }

    /// Wire the production adapters described by `config`.
    pub async fn from_config(config: &CompanionConfig) -> Result<Self, StoreError> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let store_path = config.store_db.display().to_string();
        tracing::info!(path = %store_path, "Opening settings store");
        let store = Arc::new(SqliteSettingsStore::new(&store_path, clock.clone()).await?);

        let baseline: Arc<dyn BaselineSource> = match &config.baseline_url {
            Some(url) => Arc::new(HttpBaselineSource::new(url)),
            None => Arc::new(FileBaselineSource::new(&config.baseline_path)),
        };
        tracing::info!(location = %baseline.location(), "Baseline source configured");

        let legacy: Arc<dyn LegacyCache> = match &config.legacy_cache {
            Some(path) => Arc::new(FileLegacyCache::open(path)),
            None => Arc::new(InMemoryLegacyCache::new()),
        };

        Ok(Self::new(
            store,
            baseline,
            legacy,
            Arc::new(StdoutChat::new()),
            clock,
            config.is_gm,
        ))
    }

    pub fn is_gm(&self) -> bool {
        self.is_gm
    }

    /// Open the editor for the configured user.
    pub fn editor(&mut self) -> Result<ActionEditor<'_>, LibraryError> {
        ActionEditor::open(&mut self.library, self.is_gm)
    }

    pub fn send_to_chat(&self) -> SendToChat {
        let speaker = if self.is_gm { "GM" } else { "Player" };
        SendToChat::new(self.chat.clone(), speaker)
    }

    /// File name for an export taken now.
    pub fn export_file_name(&self) -> String {
        grc_shared::export_file_name(self.clock.now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::memory::{InMemorySettingsStore, StaticBaselineSource};
    use crate::infrastructure::ports::MockChatPort;

    fn app(is_gm: bool) -> App {
        let baseline =
            serde_json::from_value(json!({"maneuvers": [{"name": "Attack"}]})).expect("valid tree");
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .single()
            .expect("valid time");
        App::new(
            Arc::new(InMemorySettingsStore::new()),
            Arc::new(StaticBaselineSource::new(baseline)),
            Arc::new(InMemoryLegacyCache::new()),
            Arc::new(MockChatPort::new()),
            Arc::new(FixedClock(now)),
            is_gm,
        )
    }

    #[test]
    fn export_file_is_named_by_date() {
        assert_eq!(app(true).export_file_name(), "gurps-actions-2026-10-19.json");
    }

    #[tokio::test]
    async fn editor_follows_gm_flag() {
        let mut player = app(false);
        player.library.load().await.expect("loaded");
        assert!(matches!(
            player.editor().err(),
            Some(LibraryError::PermissionDenied(_))
        ));

        let mut gm = app(true);
        gm.library.load().await.expect("loaded");
        assert!(gm.editor().is_ok());
    }
}
