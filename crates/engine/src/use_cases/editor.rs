//! GM-only editing session over the action library.
//!
//! Mirrors the settings dialog: the form submits an `ActionDraft`, and the
//! source of the row being edited decides which layer changes.

use grc_domain::{Action, ActionDraft, ActionSource, ActionTarget};
use grc_shared::ImportPayload;

use super::library::{ActionLibrary, ChangeReport, LibraryError};

const GM_ONLY: &str = "Only the GM can edit actions";

/// One row of the editor's per-layer listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedAction {
    /// Position inside its own layer
    pub index: usize,
    pub action: Action,
    /// Always false for custom rows
    pub is_modified: bool,
}

/// Default and custom entries of one list, side by side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerListing {
    pub default: Vec<ListedAction>,
    pub custom: Vec<ListedAction>,
}

impl LayerListing {
    pub fn is_empty(&self) -> bool {
        self.default.is_empty() && self.custom.is_empty()
    }
}

/// Exclusive editing access to a library.
///
/// Holding the `&mut` borrow keeps a second editor (or any other mutation)
/// from running at the same time.
pub struct ActionEditor<'a> {
    library: &'a mut ActionLibrary,
}

impl<'a> ActionEditor<'a> {
    /// # Errors
    ///
    /// `LibraryError::PermissionDenied` when the user is not the GM.
    pub fn open(library: &'a mut ActionLibrary, is_gm: bool) -> Result<Self, LibraryError> {
        if !is_gm {
            tracing::warn!("Refused to open the action editor for a non-GM user");
            return Err(LibraryError::permission_denied(GM_ONLY));
        }
        Ok(Self { library })
    }

    pub fn library(&self) -> &ActionLibrary {
        self.library
    }

    /// Save a submitted form.
    ///
    /// `existing` names the row being edited by layer and layer index; `None`
    /// adds a new custom action.
    pub async fn save(
        &mut self,
        target: &ActionTarget,
        draft: ActionDraft,
        existing: Option<(ActionSource, usize)>,
    ) -> Result<ChangeReport, LibraryError> {
        let action = draft.into_action()?;
        let name = action.name.clone();

        let report = match existing {
            Some((ActionSource::Default, index)) => {
                self.library
                    .update_default_action(target, index, action)
                    .await?
            }
            Some((ActionSource::Custom, index)) => {
                self.library
                    .update_custom_action(target, index, action)
                    .await?
            }
            None => self.library.add_custom_action(target, action).await?,
        };

        tracing::info!(
            %target,
            action = %name,
            updated = existing.is_some(),
            "Action saved"
        );
        Ok(report)
    }

    pub async fn delete(
        &mut self,
        target: &ActionTarget,
        source: ActionSource,
        index: usize,
    ) -> Result<ChangeReport, LibraryError> {
        let report = match source {
            ActionSource::Default => self.library.delete_default_action(target, index).await?,
            ActionSource::Custom => self.library.delete_custom_action(target, index).await?,
        };
        tracing::info!(%target, %source, index, "Action deleted");
        Ok(report)
    }

    pub async fn reset_custom(&mut self) -> Result<ChangeReport, LibraryError> {
        self.library.reset_custom_data().await
    }

    pub async fn reset_all(&mut self) -> Result<ChangeReport, LibraryError> {
        self.library.reset_to_defaults().await
    }

    pub async fn import(&mut self, payload: ImportPayload) -> Result<ChangeReport, LibraryError> {
        self.library.import_all_data(payload).await
    }

    /// Stored entries of each layer for `target`, without merging.
    ///
    /// Indices are layer indices, ready for `save` and `delete`.
    pub fn layer_listing(&self, target: &ActionTarget) -> LayerListing {
        let layers = self.library.layers();

        let default = layers
            .default_data()
            .actions(target)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, action)| ListedAction {
                index,
                action: action.clone(),
                is_modified: layers.is_action_modified(target, index),
            })
            .collect();

        let custom = layers
            .custom_data()
            .actions(target)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, action)| ListedAction {
                index,
                action: action.clone(),
                is_modified: false,
            })
            .collect();

        LayerListing { default, custom }
    }
}
