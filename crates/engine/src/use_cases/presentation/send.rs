//! Send-to-chat use case.

use std::sync::Arc;

use grc_domain::Action;

use super::chat::format_action_for_chat;
use crate::infrastructure::ports::{ChatError, ChatMessage, ChatPort};

/// Posts an action's chat card to the shared log.
pub struct SendToChat {
    chat: Arc<dyn ChatPort>,
    speaker: String,
}

impl SendToChat {
    pub fn new(chat: Arc<dyn ChatPort>, speaker: impl Into<String>) -> Self {
        Self {
            chat,
            speaker: speaker.into(),
        }
    }

    /// # Errors
    ///
    /// `ChatError::NoActionSelected` when `action` is `None`, or the port's
    /// error when posting fails.
    pub async fn execute(&self, action: Option<&Action>, category: &str) -> Result<(), ChatError> {
        let Some(action) = action else {
            tracing::warn!("No action selected to send to chat");
            return Err(ChatError::NoActionSelected);
        };

        let content = format_action_for_chat(action, category);
        match self
            .chat
            .post(ChatMessage::new(self.speaker.clone(), content))
            .await
        {
            Ok(()) => {
                tracing::info!(action = %action.name, category, "Action sent to chat");
                Ok(())
            }
            Err(e) => {
                tracing::error!(action = %action.name, error = %e, "Failed to send action to chat");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockChatPort;

    #[tokio::test]
    async fn posts_formatted_card() {
        let mut chat = MockChatPort::new();
        chat.expect_post()
            .withf(|message| {
                message.speaker == "GM" && message.content.contains("am-chat-title\">Feint<")
            })
            .times(1)
            .returning(|_| Ok(()));

        let use_case = SendToChat::new(Arc::new(chat), "GM");
        let result = use_case
            .execute(Some(&Action::named("Feint")), "maneuvers")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn missing_action_is_refused_without_posting() {
        let mut chat = MockChatPort::new();
        chat.expect_post().times(0);

        let use_case = SendToChat::new(Arc::new(chat), "GM");
        let err = use_case.execute(None, "maneuvers").await.expect_err("no action");

        assert!(matches!(err, ChatError::NoActionSelected));
    }

    #[tokio::test]
    async fn post_failure_is_returned() {
        let mut chat = MockChatPort::new();
        chat.expect_post()
            .returning(|_| Err(ChatError::PostFailed("socket closed".into())));

        let use_case = SendToChat::new(Arc::new(chat), "GM");
        let err = use_case
            .execute(Some(&Action::named("Feint")), "maneuvers")
            .await
            .expect_err("post failed");

        assert!(matches!(err, ChatError::PostFailed(_)));
    }
}
