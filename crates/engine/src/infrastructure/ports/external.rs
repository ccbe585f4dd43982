//! External service port traits (host chat log).

use async_trait::async_trait;

use super::error::ChatError;

/// A message for the shared chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Speaker shown next to the message
    pub speaker: String,
    /// Rendered HTML content
    pub content: String,
}

impl ChatMessage {
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatPort: Send + Sync {
    async fn post(&self, message: ChatMessage) -> Result<(), ChatError>;
}
