//! Chat adapter for terminal hosts.

use async_trait::async_trait;

use crate::infrastructure::ports::{ChatError, ChatMessage, ChatPort};

/// Prints chat cards to stdout. The CLI has no shared chat log, so the
/// rendered HTML is the log.
#[derive(Debug, Clone, Default)]
pub struct StdoutChat;

impl StdoutChat {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatPort for StdoutChat {
    async fn post(&self, message: ChatMessage) -> Result<(), ChatError> {
        println!("[{}] {}", message.speaker, message.content);
        Ok(())
    }
}
