//! Presentation of actions for the detail pane and the chat log.

mod chat;
mod detail;
mod send;

pub use chat::{chat_notes, format_action_for_chat, format_defenses};
pub use detail::{process_pdf_links, render_action_detail, IconKind};
pub use send::SendToChat;
