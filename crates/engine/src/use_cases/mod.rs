//! Use cases - User story orchestration.
//!
//! - `library` - load, query and edit the layered action data
//! - `editor` - GM-only editing session on top of the library
//! - `presentation` - detail pane and chat rendering

pub mod editor;
pub mod library;
pub mod presentation;

pub use editor::{ActionEditor, LayerListing, ListedAction};
pub use library::{ActionLibrary, ChangeReport, LibraryError, LibraryEvent, LibraryWarning};
pub use presentation::SendToChat;
