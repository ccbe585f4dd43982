//! Action library use case: load, query, mutate and persist the action layers.

mod action_library;
mod error;
mod events;

pub use action_library::ActionLibrary;
pub use error::{ChangeReport, LibraryError, LibraryWarning};
pub use events::LibraryEvent;
