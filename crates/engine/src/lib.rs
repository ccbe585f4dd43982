//! GRC Engine library.
//!
//! Everything that touches the outside world for the rules companion's
//! action library.
//!
//! ## Structure
//!
//! - `use_cases/` - Library loading and editing, presentation
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
