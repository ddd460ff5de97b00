//! Core Module - Query State Manager
//!
//! Query state, view state and the sync manager that moves between them.
//! Presentation only reads snapshots and sends intents.

pub mod query_state;
pub mod sync_manager;
pub mod view_state;

pub use query_state::*;
pub use sync_manager::*;
pub use view_state::*;
