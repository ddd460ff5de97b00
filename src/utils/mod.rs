//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants and the pure classification helpers used by the UI.

pub mod classify;
pub mod constants;

pub use classify::*;
