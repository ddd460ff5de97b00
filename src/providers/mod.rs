//! Providers Module - External Data Sources
//!
//! Data path: the scanner REST API and the source trait the dashboard polls.

pub mod scanner_api;

pub use scanner_api::*;
