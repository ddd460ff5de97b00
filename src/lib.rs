//! RealTime Token Scanner Dashboard
//!
//! Terminal dashboard over the token scanner API, listing newly deployed
//! ETH and BSC tokens:
//! - Paginated token table with a network filter
//! - Summary stats and hourly distribution
//! - Auto-refresh every 30s with consistent token/stats snapshots

pub mod core;
pub mod models;
pub mod providers;
pub mod ui;
pub mod utils;

pub use crate::core::{
    CyclePhase, DashboardHandle, DashboardIntent, DashboardSnapshot, DashboardSync, NetworkFilter,
    Pagination, QueryState, SyncStats, ViewState,
};
pub use models::{
    Alert, AppError, AppResult, DashboardConfig, ErrorCode, HealthStatus, HourlyCount, Network,
    StatsSummary, Token, TokenPageRequest,
};
pub use providers::{ScannerApiClient, ScannerSource};
pub use ui::{parse_command, render_dashboard, run_terminal, Command};
