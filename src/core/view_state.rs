//! View State
//!
//! Last-known-good data of the dashboard and the snapshot the sync
//! manager publishes after every transition.

use serde::Serialize;

use crate::core::query_state::{Pagination, QueryState};
use crate::models::types::{StatsSummary, Token};

/// Phase of the fetch state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CyclePhase {
    /// Nothing issued yet
    Idle,
    Fetching,
    /// Latest cycle succeeded
    Settled,
    /// Latest cycle failed, previous data kept
    Failed,
}

/// Data on display. Tokens and stats always come from the same cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewState {
    pub tokens: Vec<Token>,
    pub stats: Option<StatsSummary>,
    pub loading: bool,
}

/// Everything the presentation layer renders from
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub query: QueryState,
    pub view: ViewState,
    pub phase: CyclePhase,
    /// Sequence number of the latest issued cycle (0 before mount)
    pub latest_cycle: u64,
    /// Sequence number of the cycle whose data is on display
    pub displayed_cycle: Option<u64>,
}

impl DashboardSnapshot {
    pub fn initial(query: QueryState) -> Self {
        Self {
            query,
            view: ViewState::default(),
            phase: CyclePhase::Idle,
            latest_cycle: 0,
            displayed_cycle: None,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::compute(&self.query, self.view.tokens.len())
    }

    /// Latest issued cycle has reached Settled or Failed
    pub fn is_quiet(&self) -> bool {
        matches!(self.phase, CyclePhase::Settled | CyclePhase::Failed)
    }
}
