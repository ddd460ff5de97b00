//! Query State
//!
//! Page number and network filter that together decide what one fetch
//! cycle asks for, plus the intents that move them.

use crate::models::config::DashboardConfig;
use crate::models::types::{Network, TokenPageRequest};

/// Network filter of the token table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkFilter {
    #[default]
    All,
    Only(Network),
}

impl NetworkFilter {
    /// Filter buttons in display order
    pub const OPTIONS: [NetworkFilter; 3] = [
        NetworkFilter::All,
        NetworkFilter::Only(Network::Eth),
        NetworkFilter::Only(Network::Bsc),
    ];

    pub fn network(&self) -> Option<Network> {
        match self {
            NetworkFilter::All => None,
            NetworkFilter::Only(network) => Some(*network),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NetworkFilter::All => "All Networks",
            NetworkFilter::Only(Network::Eth) => "Ethereum",
            NetworkFilter::Only(Network::Bsc) => "BSC",
        }
    }
}

impl From<Option<Network>> for NetworkFilter {
    fn from(network: Option<Network>) -> Self {
        network.map(NetworkFilter::Only).unwrap_or(NetworkFilter::All)
    }
}

/// User intent emitted by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardIntent {
    NextPage,
    PreviousPage,
    GoToPage(u32),
    SelectNetwork(NetworkFilter),
    /// Re-run the current query now
    Refresh,
}

/// What applying an intent did to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentEffect {
    /// The query changed (or a refresh was asked for): issue one cycle
    Refetch,
    /// Nothing to do, with the reason for the log
    Ignored(&'static str),
}

/// Coordinated query of the token table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    network: NetworkFilter,
    page_size: u32,
    confirmed_only: bool,
}

impl QueryState {
    pub fn new(page_size: u32, confirmed_only: bool) -> Self {
        Self {
            page: 1,
            network: NetworkFilter::All,
            page_size,
            confirmed_only,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.page_size, config.confirmed_only)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn network(&self) -> NetworkFilter {
        self.network
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn confirmed_only(&self) -> bool {
        self.confirmed_only
    }

    /// Parameters of the `/tokens/new` request for this query
    pub fn request(&self) -> TokenPageRequest {
        TokenPageRequest {
            page: self.page,
            page_size: self.page_size,
            network: self.network.network(),
            confirmed_only: self.confirmed_only,
        }
    }

    /// Apply an intent. `tokens_on_page` is the size of the list currently on display.
    pub fn apply(
        &mut self,
        intent: DashboardIntent,
        tokens_on_page: usize,
        reset_page_on_filter_change: bool,
    ) -> IntentEffect {
        let pagination = Pagination::compute(self, tokens_on_page);

        match intent {
            DashboardIntent::NextPage => {
                if !pagination.has_next {
                    return IntentEffect::Ignored("last page reached");
                }
                match self.page.checked_add(1) {
                    Some(next) => {
                        self.page = next;
                        IntentEffect::Refetch
                    }
                    None => IntentEffect::Ignored("last page reached"),
                }
            }
            DashboardIntent::PreviousPage => {
                if !pagination.has_previous {
                    return IntentEffect::Ignored("already on page 1");
                }
                self.page -= 1;
                IntentEffect::Refetch
            }
            DashboardIntent::GoToPage(0) => IntentEffect::Ignored("page numbers start at 1"),
            DashboardIntent::GoToPage(page) if page == self.page => {
                IntentEffect::Ignored("already on that page")
            }
            DashboardIntent::GoToPage(page) => {
                self.page = page;
                IntentEffect::Refetch
            }
            DashboardIntent::SelectNetwork(filter) if filter == self.network => {
                IntentEffect::Ignored("filter already selected")
            }
            DashboardIntent::SelectNetwork(filter) => {
                self.network = filter;
                if reset_page_on_filter_change {
                    self.page = 1;
                }
                IntentEffect::Refetch
            }
            DashboardIntent::Refresh => IntentEffect::Refetch,
        }
    }
}

/// Previous / Next availability of the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub has_previous: bool,
    /// No total count is known: a short page is taken as the last one
    pub has_next: bool,
}

impl Pagination {
    pub fn compute(query: &QueryState, tokens_on_page: usize) -> Self {
        Self {
            page: query.page,
            has_previous: query.page > 1,
            has_next: tokens_on_page >= query.page_size as usize,
        }
    }
}
