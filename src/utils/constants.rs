//! Constants Module - Single Source of Truth
//!
//! Every constant, lookup table and endpoint path used by the dashboard
//! is defined here. No hardcoded values in the other modules.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "RealTime Token Scanner";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = concat!("token-scanner-dashboard/", env!("CARGO_PKG_VERSION"));

// ============================================
// SCANNER API CONSTANTS
// ============================================

/// Default base URL of the scanner backend
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variables holding the base URL, first match wins
pub const API_URL_ENV_VARS: [&str; 2] = ["SCANNER_API_URL", "API_URL"];

/// Default timeout for API requests (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Endpoint paths
pub const PATH_NEW_TOKENS: &str = "/tokens/new";
pub const PATH_TOKENS: &str = "/tokens";
pub const PATH_TOKEN_BY_ADDRESS: &str = "/tokens/address";
pub const PATH_STATS_SUMMARY: &str = "/stats/summary";
pub const PATH_RECENT_ALERTS: &str = "/alerts/recent";
pub const PATH_HEALTH: &str = "/health";

/// Largest page size the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Alert limit bounds accepted by the backend
pub const MIN_ALERT_LIMIT: u32 = 1;
pub const MAX_ALERT_LIMIT: u32 = 50;
pub const DEFAULT_ALERT_LIMIT: u32 = 10;

// ============================================
// DASHBOARD CONSTANTS
// ============================================

/// Auto-refresh cadence (seconds)
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Fixed page size of the token table
pub const PAGE_SIZE: u32 = 20;

// ============================================
// CLASSIFICATION THRESHOLDS
// ============================================

/// Risk score at or above which a token is High risk
pub const HIGH_RISK_MIN_SCORE: u8 = 7;

/// Risk score at or above which a token is Medium risk
pub const MEDIUM_RISK_MIN_SCORE: u8 = 4;

/// Characters kept at the head of a truncated address
pub const ADDRESS_HEAD_CHARS: usize = 8;

/// Characters kept at the tail of a truncated address
pub const ADDRESS_TAIL_CHARS: usize = 6;

// ============================================
// NETWORK CODES - Single Source of Truth
// ============================================

/// Ethereum Mainnet
pub const NETWORK_CODE_ETH: &str = "ETH";
/// BNB Smart Chain
pub const NETWORK_CODE_BSC: &str = "BSC";

/// Get block explorer base URL for a network code
pub fn get_explorer_base(network_code: &str) -> Option<&'static str> {
    match network_code {
        NETWORK_CODE_ETH => Some("https://etherscan.io"),
        NETWORK_CODE_BSC => Some("https://bscscan.com"),
        _ => None,
    }
}

/// Get human-readable chain name for a network code
pub fn get_network_name(network_code: &str) -> &'static str {
    match network_code {
        NETWORK_CODE_ETH => "Ethereum",
        NETWORK_CODE_BSC => "BSC",
        _ => "Unknown",
    }
}
