//! Type definitions for the scanner dashboard
//! Wire records returned by the scanner API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{MAX_PAGE_SIZE, NETWORK_CODE_BSC, NETWORK_CODE_ETH};

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "BSC")]
    Bsc,
}

impl Network {
    /// All networks in display order
    pub const ALL: [Network; 2] = [Network::Eth, Network::Bsc];

    /// Wire code ("ETH" / "BSC")
    pub fn as_code(&self) -> &'static str {
        match self {
            Network::Eth => NETWORK_CODE_ETH,
            Network::Bsc => NETWORK_CODE_BSC,
        }
    }

    /// Parse a wire code, case-sensitive like the backend
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            NETWORK_CODE_ETH => Some(Network::Eth),
            NETWORK_CODE_BSC => Some(Network::Bsc),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Network {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.to_uppercase())
            .ok_or_else(|| AppError::invalid_request(format!("Unsupported network: {}", s)))
    }
}

/// Parameters of one `/tokens/new` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPageRequest {
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    /// `None` lists every network
    pub network: Option<Network>,
    pub confirmed_only: bool,
}

impl TokenPageRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.page == 0 {
            return Err(AppError::invalid_request("page must be >= 1"));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::invalid_request(format!(
                "page_size must be 1..={}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        Ok(())
    }

    /// Query string pairs in wire order; `network` is omitted for "all"
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(network) = self.network {
            pairs.push(("network", network.as_code().to_string()));
        }
        pairs.push(("confirmed_only", self.confirmed_only.to_string()));
        pairs
    }
}

/// A newly detected token contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    pub address: String,
    pub network: Network,
    pub block_number: u64,
    /// Arbitrary-precision decimal string
    #[serde(default)]
    pub total_supply: Option<String>,
    /// 0-10, absent when the backend has not scored the token
    #[serde(default)]
    pub risk_score: Option<u8>,
    #[serde(with = "iso_datetime")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub creator_address: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Token {
    /// Identity of a token: network plus lower-cased contract address
    pub fn identity(&self) -> (Network, String) {
        (self.network, self.address.to_lowercase())
    }
}

/// Recent notable token (non-zero risk score)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(flatten)]
    pub token: Token,
}

/// Token count for one trailing hour bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    /// Bucket start, "YYYY-MM-DD HH:00"
    pub hour: String,
    pub count: u64,
}

/// Aggregate statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_tokens: u64,
    pub tokens_last_24h: u64,
    pub tokens_last_hour: u64,
    #[serde(default)]
    pub by_network: BTreeMap<String, u64>,
    /// Oldest bucket first
    #[serde(default)]
    pub hourly_distribution: Vec<HourlyCount>,
}

impl StatsSummary {
    /// Token count for a network, 0 when the backend reported none
    pub fn count_for(&self, network: Network) -> u64 {
        self.by_network.get(network.as_code()).copied().unwrap_or(0)
    }
}

/// Liveness payload from `/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    #[serde(with = "iso_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// ISO datetimes with or without offset; naive values are UTC
pub(crate) mod iso_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO datetime: {}", raw)))
    }
}
