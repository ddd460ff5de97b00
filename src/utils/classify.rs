//! Classification Utilities
//!
//! Pure mapping from raw token fields to display metadata: risk tier,
//! network badge, truncated address, explorer link, relative time and
//! number formatting. No I/O, no caching.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    get_explorer_base, get_network_name, ADDRESS_HEAD_CHARS, ADDRESS_TAIL_CHARS,
    HIGH_RISK_MIN_SCORE, MEDIUM_RISK_MIN_SCORE, NETWORK_CODE_BSC, NETWORK_CODE_ETH,
};

/// Presentation-only risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskTier::Low => "🟢",
            RiskTier::Medium => "🟡",
            RiskTier::High => "🔴",
        }
    }

    pub fn color(&self) -> BadgeColor {
        match self {
            RiskTier::Low => BadgeColor::Green,
            RiskTier::Medium => BadgeColor::Yellow,
            RiskTier::High => BadgeColor::Red,
        }
    }
}

/// Badge palette shared by network and risk badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Purple,
    Orange,
    Slate,
    Green,
    Yellow,
    Red,
}

/// Network badge style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkBadge {
    pub label: String,
    pub name: &'static str,
    pub color: BadgeColor,
}

/// Map a risk score to its tier; an absent score counts as 0
pub fn risk_tier(score: Option<u8>) -> RiskTier {
    let score = score.unwrap_or(0);
    if score >= HIGH_RISK_MIN_SCORE {
        RiskTier::High
    } else if score >= MEDIUM_RISK_MIN_SCORE {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// `0x1f9840...01f984`; addresses too short to truncate come back unchanged
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < ADDRESS_HEAD_CHARS + ADDRESS_TAIL_CHARS {
        return address.to_string();
    }
    let head: String = chars[..ADDRESS_HEAD_CHARS].iter().collect();
    let tail: String = chars[chars.len() - ADDRESS_TAIL_CHARS..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Explorer page for a contract, `None` for unrecognized network codes
pub fn explorer_url(network_code: &str, address: &str) -> Option<String> {
    get_explorer_base(network_code).map(|base| format!("{}/address/{}", base, address))
}

/// Badge for a network code, slate fallback for anything unknown
pub fn network_badge(network_code: &str) -> NetworkBadge {
    let color = match network_code {
        NETWORK_CODE_ETH => BadgeColor::Purple,
        NETWORK_CODE_BSC => BadgeColor::Orange,
        _ => BadgeColor::Slate,
    };
    NetworkBadge {
        label: network_code.to_string(),
        name: get_network_name(network_code),
        color,
    }
}

/// "5 minutes ago" style distance between `timestamp` and `now`
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(timestamp);
    let (seconds, future) = if delta.num_seconds() < 0 {
        (-delta.num_seconds(), true)
    } else {
        (delta.num_seconds(), false)
    };

    let minutes = (seconds + 30) / 60;
    let distance = match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{} minutes", minutes),
        45..=89 => "about 1 hour".to_string(),
        90..=1439 => format!("about {} hours", (minutes + 30) / 60),
        1440..=2519 => "1 day".to_string(),
        2520..=43199 => format!("{} days", (minutes + 720) / 1440),
        43200..=86399 => "about 1 month".to_string(),
        86400..=525599 => format!("{} months", (minutes + 21600) / 43200),
        _ => {
            let years = minutes / 525600;
            if years <= 1 {
                "about 1 year".to_string()
            } else {
                format!("about {} years", years)
            }
        }
    };

    if future {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

/// Total supply in exponential notation with two fraction digits (`1.00e+21`)
pub fn format_supply(total_supply: Option<&str>) -> String {
    let parsed = total_supply
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite());

    match parsed {
        Some(value) => {
            let formatted = format!("{:.2e}", value);
            match formatted.split_once('e') {
                Some((mantissa, exp)) if exp.starts_with('-') => format!("{}e{}", mantissa, exp),
                Some((mantissa, exp)) => format!("{}e+{}", mantissa, exp),
                None => formatted,
            }
        }
        None => "N/A".to_string(),
    }
}

/// Thousands-separated count (`1,234,567`)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn display_name(name: Option<&str>) -> &str {
    name.filter(|n| !n.is_empty()).unwrap_or("Unknown")
}

pub fn display_symbol(symbol: Option<&str>) -> &str {
    symbol.filter(|s| !s.is_empty()).unwrap_or("N/A")
}

pub fn display_decimals(decimals: Option<u8>) -> String {
    decimals.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string())
}

/// `HH:MM` label for an hourly bucket; unparsable buckets are shown raw
pub fn hour_label(hour: &str) -> String {
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(hour, fmt).ok())
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| hour.to_string())
}
