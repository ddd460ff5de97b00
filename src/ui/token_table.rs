//! Token Table
//!
//! Loading placeholder, empty state, or one row per token plus the
//! pagination bar.

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};

use crate::core::query_state::Pagination;
use crate::core::view_state::ViewState;
use crate::models::types::Token;
use crate::ui::badge_color;
use crate::utils::classify::{
    display_decimals, display_name, display_symbol, explorer_url, format_count, format_supply,
    network_badge, relative_time, risk_tier, truncate_address,
};

pub const LOADING_TEXT: &str = "⏳ Loading tokens...";
pub const EMPTY_TITLE: &str = "No tokens found";
pub const EMPTY_HINT: &str = "Waiting for new token deployments...";

const COLUMNS: [&str; 8] = [
    "Token", "Address", "Network", "Block", "Supply", "Risk", "Detected", "Explorer",
];

pub fn render_token_table(view: &ViewState, pagination: Pagination, now: DateTime<Utc>) -> String {
    if view.loading {
        return LOADING_TEXT.to_string();
    }

    if view.tokens.is_empty() {
        let empty = format!("{}\n{}", EMPTY_TITLE, EMPTY_HINT);
        // Past the last page there is nothing to show but the way back
        if pagination.has_previous {
            return format!("{}\n\n{}", empty, render_pagination(pagination));
        }
        return empty;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(COLUMNS);
    for token in &view.tokens {
        table.add_row(token_row(token, now));
    }

    format!(
        "🪙 Recently Detected Tokens\n{}\n{}",
        table,
        render_pagination(pagination)
    )
}

fn token_row(token: &Token, now: DateTime<Utc>) -> Vec<Cell> {
    let code = token.network.as_code();
    let badge = network_badge(code);
    let risk = risk_tier(token.risk_score);

    vec![
        Cell::new(format!(
            "{}\n{} • {} decimals",
            display_name(token.name.as_deref()),
            display_symbol(token.symbol.as_deref()),
            display_decimals(token.decimals)
        )),
        Cell::new(truncate_address(&token.address)),
        Cell::new(&badge.label).fg(badge_color(badge.color)),
        Cell::new(format_count(token.block_number)),
        Cell::new(format_supply(token.total_supply.as_deref())),
        Cell::new(format!("{} {}", risk.emoji(), risk.label())).fg(badge_color(risk.color())),
        Cell::new(relative_time(token.timestamp, now)),
        Cell::new(explorer_url(code, &token.address).unwrap_or_else(|| "-".to_string())),
    ]
}

/// `‹ Previous (p) │ Page N │ Next (n) ›`, disabled buttons shown dimmed as `-`
pub fn render_pagination(pagination: Pagination) -> String {
    let previous = if pagination.has_previous { "‹ Previous (p)" } else { "  -----------" };
    let next = if pagination.has_next { "Next (n) ›" } else { "--------  " };
    format!("{} │ Page {} │ {}", previous, pagination.page, next)
}
