//! Five summary cards above the charts

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};

use crate::models::types::{Network, StatsSummary};
use crate::utils::classify::format_count;

/// (icon, title, value) of each card in display order. A network missing
/// from `by_network` counts as 0.
pub fn stat_cards(stats: &StatsSummary) -> [(&'static str, &'static str, String); 5] {
    [
        ("📊", "Total Tokens", format_count(stats.total_tokens)),
        ("📈", "Last 24 Hours", format_count(stats.tokens_last_24h)),
        ("⚡", "Last Hour", format_count(stats.tokens_last_hour)),
        ("⟠", "ETH Tokens", format_count(stats.count_for(Network::Eth))),
        ("🔶", "BSC Tokens", format_count(stats.count_for(Network::Bsc))),
    ]
}

pub fn render_stats_cards(stats: &StatsSummary) -> String {
    let cards = stat_cards(stats);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(cards.iter().map(|(icon, title, _)| format!("{} {}", icon, title)));
    table.add_row(
        cards
            .iter()
            .map(|(_, _, value)| Cell::new(value).set_alignment(CellAlignment::Right)),
    );
    table.to_string()
}
