//! Text bar charts: tokens per hour and tokens by network

use crate::models::types::StatsSummary;
use crate::utils::classify::{format_count, hour_label};

const BAR_WIDTH: usize = 30;
const BAR_CHAR: &str = "█";

/// Bar scaled against `max`; any non-zero count gets at least one block
fn bar(count: u64, max: u64) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let len = ((count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    BAR_CHAR.repeat(len.clamp(1, BAR_WIDTH))
}

fn render_bars(title: &str, rows: impl Iterator<Item = (String, u64)> + Clone) -> String {
    let max = rows.clone().map(|(_, count)| count).max().unwrap_or(0);
    let label_width = rows.clone().map(|(label, _)| label.chars().count()).max().unwrap_or(0);

    let mut out = String::from(title);
    let mut empty = true;
    for (label, count) in rows {
        empty = false;
        out.push_str(&format!(
            "\n  {:<width$} │{} {}",
            label,
            bar(count, max),
            format_count(count),
            width = label_width
        ));
    }
    if empty {
        out.push_str("\n  (no data)");
    }
    out
}

pub fn render_hourly_chart(stats: &StatsSummary) -> String {
    render_bars(
        "📊 Tokens per Hour (Last 24h)",
        stats
            .hourly_distribution
            .iter()
            .map(|bucket| (hour_label(&bucket.hour), bucket.count)),
    )
}

pub fn render_network_chart(stats: &StatsSummary) -> String {
    render_bars(
        "🌐 Tokens by Network",
        stats
            .by_network
            .iter()
            .map(|(network, count)| (network.clone(), *count)),
    )
}

pub fn render_charts(stats: &StatsSummary) -> String {
    format!("{}\n\n{}", render_hourly_chart(stats), render_network_chart(stats))
}
