//! Presentation Components
//!
//! Stateless text renderers of a [`DashboardSnapshot`]. Nothing in here
//! fetches or mutates; user input is turned into intents by [`input`].

pub mod chart;
pub mod header;
pub mod input;
pub mod network_filter;
pub mod stats_cards;
pub mod terminal;
pub mod token_table;

use chrono::{DateTime, Utc};
use comfy_table::Color;

use crate::core::view_state::DashboardSnapshot;
use crate::utils::classify::BadgeColor;

pub use input::{parse_command, Command, HELP_LINE};
pub use terminal::run_terminal;

/// Full dashboard frame. `now` drives the relative "Detected" column.
pub fn render_dashboard(snapshot: &DashboardSnapshot, now: DateTime<Utc>) -> String {
    let mut sections = vec![header::render_header()];

    if let Some(stats) = &snapshot.view.stats {
        sections.push(stats_cards::render_stats_cards(stats));
        sections.push(chart::render_charts(stats));
    }

    sections.push(network_filter::render_network_filter(snapshot.query.network()));
    sections.push(token_table::render_token_table(
        &snapshot.view,
        snapshot.pagination(),
        now,
    ));
    sections.push(HELP_LINE.to_string());

    sections.join("\n\n")
}

/// Terminal color of a badge
pub(crate) fn badge_color(color: BadgeColor) -> Color {
    match color {
        BadgeColor::Purple => Color::Magenta,
        BadgeColor::Orange => Color::DarkYellow,
        BadgeColor::Slate => Color::Grey,
        BadgeColor::Green => Color::Green,
        BadgeColor::Yellow => Color::Yellow,
        BadgeColor::Red => Color::Red,
    }
}
