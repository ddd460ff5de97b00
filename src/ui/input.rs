//! Command input
//!
//! One line of terminal input becomes one intent (or quit).

use crate::core::query_state::{DashboardIntent, NetworkFilter};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::Network;

pub const HELP_LINE: &str =
    "Commands: n|next  p|prev  page <n>  all  eth  bsc  r|refresh  q|quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Intent(DashboardIntent),
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> AppResult<Option<Command>> {
    let line = line.trim().to_lowercase();
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(AppError::invalid_request(format!("Too many arguments: {}", line)));
    }

    let intent = match (word, arg) {
        ("q" | "quit" | "exit", None) => return Ok(Some(Command::Quit)),
        ("n" | "next", None) => DashboardIntent::NextPage,
        ("p" | "prev" | "previous", None) => DashboardIntent::PreviousPage,
        ("r" | "refresh", None) => DashboardIntent::Refresh,
        ("all", None) => DashboardIntent::SelectNetwork(NetworkFilter::All),
        ("eth", None) => DashboardIntent::SelectNetwork(NetworkFilter::Only(Network::Eth)),
        ("bsc", None) => DashboardIntent::SelectNetwork(NetworkFilter::Only(Network::Bsc)),
        ("page", Some(n)) => match n.parse::<u32>() {
            Ok(page) if page >= 1 => DashboardIntent::GoToPage(page),
            _ => {
                return Err(AppError::invalid_request(format!(
                    "Page must be a number >= 1, got {}",
                    n
                )))
            }
        },
        ("page", None) => return Err(AppError::invalid_request("Usage: page <n>")),
        _ => return Err(AppError::invalid_request(format!("Unknown command: {}", line))),
    };

    Ok(Some(Command::Intent(intent)))
}
