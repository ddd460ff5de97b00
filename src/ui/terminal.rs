//! Terminal loop
//!
//! Redraws the dashboard on every snapshot, on every command and on a
//! slow redraw tick, and feeds input lines to the manager as intents.

use chrono::Utc;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{interval_at, Instant};
use tracing::{info, warn};

use crate::core::sync_manager::DashboardHandle;
use crate::ui::input::{parse_command, Command};
use crate::ui::render_dashboard;

pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
/// Redraw cadence between snapshots, keeps "Detected" times fresh
pub const REDRAW_INTERVAL: Duration = Duration::from_secs(10);

/// Run until `quit`, `shutdown` resolving, or the manager stopping.
/// A closed input only stops command reading; frames keep coming.
pub async fn run_terminal<R, W, S>(
    dashboard: &DashboardHandle,
    input: R,
    out: &mut W,
    shutdown: S,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    let mut snapshots = dashboard.subscribe();
    let mut lines = input.lines();
    let mut input_open = true;
    let mut notice: Option<String> = None;
    let mut redraw = interval_at(Instant::now() + REDRAW_INTERVAL, REDRAW_INTERVAL);
    tokio::pin!(shutdown);

    loop {
        {
            let snapshot = snapshots.borrow_and_update().clone();
            write!(out, "{}{}", CLEAR_SCREEN, render_dashboard(&snapshot, Utc::now()))?;
            if let Some(text) = notice.take() {
                write!(out, "\n{}", text)?;
            }
            writeln!(out)?;
            out.flush()?;
        }

        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    warn!("Dashboard stopped unexpectedly");
                    break;
                }
            }
            line = lines.next_line(), if input_open => match line? {
                Some(line) => match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Intent(intent))) => {
                        if let Err(e) = dashboard.dispatch(intent) {
                            warn!("⚠️ {}", e);
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => notice = Some(format!("⚠️  {}", e.message)),
                },
                None => {
                    info!("⌨️ Input closed, press Ctrl+C to quit");
                    input_open = false;
                }
            },
            _ = redraw.tick() => {}
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}
