//! RealTime Token Scanner - terminal dashboard
//!
//! Renders newly detected ETH/BSC tokens from the scanner API and
//! refreshes every 30s. Commands are read from stdin, one per line.

use token_scanner::utils::constants::{APP_NAME, APP_VERSION};
use token_scanner::{run_terminal, DashboardConfig, DashboardSync, ScannerApiClient, ScannerSource};

use eyre::Result;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never tear a rendered frame
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("🚀 {} v{}", APP_NAME, APP_VERSION);

    let config = DashboardConfig::from_env()?;
    let client: Arc<dyn ScannerSource> = Arc::new(ScannerApiClient::new(&config)?);
    let dashboard = DashboardSync::new(client, config).mount()?;

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run_terminal(
        &dashboard,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
        ctrl_c,
    )
    .await?;

    let stats = dashboard.stats();
    dashboard.shutdown().await;

    info!("📊 Final Statistics:");
    info!("   Cycles issued:   {}", stats.cycles_issued);
    info!("   Cycles settled:  {}", stats.cycles_settled);
    info!("   Cycles failed:   {}", stats.cycles_failed);
    info!("   Stale discarded: {}", stats.stale_discarded);

    Ok(())
}
