//! Scanner API probe
//!
//! One-shot walk over every scanner API endpoint, printing a short summary
//! of each response. Handy to check a backend before starting the dashboard.

use token_scanner::utils::classify::{display_name, display_symbol, risk_tier, truncate_address};
use token_scanner::utils::constants::DEFAULT_ALERT_LIMIT;
use token_scanner::{DashboardConfig, Network, ScannerApiClient, TokenPageRequest};

use eyre::Result;
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const PROBE_PAGE_SIZE: u32 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = DashboardConfig::from_env()?;
    let client = ScannerApiClient::new(&config)?;

    println!("🌐 Probing {}", client.base_url());

    println!("\n🏥 Checking API health...");
    let health = client.health_check().await?;
    println!(
        "   status: {} | database: {} | at {}",
        health.status, health.database, health.timestamp
    );
    if !health.is_healthy() {
        warn!("Backend reports {}, continuing anyway", health.status);
    }

    let mut first_token = None;
    for network in std::iter::once(None).chain(Network::ALL.map(Some)) {
        let request = TokenPageRequest {
            page: 1,
            page_size: PROBE_PAGE_SIZE,
            network,
            confirmed_only: true,
        };
        println!(
            "\n📋 New tokens (page 1, network: {})...",
            network.map(|n| n.as_code()).unwrap_or("all")
        );
        match client.fetch_tokens(&request).await {
            Ok(tokens) => {
                println!("   Found {} tokens", tokens.len());
                for token in tokens.iter().take(5) {
                    println!(
                        "   • {} ({}) - {} - {}",
                        display_name(token.name.as_deref()),
                        display_symbol(token.symbol.as_deref()),
                        token.network,
                        truncate_address(&token.address)
                    );
                }
                if first_token.is_none() {
                    first_token = tokens.into_iter().next();
                }
            }
            Err(e) => warn!("❌ {}", e),
        }
    }

    println!("\n📊 Statistics...");
    match client.fetch_stats().await {
        Ok(stats) => {
            println!("   Total tokens: {}", stats.total_tokens);
            println!("   Last 24h:     {}", stats.tokens_last_24h);
            println!("   Last hour:    {}", stats.tokens_last_hour);
            println!("   By network:   {:?}", stats.by_network);
        }
        Err(e) => warn!("❌ {}", e),
    }

    if let Some(token) = first_token {
        println!("\n🔍 Token #{}...", token.id);
        match client.fetch_token_by_id(token.id).await {
            Ok(found) => println!(
                "   {} ({}) at block {}, risk {}/10",
                display_name(found.name.as_deref()),
                display_symbol(found.symbol.as_deref()),
                found.block_number,
                found.risk_score.unwrap_or(0)
            ),
            Err(e) => warn!("❌ {}", e),
        }

        println!("\n🔎 Token at {} on {}...", token.address, token.network);
        match client.fetch_token_by_address(&token.address, token.network).await {
            Ok(found) => println!("{}", serde_json::to_string_pretty(&found)?),
            Err(e) => warn!("❌ {}", e),
        }
    } else {
        println!("\n🔍 No tokens yet, skipping lookups");
    }

    println!("\n⚠️  Recent alerts (limit {})...", DEFAULT_ALERT_LIMIT);
    match client.fetch_recent_alerts(DEFAULT_ALERT_LIMIT).await {
        Ok(alerts) => {
            println!("   Found {} alerts", alerts.len());
            for alert in &alerts {
                let tier = risk_tier(alert.token.risk_score);
                println!(
                    "   {} {} - {} ({})",
                    tier.emoji(),
                    display_symbol(alert.token.symbol.as_deref()),
                    tier.label(),
                    alert.token.network
                );
            }
        }
        Err(e) => warn!("❌ {}", e),
    }

    Ok(())
}
