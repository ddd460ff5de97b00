//! Scanner API Client
//!
//! Typed wrapper over the RealTime Token Scanner REST API.
//!
//! ✅ USED FOR:
//! - Paginated list of newly detected tokens (`/tokens/new`)
//! - Aggregate statistics (`/stats/summary`)
//! - Single token lookups, recent alerts, health
//!
//! Every call is a plain GET. Failures are classified as transport,
//! HTTP status or decode errors; no retries happen here, the dashboard
//! poll cadence is the only retry.

use alloy_primitives::Address;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use std::str::FromStr;
use tracing::debug;

use crate::models::config::DashboardConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{Alert, HealthStatus, Network, StatsSummary, Token, TokenPageRequest};
use crate::utils::constants::{
    MAX_ALERT_LIMIT, MIN_ALERT_LIMIT, PATH_HEALTH, PATH_NEW_TOKENS, PATH_RECENT_ALERTS,
    PATH_STATS_SUMMARY, PATH_TOKENS, PATH_TOKEN_BY_ADDRESS, USER_AGENT as USER_AGENT_CONST,
};

/// Longest error body excerpt kept in an HTTP error message
const ERROR_BODY_EXCERPT: usize = 200;

/// The two resources one dashboard cycle needs
#[async_trait]
pub trait ScannerSource: Send + Sync {
    async fn fetch_tokens(&self, request: &TokenPageRequest) -> AppResult<Vec<Token>>;
    async fn fetch_stats(&self) -> AppResult<StatsSummary>;
}

/// Scanner API client
#[derive(Clone)]
pub struct ScannerApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScannerApiClient {
    pub fn new(config: &DashboardConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .gzip(true)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorCode::ConfigInvalidValue,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("➡️ GET {} {:?}", url, query);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
            return Err(AppError::http_status(
                status.as_u16(),
                format!("GET {} failed: {}", path, excerpt),
            ));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::with_source(
                ErrorCode::ApiDecode,
                format!("Unexpected response body from {}", path),
                e,
            )
        })
    }

    /// Newest tokens first, one page
    pub async fn fetch_tokens(&self, request: &TokenPageRequest) -> AppResult<Vec<Token>> {
        request.validate()?;
        self.get_json(PATH_NEW_TOKENS, &request.query_pairs()).await
    }

    pub async fn fetch_stats(&self) -> AppResult<StatsSummary> {
        self.get_json(PATH_STATS_SUMMARY, &[]).await
    }

    pub async fn fetch_token_by_id(&self, id: u64) -> AppResult<Token> {
        self.get_json(&format!("{}/{}", PATH_TOKENS, id), &[]).await
    }

    /// Lookup by contract address; the address must be 20-byte hex
    pub async fn fetch_token_by_address(
        &self,
        address: &str,
        network: Network,
    ) -> AppResult<Token> {
        Address::from_str(address).map_err(|_| {
            AppError::invalid_request(format!("Invalid contract address: {}", address))
        })?;

        self.get_json(
            &format!("{}/{}", PATH_TOKEN_BY_ADDRESS, address),
            &[("network", network.as_code().to_string())],
        )
        .await
    }

    /// Recent notable tokens, `limit` within 1..=50
    pub async fn fetch_recent_alerts(&self, limit: u32) -> AppResult<Vec<Alert>> {
        if !(MIN_ALERT_LIMIT..=MAX_ALERT_LIMIT).contains(&limit) {
            return Err(AppError::invalid_request(format!(
                "limit must be {}..={}, got {}",
                MIN_ALERT_LIMIT, MAX_ALERT_LIMIT, limit
            )));
        }
        self.get_json(PATH_RECENT_ALERTS, &[("limit", limit.to_string())]).await
    }

    pub async fn health_check(&self) -> AppResult<HealthStatus> {
        self.get_json(PATH_HEALTH, &[]).await
    }
}

#[async_trait]
impl ScannerSource for ScannerApiClient {
    async fn fetch_tokens(&self, request: &TokenPageRequest) -> AppResult<Vec<Token>> {
        ScannerApiClient::fetch_tokens(self, request).await
    }

    async fn fetch_stats(&self) -> AppResult<StatsSummary> {
        ScannerApiClient::fetch_stats(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const UNI: &str = "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984";

    fn token_json(id: u64, network: &str) -> String {
        format!(
            r#"{{"id":{id},"address":"{UNI}","block_number":19000000,"timestamp":"2024-05-01T12:30:00",
               "network":"{network}","name":"Uniswap","symbol":"UNI","decimals":18,
               "total_supply":"1000000000000000000000000000","confirmed":true,"is_verified":false,"risk_score":2}}"#
        )
    }

    fn client_for(url: &str) -> ScannerApiClient {
        let config = DashboardConfig::default().with_api_base_url(url).unwrap();
        ScannerApiClient::new(&config).unwrap()
    }

    fn first_page() -> TokenPageRequest {
        TokenPageRequest { page: 1, page_size: 20, network: None, confirmed_only: true }
    }

    #[tokio::test]
    async fn test_fetch_tokens_default_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tokens/new")
            .match_query(Matcher::Exact("page=1&page_size=20&confirmed_only=true".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", token_json(1, "ETH")))
            .create_async()
            .await;

        let tokens = client_for(&server.url()).fetch_tokens(&first_page()).await.unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].network, Network::Eth);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tokens_with_network_filter() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tokens/new")
            .match_query(Matcher::Exact(
                "page=3&page_size=20&network=BSC&confirmed_only=true".to_string(),
            ))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let request = TokenPageRequest { page: 3, network: Some(Network::Bsc), ..first_page() };
        let tokens = client_for(&server.url()).fetch_tokens(&request).await.unwrap();
        assert!(tokens.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/stats/summary")
            .with_status(503)
            .with_body(r#"{"detail":"database unavailable"}"#)
            .create_async()
            .await;

        let err = client_for(&server.url()).fetch_stats().await.unwrap_err();
        assert!(err.is_http());
        assert_eq!(err.status, Some(503));
        assert!(err.message.contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/tokens/new")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"tokens": []}"#)
            .create_async()
            .await;

        let err = client_for(&server.url()).fetch_tokens(&first_page()).await.unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.code_str(), "API_DECODE_FAILED");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let err = client_for("http://127.0.0.1:1").fetch_stats().await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_invalid_page_rejected_without_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tokens/new")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let request = TokenPageRequest { page: 0, ..first_page() };
        let err = client_for(&server.url()).fetch_tokens(&request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiInvalidRequest);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_token_by_id_and_address() {
        let mut server = Server::new_async().await;
        let by_id = server
            .mock("GET", "/tokens/42")
            .with_status(200)
            .with_body(token_json(42, "ETH"))
            .create_async()
            .await;
        let by_address = server
            .mock("GET", format!("/tokens/address/{}", UNI).as_str())
            .match_query(Matcher::UrlEncoded("network".into(), "BSC".into()))
            .with_status(200)
            .with_body(token_json(43, "BSC"))
            .create_async()
            .await;

        let client = client_for(&server.url());
        assert_eq!(client.fetch_token_by_id(42).await.unwrap().id, 42);
        let token = client.fetch_token_by_address(UNI, Network::Bsc).await.unwrap();
        assert_eq!(token.network, Network::Bsc);
        by_id.assert_async().await;
        by_address.assert_async().await;

        let err = client.fetch_token_by_address("0xnothex", Network::Eth).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiInvalidRequest);
    }

    #[tokio::test]
    async fn test_missing_token_is_404() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/tokens/999")
            .with_status(404)
            .with_body(r#"{"detail":"Token not found"}"#)
            .create_async()
            .await;

        let err = client_for(&server.url()).fetch_token_by_id(999).await.unwrap_err();
        assert_eq!(err.status, Some(404));
    }

    #[tokio::test]
    async fn test_recent_alerts_limit() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/alerts/recent")
            .match_query(Matcher::Exact("limit=5".to_string()))
            .with_status(200)
            .with_body(format!("[{},{}]", token_json(1, "ETH"), token_json(2, "BSC")))
            .create_async()
            .await;

        let client = client_for(&server.url());
        let alerts = client.fetch_recent_alerts(5).await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].token.network, Network::Bsc);
        mock.assert_async().await;

        assert!(client.fetch_recent_alerts(0).await.is_err());
        assert!(client.fetch_recent_alerts(51).await.is_err());
    }

    #[tokio::test]
    async fn test_health_check() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(
                r#"{"status":"degraded","database":"unhealthy","timestamp":"2024-05-01T12:00:00.5"}"#,
            )
            .create_async()
            .await;

        let health = client_for(&server.url()).health_check().await.unwrap();
        assert!(!health.is_healthy());
        assert_eq!(health.database, "unhealthy");
    }
}
