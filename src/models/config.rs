//! Configuration module for the scanner dashboard
//!
//! Uses constants from utils/constants.rs.
//! The API base URL is the only value read from the environment, once at startup.

use reqwest::Url;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::constants::{
    API_URL_ENV_VARS, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_PAGE_SIZE,
    PAGE_SIZE, POLL_INTERVAL_SECS,
};

/// Configuration for the dashboard and its API client
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the scanner API, without trailing slash
    pub api_base_url: String,
    /// Timeout applied to each API request
    pub request_timeout: Duration,
    /// Auto-refresh cadence
    pub poll_interval: Duration,
    /// Rows per page of the token table
    pub page_size: u32,
    /// Only list tokens that reached confirmation
    pub confirmed_only: bool,
    /// Jump back to page 1 when the network filter changes
    pub reset_page_on_filter_change: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            page_size: PAGE_SIZE,
            confirmed_only: true,
            reset_page_on_filter_change: false,
        }
    }
}

impl DashboardConfig {
    /// Load config, taking the base URL from the first set env var
    pub fn from_env() -> AppResult<Self> {
        let from_env = API_URL_ENV_VARS
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()));

        let config = match from_env {
            Some(url) => Self::default().with_api_base_url(url)?,
            None => Self::default(),
        };

        info!("🌐 Scanner API: {}", config.api_base_url);
        Ok(config)
    }

    /// Override the base URL (validated, trailing slash stripped)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> AppResult<Self> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| {
                AppError::with_source(
                    ErrorCode::ConfigInvalidValue,
                    format!("Invalid API base URL: {}", trimmed),
                    e,
                )
            })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::invalid_config(format!(
                "API base URL must be http(s): {}",
                trimmed
            )));
        }

        self.api_base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_reset_page_on_filter_change(mut self, reset: bool) -> Self {
        self.reset_page_on_filter_change = reset;
        self
    }

    /// Check invariants before the dashboard is mounted
    pub fn validate(&self) -> AppResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::invalid_config(format!(
                "page_size must be 1..={}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(AppError::invalid_config("poll_interval must be non-zero"));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::invalid_config("request_timeout must be non-zero"));
        }
        Ok(())
    }
}
