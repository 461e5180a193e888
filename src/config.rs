use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Backend origin used when `API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Block explorer used for transaction links when `EXPLORER_URL` is not set
pub const DEFAULT_EXPLORER_URL: &str = "https://etherscan.io";

/// Rows per page requested from the backend by default
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_TRANSACTIONS_REFRESH_SECS: u64 = 10;
pub const DEFAULT_STATS_REFRESH_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub explorer_url: String,
    pub page_size: u32,
    pub transactions_refresh: Duration,
    pub stats_refresh: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Build a config from process environment variables (after `.env` is loaded)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |key: &str, default: u64| {
            non_empty(key)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        let api_url = non_empty("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let explorer_url = non_empty("EXPLORER_URL").unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string());
        let page_size = non_empty("PAGE_SIZE")
            .and_then(|v| v.parse::<u32>().ok())
            .map(clamp_page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            api_url,
            explorer_url,
            page_size,
            transactions_refresh: Duration::from_secs(secs(
                "TRANSACTIONS_REFRESH_SECS",
                DEFAULT_TRANSACTIONS_REFRESH_SECS,
            )),
            stats_refresh: Duration::from_secs(secs("STATS_REFRESH_SECS", DEFAULT_STATS_REFRESH_SECS)),
            request_timeout: Duration::from_secs(secs(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        }
    }

    /// Parse and check the backend base URL
    pub fn api_base_url(&self) -> Result<Url> {
        parse_http_url(&self.api_url)
    }

    /// Get the full URL to view a transaction on the block explorer
    pub fn tx_explorer_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Clamp a requested page size into the range the backend accepts
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Parse a URL and require an http(s) scheme
pub fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| anyhow!("Invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("Unsupported URL scheme '{}' in '{}'", other, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ==================== Config::from_lookup tests ====================

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.explorer_url, "https://etherscan.io");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.transactions_refresh, Duration::from_secs(10));
        assert_eq!(config.stats_refresh, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_config_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_URL", "https://tracker.example.com"),
            ("EXPLORER_URL", "https://sepolia.etherscan.io/"),
            ("PAGE_SIZE", "25"),
            ("TRANSACTIONS_REFRESH_SECS", "5"),
            ("STATS_REFRESH_SECS", "60"),
        ]));
        assert_eq!(config.api_url, "https://tracker.example.com");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.transactions_refresh, Duration::from_secs(5));
        assert_eq!(config.stats_refresh, Duration::from_secs(60));
        assert_eq!(
            config.tx_explorer_url("0xabc"),
            "https://sepolia.etherscan.io/tx/0xabc"
        );
    }

    #[test]
    fn test_config_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_URL", "   "),
            ("PAGE_SIZE", "lots"),
            ("TRANSACTIONS_REFRESH_SECS", "0"),
            ("STATS_REFRESH_SECS", "-3"),
        ]));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.transactions_refresh, Duration::from_secs(10));
        assert_eq!(config.stats_refresh, Duration::from_secs(30));
    }

    #[test]
    fn test_config_page_size_clamped() {
        let config = Config::from_lookup(lookup_from(&[("PAGE_SIZE", "500")]));
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
        let config = Config::from_lookup(lookup_from(&[("PAGE_SIZE", "0")]));
        assert_eq!(config.page_size, 1);
    }

    // ==================== URL tests ====================

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("http://localhost:8000").is_ok());
        assert!(parse_http_url("https://tracker.example.com/prefix").is_ok());
        assert!(parse_http_url("not a url").is_err());
        assert!(parse_http_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_tx_explorer_url_default() {
        let config = Config::default();
        assert_eq!(config.tx_explorer_url("0x12"), "https://etherscan.io/tx/0x12");
    }
}
