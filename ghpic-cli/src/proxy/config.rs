// ABOUTME: Immutable proxy configuration handed to the router at construction
// ABOUTME: Holds the upstream base, cache lifetime, allowed origin, and mode flag

use anyhow::{Result, anyhow};
use axum::http::HeaderValue;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::constants::proxy;

/// Selects forwarding and error-wrapping behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    /// Forward only the method, replace response headers, wrap upstream
    /// failures in a 500, answer the bare root locally
    #[default]
    Rich,
    /// Forward request headers, pass upstream status and headers through
    Minimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    upstream_base: String,
    pub mode: ProxyMode,
    pub cache_seconds: u64,
    allowed_origin: HeaderValue,
    /// Upstream request timeout; none means wait for the upstream
    pub upstream_timeout: Option<Duration>,
}

impl ProxyConfig {
    pub fn new(upstream_base: &str) -> Result<Self> {
        let parsed = Url::parse(upstream_base)
            .map_err(|e| anyhow!("Invalid upstream URL '{}': {}", upstream_base, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Invalid upstream URL '{}'. Must use http or https",
                upstream_base
            ));
        }

        Ok(Self {
            upstream_base: upstream_base.trim_end_matches('/').to_string(),
            mode: ProxyMode::default(),
            cache_seconds: proxy::DEFAULT_CACHE_SECONDS,
            allowed_origin: HeaderValue::from_static(proxy::DEFAULT_ALLOWED_ORIGIN),
            upstream_timeout: None,
        })
    }

    pub fn with_mode(mut self, mode: ProxyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cache_seconds(mut self, cache_seconds: u64) -> Self {
        self.cache_seconds = cache_seconds;
        self
    }

    pub fn with_allowed_origin(mut self, origin: &str) -> Result<Self> {
        self.allowed_origin = HeaderValue::from_str(origin)
            .map_err(|_| anyhow!("Invalid allowed origin '{}'", origin))?;
        Ok(self)
    }

    pub fn with_upstream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Base without a trailing slash
    pub fn upstream_base(&self) -> &str {
        &self.upstream_base
    }

    pub fn allowed_origin(&self) -> &HeaderValue {
        &self.allowed_origin
    }

    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::new("https://raw.githubusercontent.com/o/r/main/").unwrap();
        assert_eq!(
            config.upstream_base(),
            "https://raw.githubusercontent.com/o/r/main"
        );
        assert_eq!(config.mode, ProxyMode::Rich);
        assert_eq!(config.cache_control(), "public, max-age=86400");
        assert_eq!(config.allowed_origin(), "*");
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn test_rejects_bad_upstream() {
        assert!(ProxyConfig::new("raw.githubusercontent.com/o/r").is_err());
        assert!(ProxyConfig::new("ftp://example.com/files").is_err());
    }

    #[test]
    fn test_rejects_bad_origin() {
        let result = ProxyConfig::new("http://localhost:9000")
            .unwrap()
            .with_allowed_origin("bad\norigin");
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = ProxyConfig::new("http://localhost:9000")
            .unwrap()
            .with_mode(ProxyMode::Minimal)
            .with_cache_seconds(60)
            .with_allowed_origin("https://blog.example.com")
            .unwrap()
            .with_upstream_timeout(Some(Duration::from_secs(5)));

        assert_eq!(config.mode, ProxyMode::Minimal);
        assert_eq!(config.cache_control(), "public, max-age=60");
        assert_eq!(config.allowed_origin(), "https://blog.example.com");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(5)));
    }
}
