// ABOUTME: Configuration file loading, validation, and hierarchical merging for ghpic
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{proxy, timeouts};
use crate::proxy::{ProxyConfig, ProxyMode};
use crate::uploader::{NamingPolicy, UploadSettings};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(
        default,
        deserialize_with = "validate_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingPolicy>,
    #[serde(
        default,
        deserialize_with = "validate_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Outbound proxy for GitHub API requests
    #[serde(
        default,
        deserialize_with = "validate_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub https_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxySection>,
}

/// The `[proxy]` table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySection {
    #[serde(
        default,
        deserialize_with = "validate_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub upstream: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ProxyMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }

    /// Load configuration from specific file paths, lowest precedence first.
    /// Missing files are skipped; unreadable or invalid ones are errors.
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !Path::new(path).is_file() {
                continue;
            }
            log::debug!("Loading config from {}", path);
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (lowest first)
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir.join(".config").join("ghpic").join("config.toml");
            paths.push(path.to_string_lossy().to_string());
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home).join("ghpic").join("config.toml");
            paths.push(path.to_string_lossy().to_string());
        }

        // 3. Project-specific config
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join("ghpic.toml").to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            repo: other.repo.or(self.repo),
            api_url: other.api_url.or(self.api_url),
            branch: other.branch.or(self.branch),
            naming: other.naming.or(self.naming),
            display_base: other.display_base.or(self.display_base),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            https_proxy: other.https_proxy.or(self.https_proxy),
            proxy: match (self.proxy, other.proxy) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (base, other) => other.or(base),
            },
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        if let Some(ref proxy) = self.proxy {
            proxy.validate().context("Invalid proxy configuration")?;
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .unwrap_or(timeouts::DEFAULT_UPLOAD_TIMEOUT_SECS),
        )
    }

    /// Settings for an upload batch; the token never comes from a file
    pub fn upload_settings(&self, token: Option<SecretString>, verbose: bool) -> UploadSettings {
        UploadSettings {
            token,
            repo: self.repo.clone(),
            api_url: self.api_url.clone(),
            branch: self.branch.clone(),
            naming: self.naming.unwrap_or_default(),
            display_base: self.display_base.clone(),
            https_proxy: self.https_proxy.clone(),
            timeout: self.timeout(),
            verbose,
        }
    }

    pub fn proxy_section(&self) -> ProxySection {
        self.proxy.clone().unwrap_or_default()
    }
}

impl ProxySection {
    pub fn merge(self, other: ProxySection) -> ProxySection {
        ProxySection {
            upstream: other.upstream.or(self.upstream),
            mode: other.mode.or(self.mode),
            cache_seconds: other.cache_seconds.or(self.cache_seconds),
            allowed_origin: other.allowed_origin.or(self.allowed_origin),
            bind: other.bind.or(self.bind),
            upstream_timeout_secs: other.upstream_timeout_secs.or(self.upstream_timeout_secs),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.upstream_timeout_secs == Some(0) {
            return Err(anyhow!("upstream_timeout_secs must be greater than zero"));
        }
        if let Some(ref bind) = self.bind {
            bind.parse::<SocketAddr>()
                .map_err(|_| anyhow!("Invalid bind address '{}'. Expected host:port", bind))?;
        }
        self.proxy_config()?;
        Ok(())
    }

    /// Resolve against the built-in defaults
    pub fn proxy_config(&self) -> Result<ProxyConfig> {
        let upstream = self.upstream.as_deref().unwrap_or(proxy::DEFAULT_UPSTREAM);
        let config = ProxyConfig::new(upstream)?
            .with_mode(self.mode.unwrap_or_default())
            .with_cache_seconds(self.cache_seconds.unwrap_or(proxy::DEFAULT_CACHE_SECONDS))
            .with_upstream_timeout(self.upstream_timeout_secs.map(Duration::from_secs));

        match self.allowed_origin {
            Some(ref origin) => config.with_allowed_origin(origin),
            None => Ok(config),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let bind = self.bind.as_deref().unwrap_or(proxy::DEFAULT_BIND);
        bind.parse()
            .map_err(|_| anyhow!("Invalid bind address '{}'. Expected host:port", bind))
    }
}

// Custom deserializer for URL validation
fn validate_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    if let Some(ref raw) = value {
        let parsed = url::Url::parse(raw)
            .map_err(|e| D::Error::custom(format!("Invalid URL '{}': {}", raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(D::Error::custom(format!(
                "Invalid URL '{}'. Must use http or https",
                raw
            )));
        }
    }

    Ok(value)
}
