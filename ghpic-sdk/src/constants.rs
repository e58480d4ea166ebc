// ABOUTME: Centralized constants for the ghpic SDK
// ABOUTME: Contains the GitHub API URL, request headers, and timeout defaults

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// GitHub URLs
pub mod urls {
    /// Base URL for the GitHub REST API
    pub const GITHUB_API_BASE: &str = "https://api.github.com";
}

/// Request header values sent with every API call
pub mod headers {
    /// Media type GitHub recommends for REST v3 requests
    pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

    /// GitHub rejects requests without a User-Agent
    pub const USER_AGENT: &str = concat!("ghpic/", env!("CARGO_PKG_VERSION"));

    /// Prefix for the classic token authorization scheme
    pub const TOKEN_SCHEME: &str = "token";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timeout_constants() {
        assert_eq!(timeouts::HTTP_REQUEST_TIMEOUT, Duration::from_secs(30));
    }

    #[test]
    fn test_url_constants() {
        assert!(urls::GITHUB_API_BASE.starts_with("https://"));
        assert!(!urls::GITHUB_API_BASE.ends_with('/'));
    }

    #[test]
    fn test_header_constants() {
        assert!(headers::USER_AGENT.starts_with("ghpic/"));
        assert_eq!(headers::TOKEN_SCHEME, "token");
        assert!(headers::ACCEPT_GITHUB_JSON.contains("github"));
    }
}
