// ABOUTME: Builder pattern implementation for GitHubClient configuration
// ABOUTME: Provides type-safe configuration with compile-time validation

use crate::GitHubClient;
use crate::constants::timeouts;
use crate::error::GitHubError;
use secrecy::SecretString;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<GitHubClient, GitHubError>))]
pub struct GitHubClientConfig {
    pub auth_token: SecretString,

    #[builder(default = false)]
    pub verbose: bool,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    /// Outbound proxy for every API request
    #[builder(default = None)]
    pub proxy: Option<reqwest::Proxy>,

    /// Overrides https://api.github.com, e.g. for GitHub Enterprise or tests
    #[builder(default = None)]
    pub base_url: Option<String>,
}

impl From<GitHubClientConfig> for Result<GitHubClient, GitHubError> {
    fn from(config: GitHubClientConfig) -> Self {
        GitHubClient::from_config(config)
    }
}

impl GitHubClient {
    pub fn builder() -> GitHubClientConfigBuilder<((), (), (), (), ())> {
        GitHubClientConfig::builder()
    }
}

impl GitHubClient {
    /// Parse a proxy URL into a proxy used for both http and https targets
    pub fn create_proxy(url: &str) -> Result<reqwest::Proxy, GitHubError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| GitHubError::Configuration(format!("Invalid proxy URL: {}", e)))?;

        reqwest::Proxy::all(parsed_url.as_str())
            .map_err(|e| GitHubError::Configuration(format!("Invalid proxy configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GitHubClient;
    use crate::error::GitHubError;
    use secrecy::SecretString;
    use std::time::Duration;

    fn token() -> SecretString {
        SecretString::new("ghp_test_token".to_string().into_boxed_str())
    }

    #[test]
    fn test_builder_with_minimal_config() {
        let client_result = GitHubClient::builder().auth_token(token()).build();

        assert!(client_result.is_ok());
        assert_eq!(client_result.unwrap().api_base(), "https://api.github.com");
    }

    #[test]
    fn test_builder_with_all_options() {
        let client_result = GitHubClient::builder()
            .auth_token(token())
            .verbose(true)
            .timeout(Duration::from_secs(60))
            .base_url(Some("https://ghe.example.com/api/v3/".to_string()))
            .build();

        assert!(client_result.is_ok());
        assert_eq!(
            client_result.unwrap().api_base(),
            "https://ghe.example.com/api/v3"
        );
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = GitHubClient::builder()
            .auth_token(token())
            .base_url(Some("not a url".to_string()))
            .build();

        assert!(matches!(result, Err(GitHubError::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_token_with_newline() {
        let result = GitHubClient::builder()
            .auth_token(SecretString::new("abc\ndef".to_string().into_boxed_str()))
            .build();

        assert!(matches!(result, Err(GitHubError::Configuration(_))));
    }

    #[test]
    fn test_config_uses_secrecy_for_sensitive_data() {
        let api_key = token();
        let config_result = GitHubClientConfig::builder()
            .auth_token(api_key.clone())
            .build();

        assert!(config_result.is_ok());

        let debug_str = format!("{:?}", api_key);
        assert!(!debug_str.contains("ghp_test_token"));
    }

    #[test]
    fn test_builder_validates_proxy_url() {
        let result = GitHubClient::create_proxy("not-a-url");

        match result {
            Err(GitHubError::Configuration(msg)) => {
                assert!(msg.contains("Invalid proxy URL"));
            }
            _ => panic!("Expected configuration error"),
        }
    }

    #[test]
    fn test_builder_with_valid_proxy() {
        let proxy_result = GitHubClient::create_proxy("http://proxy:8080");
        assert!(proxy_result.is_ok());

        let client_result = GitHubClient::builder()
            .auth_token(token())
            .proxy(Some(proxy_result.unwrap()))
            .build();

        assert!(client_result.is_ok());
    }
}
