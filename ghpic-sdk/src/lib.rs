// ABOUTME: ghpic SDK library providing a typed client for the GitHub contents API
// ABOUTME: Includes authentication, file creation, and the ContentsApi abstraction

pub mod builder;
pub mod constants;
pub mod error;
pub mod repo;

#[cfg(test)]
mod test_helpers;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

pub use builder::GitHubClientConfig;
pub use error::GitHubError;
pub use repo::RepoSlug;

use crate::constants::{headers, urls};

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFileRequest {
    pub message: String,
    /// Base64-encoded file bytes
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateFileResponse {
    #[serde(default)]
    pub content: Option<ContentInfo>,
    #[serde(default)]
    pub commit: Option<CommitInfo>,
}

impl CreateFileResponse {
    /// Public raw URL of the created file, if GitHub returned one
    pub fn download_url(&self) -> Option<&str> {
        self.content
            .as_ref()
            .and_then(|content| content.download_url.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Seam between the uploader and GitHub so uploads can run against fakes
#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// Create a new file. Never updates: no `sha` is sent.
    async fn create_file(
        &self,
        repo: &RepoSlug,
        path: &str,
        request: &CreateFileRequest,
    ) -> Result<CreateFileResponse>;
}

pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
    verbose: bool,
}

impl GitHubClient {
    pub fn from_config(config: GitHubClientConfig) -> Result<Self> {
        let api_base = config
            .base_url
            .unwrap_or_else(|| urls::GITHUB_API_BASE.to_string());
        Url::parse(&api_base).map_err(|e| {
            GitHubError::Configuration(format!("Invalid API URL '{}': {}", api_base, e))
        })?;

        let mut auth = HeaderValue::from_str(&format!(
            "{} {}",
            headers::TOKEN_SCHEME,
            config.auth_token.expose_secret()
        ))
        .map_err(|_| {
            GitHubError::Configuration("GitHub token contains invalid characters".to_string())
        })?;
        auth.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, auth);
        default_headers.insert(ACCEPT, HeaderValue::from_static(headers::ACCEPT_GITHUB_JSON));

        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .user_agent(headers::USER_AGENT)
            .timeout(config.timeout);
        if let Some(proxy) = config.proxy {
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| GitHubError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            verbose: config.verbose,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path}` with each segment percent-encoded
    pub fn contents_url(&self, repo: &RepoSlug, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| GitHubError::Configuration(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| GitHubError::Configuration("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str(), "contents"])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

#[async_trait]
impl ContentsApi for GitHubClient {
    async fn create_file(
        &self,
        repo: &RepoSlug,
        path: &str,
        request: &CreateFileRequest,
    ) -> Result<CreateFileResponse> {
        let url = self.contents_url(repo, path)?;
        if self.verbose {
            log::debug!("PUT {} ({} base64 bytes)", url, request.content.len());
        }

        let response = self.client.put(url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .map(|body| body.message);
            log::debug!("contents API returned {} for {}", status, path);
            return Err(GitHubError::from_status(status, message, path));
        }

        let text = response.text().await?;
        let body: CreateFileResponse = serde_json::from_str(&text)?;
        Ok(body)
    }
}
