// ABOUTME: Custom error types for the ghpic SDK with user-friendly messages
// ABOUTME: Maps GitHub contents API failure modes onto a single error enum

use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Authentication failed ({status}){}", detail(.message))]
    Auth {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Repository or path not found: {path}{}", detail(.message))]
    NotFound {
        path: String,
        message: Option<String>,
    },

    #[error("GitHub rejected {path} ({status}){}", detail(.message))]
    Conflict {
        status: StatusCode,
        path: String,
        message: Option<String>,
    },

    #[error("Rate limit exceeded{}", detail(.message))]
    RateLimit { message: Option<String> },

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Invalid API response format")]
    InvalidResponse,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GitHubError {
    /// Build an error from a non-success status. GitHub's `message` field is
    /// carried through whenever the body had one.
    pub fn from_status(status: StatusCode, message: Option<String>, path: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GitHubError::Auth { status, message }
            }
            StatusCode::NOT_FOUND => GitHubError::NotFound {
                path: path.to_string(),
                message,
            },
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => GitHubError::Conflict {
                status,
                path: path.to_string(),
                message,
            },
            StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimit { message },
            _ => GitHubError::Api {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown status")
                        .to_string()
                }),
            },
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            GitHubError::Auth { .. } => Some(
                "Check your GitHub token. It needs the `repo` (or contents: write) scope, see https://github.com/settings/tokens",
            ),
            GitHubError::NotFound { .. } => {
                Some("Check the repository in `owner/name` form and that the token can see it")
            }
            GitHubError::Conflict { .. } => {
                Some("If another file already uses that path, upload again to get a fresh name")
            }
            GitHubError::Network(_) => Some("Check your internet connection and try again"),
            GitHubError::RateLimit { .. } => Some("Wait a moment before making another request"),
            GitHubError::Timeout => Some("Try again or raise `timeout_secs` in your config"),
            _ => None,
        }
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!(": {}", message),
        _ => String::new(),
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GitHubError::Timeout
        } else if err.is_decode() {
            GitHubError::InvalidResponse
        } else if let Some(status) = err.status() {
            GitHubError::from_status(status, None, err.url().map(|u| u.path()).unwrap_or(""))
        } else {
            GitHubError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(_err: serde_json::Error) -> Self {
        GitHubError::InvalidResponse
    }
}
