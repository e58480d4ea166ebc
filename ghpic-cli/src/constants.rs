// ABOUTME: Centralized constants for the ghpic CLI application
// ABOUTME: Contains remote path layout, proxy defaults, and user-facing messages

/// Remote path layout inside the target repository
pub mod paths {
    /// Every uploaded file lands under this prefix
    pub const IMAGES_PREFIX: &str = "images/";

    /// Length of the random leaf suffix in the dated naming policy
    pub const RANDOM_SUFFIX_LEN: usize = 8;

    /// Alphabet of the random suffix (base 36, lowercase)
    pub const RANDOM_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Branch assumed when rewriting download URLs onto a display base
    pub const DEFAULT_BRANCH: &str = "main";
}

/// Proxy defaults
pub mod proxy {
    /// Upstream serving raw files when none is configured
    pub const DEFAULT_UPSTREAM: &str = "https://raw.githubusercontent.com/52ahao/pic/main";

    /// Cache lifetime handed to browsers and CDNs
    pub const DEFAULT_CACHE_SECONDS: u64 = 86400;

    /// Preflight cache lifetime
    pub const PREFLIGHT_MAX_AGE: u64 = 86400;

    pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";

    pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

    pub const DEFAULT_BIND: &str = "0.0.0.0:8787";

    /// Body returned for the bare root in rich mode
    pub const RUNNING_MESSAGE: &str = "Image proxy service is running";
}

/// Timeout configurations
pub mod timeouts {
    /// Default timeout for upload requests, in seconds
    pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;
}

/// Messages shown in upload results
pub mod messages {
    /// Title of the single result emitted when credentials are missing
    pub const ERROR_TITLE: &str = "Error";

    pub const MISSING_CREDENTIALS: &str = "Please provide a GitHub token and a repository";

    pub const NOT_AN_IMAGE: &str = "Only image files can be uploaded";

    pub const MISSING_DOWNLOAD_URL: &str = "Upload failed: response did not include a download URL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_constants() {
        assert!(paths::IMAGES_PREFIX.ends_with('/'));
        assert_eq!(paths::RANDOM_SUFFIX_LEN, 8);
        assert_eq!(paths::RANDOM_ALPHABET.len(), 36);
        assert!(
            paths::RANDOM_ALPHABET
                .iter()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_proxy_constants() {
        assert_eq!(proxy::DEFAULT_CACHE_SECONDS, 86400);
        assert_eq!(proxy::PREFLIGHT_MAX_AGE, 86400);
        assert_eq!(proxy::DEFAULT_ALLOWED_ORIGIN, "*");
        assert!(!proxy::DEFAULT_UPSTREAM.ends_with('/'));
        assert_eq!(proxy::RUNNING_MESSAGE, "Image proxy service is running");
    }

    #[test]
    fn test_message_constants() {
        assert_eq!(messages::ERROR_TITLE, "Error");
        assert!(messages::MISSING_DOWNLOAD_URL.starts_with("Upload failed"));
    }
}
