// ABOUTME: Pure request and response rewriting for the image proxy
// ABOUTME: Maps inbound path/method/headers onto the upstream and builds response headers

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::Method;

use super::config::{ProxyConfig, ProxyMode};
use crate::constants::proxy;

/// Never forwarded upstream; `host` must name the upstream, the others
/// describe the inbound connection only
const SKIPPED_REQUEST_HEADERS: [HeaderName; 3] = [
    header::HOST,
    header::CONNECTION,
    header::TRANSFER_ENCODING,
];

/// Framing headers re-derived by our own server
const SKIPPED_RESPONSE_HEADERS: [HeaderName; 2] = [header::CONNECTION, header::TRANSFER_ENCODING];

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
}

/// Removes exactly one leading slash; nothing else is normalised
pub fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

pub fn upstream_url(config: &ProxyConfig, path: &str) -> String {
    format!("{}/{}", config.upstream_base(), strip_leading_slash(path))
}

pub fn rewrite_request(
    config: &ProxyConfig,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> UpstreamRequest {
    let headers = match config.mode {
        ProxyMode::Rich => HeaderMap::new(),
        ProxyMode::Minimal => without(headers, &SKIPPED_REQUEST_HEADERS),
    };

    UpstreamRequest {
        url: upstream_url(config, path),
        method: method.clone(),
        headers,
    }
}

pub fn preflight_headers(config: &ProxyConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        config.allowed_origin().clone(),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(proxy::ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from(proxy::PREFLIGHT_MAX_AGE),
    );
    headers
}

/// Rich mode replaces the upstream headers wholesale
pub fn rich_headers(config: &ProxyConfig, content_type: Option<HeaderValue>) -> HeaderMap {
    let mut headers = preflight_headers(config);
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, content_type);
    }
    insert_cache_control(config, &mut headers);
    headers
}

/// Minimal mode keeps the upstream headers and overrides CORS and caching
pub fn minimal_headers(config: &ProxyConfig, upstream: &HeaderMap) -> HeaderMap {
    let mut headers = without(upstream, &SKIPPED_RESPONSE_HEADERS);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        config.allowed_origin().clone(),
    );
    insert_cache_control(config, &mut headers);
    headers
}

/// Headers for locally generated plain-text responses
pub fn plain_text_headers(config: &ProxyConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        config.allowed_origin().clone(),
    );
    headers
}

fn insert_cache_control(config: &ProxyConfig, headers: &mut HeaderMap) {
    if let Ok(value) = HeaderValue::from_str(&config.cache_control()) {
        headers.insert(header::CACHE_CONTROL, value);
    }
}

fn without(headers: &HeaderMap, skipped: &[HeaderName]) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !skipped.contains(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://raw.githubusercontent.com/octocat/pics/main";

    fn rich() -> ProxyConfig {
        ProxyConfig::new(BASE).unwrap()
    }

    fn minimal() -> ProxyConfig {
        ProxyConfig::new(BASE).unwrap().with_mode(ProxyMode::Minimal)
    }

    fn inbound_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("img.example.dev"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("image/webp,*/*"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
        headers
    }

    #[test]
    fn test_strip_leading_slash_only_once() {
        assert_eq!(strip_leading_slash("/foo/bar.png"), "foo/bar.png");
        assert_eq!(strip_leading_slash("//foo"), "/foo");
        assert_eq!(strip_leading_slash("foo"), "foo");
        assert_eq!(strip_leading_slash("/"), "");
    }

    #[test]
    fn test_upstream_url_is_plain_concatenation() {
        assert_eq!(
            upstream_url(&rich(), "/foo/bar.png"),
            format!("{}/foo/bar.png", BASE)
        );
        // Traversal segments are left for the upstream to resolve
        assert_eq!(
            upstream_url(&rich(), "/../secret"),
            format!("{}/../secret", BASE)
        );
    }

    #[test]
    fn test_rich_request_forwards_method_only() {
        let request = rewrite_request(&rich(), &Method::HEAD, "/a.png", &inbound_headers());
        assert_eq!(request.method, Method::HEAD);
        assert!(request.headers.is_empty());
        assert_eq!(request.url, format!("{}/a.png", BASE));
    }

    #[test]
    fn test_minimal_request_forwards_headers_except_host() {
        let request = rewrite_request(&minimal(), &Method::GET, "/a.png", &inbound_headers());
        assert!(request.headers.get(header::HOST).is_none());
        assert!(request.headers.get(header::CONNECTION).is_none());
        assert_eq!(request.headers[header::ACCEPT], "image/webp,*/*");
        assert_eq!(request.headers.get_all(header::COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_preflight_headers() {
        let headers = preflight_headers(&rich());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, HEAD, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_rich_headers_replace_upstream() {
        let headers = rich_headers(&rich(), Some(HeaderValue::from_static("image/png")));
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers.len(), 5);

        let headers = rich_headers(&rich(), None);
        assert!(headers.get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_minimal_headers_augment_upstream() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::ETAG, HeaderValue::from_static("\"abc\""));
        upstream.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=300"));
        upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

        let headers = minimal_headers(&minimal(), &upstream);
        assert_eq!(headers[header::ETAG], "\"abc\"");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.get(header::TRANSFER_ENCODING).is_none());
    }
}
