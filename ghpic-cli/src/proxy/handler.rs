// ABOUTME: The single fallback handler serving every proxied request
// ABOUTME: Answers preflight locally, forwards everything else and streams the upstream body

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use super::ProxyState;
use super::config::{ProxyConfig, ProxyMode};
use super::rewrite;
use crate::constants::proxy;

pub async fn handle(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let config = &state.config;

    if method == Method::OPTIONS {
        return (StatusCode::OK, rewrite::preflight_headers(config)).into_response();
    }

    let path = uri.path();
    if config.mode == ProxyMode::Rich && rewrite::strip_leading_slash(path).is_empty() {
        return (
            StatusCode::OK,
            rewrite::plain_text_headers(config),
            proxy::RUNNING_MESSAGE,
        )
            .into_response();
    }

    let request = rewrite::rewrite_request(config, &method, path, &headers);
    log::debug!("{} {} -> {}", request.method, path, request.url);

    let mut builder = state
        .client
        .request(request.method, &request.url)
        .headers(request.headers);
    if let Some(timeout) = config.upstream_timeout {
        builder = builder.timeout(timeout);
    }

    let upstream = match builder.send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            log::warn!("Upstream request to {} failed: {}", request.url, e);
            let status = match config.mode {
                ProxyMode::Rich => StatusCode::INTERNAL_SERVER_ERROR,
                ProxyMode::Minimal => StatusCode::BAD_GATEWAY,
            };
            return error_response(config, status, &e.to_string());
        }
    };

    match config.mode {
        ProxyMode::Rich => rich_response(config, upstream),
        ProxyMode::Minimal => minimal_response(config, upstream),
    }
}

fn rich_response(config: &ProxyConfig, upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    if !status.is_success() {
        log::debug!("Upstream answered {} for {}", status, upstream.url());
        let reason = status.canonical_reason().unwrap_or(status.as_str());
        return error_response(
            config,
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Failed to fetch image: {}", reason),
        );
    }

    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let headers = rewrite::rich_headers(config, content_type);
    let body = Body::from_stream(upstream.bytes_stream());

    (StatusCode::OK, headers, body).into_response()
}

fn minimal_response(config: &ProxyConfig, upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = rewrite::minimal_headers(config, upstream.headers());
    let body = Body::from_stream(upstream.bytes_stream());

    (status, headers, body).into_response()
}

/// Plain-text `Error: <message>` with the CORS origin attached
pub fn error_response(config: &ProxyConfig, status: StatusCode, message: &str) -> Response {
    (
        status,
        rewrite::plain_text_headers(config),
        format!("Error: {}", message),
    )
        .into_response()
}
