// ABOUTME: Test helper utilities for mocking GitHub contents API responses
// ABOUTME: Provides mockito-based helpers for unit testing API interactions

use mockito::{Server, ServerGuard};
use serde_json::json;

pub async fn mock_github_server() -> ServerGuard {
    Server::new_async().await
}

pub fn mock_create_file_response(path: &str) -> serde_json::Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({
        "content": {
            "name": name,
            "path": path,
            "sha": "95b966ae1c166bd92f8ae7d1c313e738c731dfc3",
            "size": 5,
            "url": format!("https://api.github.com/repos/octocat/pics/contents/{}?ref=main", path),
            "html_url": format!("https://github.com/octocat/pics/blob/main/{}", path),
            "download_url": format!("https://raw.githubusercontent.com/octocat/pics/main/{}", path),
            "type": "file"
        },
        "commit": {
            "sha": "7638417db6d59f3c431d3e1f261cc637155684cd",
            "html_url": "https://github.com/octocat/pics/commit/7638417db6d59f3c431d3e1f261cc637155684cd",
            "message": format!("Upload image {}", name)
        }
    })
}

pub fn mock_error_response(message: &str) -> serde_json::Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest/repos/contents#create-or-update-file-contents"
    })
}
