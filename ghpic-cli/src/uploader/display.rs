// ABOUTME: Rewrites raw download URLs onto a public display base (usually the proxy)
// ABOUTME: Falls back to the original URL when no base is set or the branch marker is absent

use crate::constants::paths;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRewrite {
    base: Option<String>,
    branch: String,
}

impl Default for DisplayRewrite {
    fn default() -> Self {
        Self {
            base: None,
            branch: paths::DEFAULT_BRANCH.to_string(),
        }
    }
}

impl DisplayRewrite {
    pub fn new(base: Option<String>, branch: Option<String>) -> Self {
        Self {
            base: base.map(|b| b.trim_end_matches('/').to_string()),
            branch: branch.unwrap_or_else(|| paths::DEFAULT_BRANCH.to_string()),
        }
    }

    /// `https://raw.githubusercontent.com/o/r/main/images/a.png` becomes
    /// `<base>/images/a.png`
    pub fn apply(&self, download_url: &str) -> String {
        let Some(base) = &self.base else {
            return download_url.to_string();
        };

        let marker = format!("/{}/", self.branch);
        match download_url.split_once(&marker) {
            Some((_, rest)) => format!("{}/{}", base, rest),
            None => download_url.to_string(),
        }
    }
}
