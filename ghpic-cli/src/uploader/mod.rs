// ABOUTME: Image uploader that pushes files into a GitHub repository
// ABOUTME: Validates, encodes, names, and uploads each file independently and in order

pub mod display;
pub mod file;
pub mod naming;
pub mod task;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use ghpic_sdk::{ContentsApi, CreateFileRequest, GitHubClient, GitHubError, RepoSlug};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;

use crate::constants::{messages, timeouts};

pub use display::DisplayRewrite;
pub use file::SelectedFile;
pub use naming::{NamingPolicy, file_extension};
pub use task::{ResultList, UploadOutcome, UploadTask, Uploaded};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{}", messages::MISSING_CREDENTIALS)]
    MissingCredentials,

    #[error("{0}")]
    InvalidRepository(String),

    #[error("{}", messages::NOT_AN_IMAGE)]
    NotAnImage,

    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", messages::MISSING_DOWNLOAD_URL)]
    MissingDownloadUrl,

    #[error("Upload failed: {0}")]
    Api(#[from] GitHubError),
}

impl UploadError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            UploadError::Api(err) => err.help_text(),
            _ => None,
        }
    }
}

pub struct Uploader<C> {
    api: C,
    repo: RepoSlug,
    naming: NamingPolicy,
    branch: Option<String>,
    display: DisplayRewrite,
}

impl<C: ContentsApi> Uploader<C> {
    pub fn new(api: C, repo: RepoSlug) -> Self {
        Self {
            api,
            repo,
            naming: NamingPolicy::default(),
            branch: None,
            display: DisplayRewrite::default(),
        }
    }

    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_display(mut self, display: DisplayRewrite) -> Self {
        self.display = display;
        self
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// Upload one file. Never returns early with an error: every failure
    /// lands in the returned task.
    pub async fn upload(&self, file: &SelectedFile) -> UploadTask {
        let mut task = UploadTask::new(&file.name, &file.mime_type);
        let result = self.try_upload(file, &mut task).await;
        match &result {
            Ok(uploaded) => log::debug!("uploaded {} -> {}", file.name, uploaded.download_url),
            Err(err) => {
                log::debug!("upload of {} failed: {}", file.name, err);
                if let Some(help) = err.help_text() {
                    log::info!("{}", help);
                }
            }
        }
        task.finish(result);
        task
    }

    /// Upload files one at a time in the given order, prepending each
    /// completed task to `results`
    pub async fn upload_all(&self, files: &[SelectedFile], results: &mut ResultList) {
        for file in files {
            results.push(self.upload(file).await);
        }
    }

    async fn try_upload(
        &self,
        file: &SelectedFile,
        task: &mut UploadTask,
    ) -> Result<Uploaded, UploadError> {
        if !file.is_image() {
            return Err(UploadError::NotAnImage);
        }

        let bytes = file.read().await?;
        task.size = bytes.len();
        let content = BASE64.encode(&bytes);

        let path = self.naming.remote_path(&file.name, Utc::now());
        task.remote_path = Some(path.clone());

        let request = CreateFileRequest {
            message: format!("Upload image {}", naming::leaf_name(&path)),
            content,
            branch: self.branch.clone(),
        };
        let response = self.api.create_file(&self.repo, &path, &request).await?;

        let download_url = response
            .download_url()
            .ok_or(UploadError::MissingDownloadUrl)?
            .to_string();
        let display_url = self.display.apply(&download_url);

        Ok(Uploaded {
            download_url,
            display_url,
        })
    }
}

/// Everything needed to run a batch, before credentials are checked
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub token: Option<SecretString>,
    pub repo: Option<String>,
    pub api_url: Option<String>,
    pub branch: Option<String>,
    pub naming: NamingPolicy,
    pub display_base: Option<String>,
    pub https_proxy: Option<String>,
    pub timeout: Duration,
    pub verbose: bool,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            token: None,
            repo: None,
            api_url: None,
            branch: None,
            naming: NamingPolicy::default(),
            display_base: None,
            https_proxy: None,
            timeout: Duration::from_secs(timeouts::DEFAULT_UPLOAD_TIMEOUT_SECS),
            verbose: false,
        }
    }
}

impl UploadSettings {
    /// Check credentials and build an uploader backed by the GitHub API
    pub fn connect(&self) -> Result<Uploader<GitHubClient>, UploadError> {
        let token = self
            .token
            .as_ref()
            .filter(|token| !token.expose_secret().trim().is_empty())
            .ok_or(UploadError::MissingCredentials)?;
        let repo = self
            .repo
            .as_deref()
            .filter(|repo| !repo.trim().is_empty())
            .ok_or(UploadError::MissingCredentials)?;
        let repo: RepoSlug = repo
            .parse()
            .map_err(|err: GitHubError| UploadError::InvalidRepository(err.to_string()))?;

        let proxy = self
            .https_proxy
            .as_deref()
            .map(GitHubClient::create_proxy)
            .transpose()?;

        let client = GitHubClient::builder()
            .auth_token(SecretString::new(
                token.expose_secret().trim().to_string().into_boxed_str(),
            ))
            .verbose(self.verbose)
            .timeout(self.timeout)
            .proxy(proxy)
            .base_url(self.api_url.clone())
            .build()?;

        Ok(Uploader::new(client, repo)
            .with_naming(self.naming)
            .with_branch(self.branch.clone())
            .with_display(DisplayRewrite::new(
                self.display_base.clone(),
                self.branch.clone(),
            )))
    }
}

/// Run a whole batch. Missing or malformed credentials produce a single
/// failure result and no file is touched.
pub async fn upload_batch(settings: &UploadSettings, files: &[SelectedFile]) -> ResultList {
    let mut results = ResultList::new();

    match settings.connect() {
        Ok(uploader) => {
            log::debug!("uploading {} file(s) to {}", files.len(), uploader.repo());
            uploader.upload_all(files, &mut results).await;
        }
        Err(err) => results.push(UploadTask::rejected(messages::ERROR_TITLE, err.to_string())),
    }

    results
}
