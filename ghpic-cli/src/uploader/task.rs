// ABOUTME: Per-file upload task state and the reverse-chronological result list
// ABOUTME: Each task resolves once into success (URLs) or failure (message)

use serde::Serialize;
use std::collections::VecDeque;

use super::UploadError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadOutcome {
    Pending,
    Success {
        download_url: String,
        display_url: String,
    },
    Failure {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadTask {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_path: Option<String>,
    #[serde(flatten)]
    pub outcome: UploadOutcome,
}

/// URLs of a finished upload
#[derive(Debug, Clone, PartialEq)]
pub struct Uploaded {
    pub download_url: String,
    pub display_url: String,
}

impl UploadTask {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: Some(mime_type.into()),
            size: 0,
            remote_path: None,
            outcome: UploadOutcome::Pending,
        }
    }

    /// A task that failed before any file was looked at
    pub fn rejected(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filename: title.into(),
            mime_type: None,
            size: 0,
            remote_path: None,
            outcome: UploadOutcome::Failure {
                message: message.into(),
            },
        }
    }

    pub fn finish(&mut self, result: Result<Uploaded, UploadError>) {
        debug_assert!(self.is_pending(), "upload task resolved twice");
        self.outcome = match result {
            Ok(uploaded) => UploadOutcome::Success {
                download_url: uploaded.download_url,
                display_url: uploaded.display_url,
            },
            Err(err) => UploadOutcome::Failure {
                message: err.to_string(),
            },
        };
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.outcome, UploadOutcome::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, UploadOutcome::Success { .. })
    }

    /// Display URL on success, error text on failure
    pub fn message(&self) -> &str {
        match &self.outcome {
            UploadOutcome::Pending => "",
            UploadOutcome::Success { display_url, .. } => display_url,
            UploadOutcome::Failure { message } => message,
        }
    }

    pub fn markdown(&self) -> Option<String> {
        match &self.outcome {
            UploadOutcome::Success { display_url, .. } => {
                Some(format!("![{}]({})", self.filename, display_url))
            }
            _ => None,
        }
    }
}

/// Completed tasks, most recently completed first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResultList {
    tasks: VecDeque<UploadTask>,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: UploadTask) {
        self.tasks.push_front(task);
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }
}
