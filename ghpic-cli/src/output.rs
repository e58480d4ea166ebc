// ABOUTME: This module handles output formatting for upload results
// ABOUTME: It provides text, table, and JSON formatters with optional color support

use anyhow::Result;
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::uploader::{ResultList, UploadOutcome, UploadTask};

pub trait OutputFormat {
    fn format_results(&self, results: &ResultList) -> Result<String>;
}

/// One block per task: filename, URL or error, Markdown snippet
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn format_task(&self, task: &UploadTask) -> String {
        let mut lines = Vec::with_capacity(3);

        let (marker, filename) = match task.outcome {
            UploadOutcome::Success { .. } if self.use_color => {
                ("✓".green().to_string(), task.filename.bold().to_string())
            }
            UploadOutcome::Success { .. } => ("✓".to_string(), task.filename.clone()),
            _ if self.use_color => ("✗".red().to_string(), task.filename.bold().to_string()),
            _ => ("✗".to_string(), task.filename.clone()),
        };
        lines.push(format!("{} {}", marker, filename));

        match &task.outcome {
            UploadOutcome::Failure { message } if self.use_color => {
                lines.push(format!("  {}", message.red()));
            }
            _ => lines.push(format!("  {}", task.message())),
        }

        if let Some(markdown) = task.markdown() {
            if self.use_color {
                lines.push(format!("  {}", markdown.dimmed()));
            } else {
                lines.push(format!("  {}", markdown));
            }
        }

        lines.join("\n")
    }
}

impl OutputFormat for TextFormatter {
    fn format_results(&self, results: &ResultList) -> Result<String> {
        Ok(results
            .iter()
            .map(|task| self.format_task(task))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn format_status(&self, outcome: &UploadOutcome) -> String {
        let status = match outcome {
            UploadOutcome::Pending => "pending",
            UploadOutcome::Success { .. } => "uploaded",
            UploadOutcome::Failure { .. } => "failed",
        };

        if !self.use_color {
            return status.to_string();
        }
        match outcome {
            UploadOutcome::Pending => status.dimmed().to_string(),
            UploadOutcome::Success { .. } => status.green().to_string(),
            UploadOutcome::Failure { .. } => status.red().to_string(),
        }
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "URL / Error")]
    detail: String,
}

impl OutputFormat for TableFormatter {
    fn format_results(&self, results: &ResultList) -> Result<String> {
        let rows: Vec<TableRow> = results
            .iter()
            .map(|task| TableRow {
                file: task.filename.clone(),
                status: self.format_status(&task.outcome),
                detail: task.message().to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_results(&self, results: &ResultList) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(results)?)
        } else {
            Ok(serde_json::to_string(results)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploader::{UploadError, Uploaded};

    const DISPLAY: &str = "https://img.example.dev/images/2024/03/07/a.png";

    fn sample_results() -> ResultList {
        let mut results = ResultList::new();

        let mut ok = UploadTask::new("cat.png", "image/png");
        ok.size = 4;
        ok.remote_path = Some("images/2024/03/07/a.png".to_string());
        ok.finish(Ok(Uploaded {
            download_url: "https://raw.githubusercontent.com/octocat/pics/main/images/2024/03/07/a.png"
                .to_string(),
            display_url: DISPLAY.to_string(),
        }));
        results.push(ok);

        let mut failed = UploadTask::new("notes.txt", "text/plain");
        failed.finish(Err(UploadError::NotAnImage));
        results.push(failed);

        results
    }

    #[test]
    fn test_text_formatter_without_color() {
        let output = TextFormatter::new(false)
            .format_results(&sample_results())
            .unwrap();

        let expected = format!(
            "✗ notes.txt\n  Only image files can be uploaded\n✓ cat.png\n  {}\n  ![cat.png]({})",
            DISPLAY, DISPLAY
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_text_formatter_with_color_keeps_content() {
        let output = TextFormatter::new(true)
            .format_results(&sample_results())
            .unwrap();
        assert!(output.contains("notes.txt"));
        assert!(output.contains(&format!("![cat.png]({})", DISPLAY)));
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_table_formatter() {
        let output = TableFormatter::new(false)
            .format_results(&sample_results())
            .unwrap();

        assert!(output.contains("File"));
        assert!(output.contains("URL / Error"));
        assert!(output.contains("uploaded"));
        assert!(output.contains("failed"));
        assert!(output.contains(DISPLAY));

        // Most recent result first
        let failed = output.find("notes.txt").unwrap();
        let uploaded = output.find("cat.png").unwrap();
        assert!(failed < uploaded);
    }

    #[test]
    fn test_table_formatter_empty() {
        let output = TableFormatter::new(false)
            .format_results(&ResultList::new())
            .unwrap();
        assert!(output.contains("File"));
        assert!(output.contains("Status"));
    }

    #[test]
    fn test_json_formatter_compact() {
        let output = JsonFormatter::new(false)
            .format_results(&sample_results())
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let tasks = parsed.as_array().unwrap();
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0]["filename"], "notes.txt");
        assert_eq!(tasks[0]["status"], "failure");
        assert_eq!(tasks[0]["message"], "Only image files can be uploaded");

        assert_eq!(tasks[1]["filename"], "cat.png");
        assert_eq!(tasks[1]["status"], "success");
        assert_eq!(tasks[1]["display_url"], DISPLAY);
        assert_eq!(tasks[1]["size"], 4);
        assert_eq!(tasks[1]["remote_path"], "images/2024/03/07/a.png");
    }

    #[test]
    fn test_json_formatter_pretty_and_empty() {
        let output = JsonFormatter::new(true)
            .format_results(&sample_results())
            .unwrap();
        assert!(output.contains('\n'));

        let empty = JsonFormatter::new(false)
            .format_results(&ResultList::new())
            .unwrap();
        assert_eq!(empty, "[]");
    }
}
