// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Prints prefixed error, warning, info and success lines to stderr

use owo_colors::OwoColorize;
use std::io::IsTerminal;

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
        }
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.warning_line(message));
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", self.info_line(message));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.success_line(message));
    }

    fn error_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "error:".red().bold(), message)
        } else {
            format!("error: {}", message)
        }
    }

    fn warning_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "warning:".yellow().bold(), message)
        } else {
            format!("warning: {}", message)
        }
    }

    fn info_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "info:".blue().bold(), message)
        } else {
            format!("info: {}", message)
        }
    }

    fn success_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "success:".green().bold(), message)
        } else {
            format!("success: {}", message)
        }
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}
