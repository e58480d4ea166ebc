// ABOUTME: Remote path generation for uploaded images
// ABOUTME: Implements the dated and timestamped naming policies and extension parsing

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::paths;

/// How the leaf filename and directory of an upload are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// `images/YYYY/MM/DD/<YYYYMMDDTHHMMSS>-<random>.<ext>`
    #[default]
    Dated,
    /// `images/<epoch-ms>-<original filename>`
    Timestamped,
}

impl NamingPolicy {
    pub fn remote_path(&self, filename: &str, now: DateTime<Utc>) -> String {
        self.remote_path_with_rng(filename, now, &mut rand::thread_rng())
    }

    pub fn remote_path_with_rng<R: Rng + ?Sized>(
        &self,
        filename: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> String {
        match self {
            NamingPolicy::Dated => {
                let extension = file_extension(filename);
                let stem = format!(
                    "{}-{}",
                    now.format("%Y%m%dT%H%M%S"),
                    random_suffix(rng, paths::RANDOM_SUFFIX_LEN)
                );
                let leaf = if extension.is_empty() {
                    stem
                } else {
                    format!("{}.{}", stem, extension)
                };
                format!("{}{}/{}", paths::IMAGES_PREFIX, now.format("%Y/%m/%d"), leaf)
            }
            NamingPolicy::Timestamped => format!(
                "{}{}-{}",
                paths::IMAGES_PREFIX,
                now.timestamp_millis(),
                filename
            ),
        }
    }
}

/// Lowercased text after the last dot; empty when there is no dot or the
/// only dot starts the name (`.gitignore`)
pub fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Last segment of a slash-separated remote path
pub fn leaf_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..paths::RANDOM_ALPHABET.len());
            paths::RANDOM_ALPHABET[idx] as char
        })
        .collect()
}
