//! Topic store backed by a plain text file, one topic per line.
//!
//! A missing file is created with [`DEFAULT_TOPICS`]. A file that exists but
//! holds no non-blank lines falls back to the defaults without being rewritten.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Topics used when the topics file is missing or empty
pub const DEFAULT_TOPICS: &[&str] = &[
    "programming",
    "science fiction",
    "history",
    "philosophy",
    "artificial intelligence",
    "economics",
    "poetry",
    "psychology",
];

/// Reads candidate search topics from a side file
#[derive(Debug, Clone)]
pub struct TopicStore {
    path: PathBuf,
}

impl TopicStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the topic list; the result is never empty.
    pub fn load_topics(&self) -> io::Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.write_defaults()?;
                tracing::info!("Created topics file {}", self.path.display());
                return Ok(default_topics());
            }
            Err(e) => return Err(e),
        };

        let topics: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if topics.is_empty() {
            tracing::debug!("Topics file {} is empty, using defaults", self.path.display());
            return Ok(default_topics());
        }

        Ok(topics)
    }

    fn write_defaults(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut content = DEFAULT_TOPICS.join("\n");
        content.push('\n');
        fs::write(&self.path, content)
    }
}

/// The default topic set as owned strings
pub fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}
