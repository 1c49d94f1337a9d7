//! Configuration management.
//!
//! Settings come from an optional TOML file layered under environment
//! variables prefixed with `BOOK_HARVEST`, using `__` between section and key:
//!
//! ```toml
//! [api]
//! base_url = "https://openlibrary.org/search.json"
//! timeout_secs = 15
//! fields = "title,author_name,first_publish_year"
//!
//! [harvest]
//! target_count = 50
//!
//! [paths]
//! topics_file = "topics.txt"
//! output_file = "output/books_filtered.csv"
//! ```
//!
//! `BOOK_HARVEST_HARVEST__TARGET_COUNT=20` overrides `harvest.target_count`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sources::{DEFAULT_FIELDS, OPENLIBRARY_SEARCH_URL};
use crate::utils::DEFAULT_TIMEOUT;

/// File name searched for in the working directory
pub const CONFIG_FILE_NAME: &str = "book-harvest.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BOOK_HARVEST";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote search API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Fetch settings
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// Input and output files
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Remote search API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Search endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Field hint sent with each request; empty disables it
    #[serde(default = "default_fields")]
    pub fields: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            fields: default_fields(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The field hint, if one is set and not blank
    pub fn field_hint(&self) -> Option<&str> {
        self.fields.as_deref().filter(|f| !f.trim().is_empty())
    }
}

fn default_base_url() -> String {
    OPENLIBRARY_SEARCH_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_fields() -> Option<String> {
    Some(DEFAULT_FIELDS.to_string())
}

/// Fetch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Maximum number of records to collect
    #[serde(default = "default_target_count")]
    pub target_count: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            target_count: default_target_count(),
        }
    }
}

fn default_target_count() -> usize {
    50
}

/// Input and output files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Topics file, one topic per line
    #[serde(default = "default_topics_file")]
    pub topics_file: PathBuf,

    /// CSV output file
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            topics_file: default_topics_file(),
            output_file: default_output_file(),
        }
    }
}

fn default_topics_file() -> PathBuf {
    PathBuf::from("topics.txt")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("output").join("books_filtered.csv")
}

/// Load configuration from an optional file plus environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn remove_prefixed_vars() {
        let prefix = format!("{}_", ENV_PREFIX);
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with(&prefix) {
                std::env::remove_var(&key);
            }
        }
    }

    /// Serialize environment access and start from a clean `BOOK_HARVEST_*` set
    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        remove_prefixed_vars();
        guard
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, OPENLIBRARY_SEARCH_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(15));
        assert_eq!(config.api.field_hint(), Some(DEFAULT_FIELDS));
        assert_eq!(config.harvest.target_count, 50);
        assert_eq!(config.paths.topics_file, PathBuf::from("topics.txt"));
        assert_eq!(
            config.paths.output_file,
            PathBuf::from("output/books_filtered.csv")
        );
    }

    #[test]
    fn test_load_config_file() {
        let _env = clean_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("book-harvest.toml");
        fs::write(
            &path,
            r#"
[api]
fields = ""

[harvest]
target_count = 10

[paths]
output_file = "/tmp/books.csv"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.api.field_hint(), None);
        assert_eq!(config.harvest.target_count, 10);
        assert_eq!(config.paths.topics_file, PathBuf::from("topics.txt"));
        assert_eq!(config.paths.output_file, PathBuf::from("/tmp/books.csv"));
    }

    #[test]
    fn test_env_overrides_file() {
        let _env = clean_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("book-harvest.toml");
        fs::write(
            &path,
            r#"
[api]
timeout_secs = 30

[harvest]
target_count = 10
"#,
        )
        .unwrap();

        std::env::set_var("BOOK_HARVEST_HARVEST__TARGET_COUNT", "7");
        std::env::set_var("BOOK_HARVEST_API__TIMEOUT_SECS", "3");
        std::env::set_var("BOOK_HARVEST_PATHS__TOPICS_FILE", "/data/topics.txt");
        let loaded = load_config(Some(&path));
        remove_prefixed_vars();

        let config = loaded.unwrap();
        assert_eq!(config.harvest.target_count, 7);
        assert_eq!(config.api.timeout(), Duration::from_secs(3));
        assert_eq!(config.paths.topics_file, PathBuf::from("/data/topics.txt"));
        assert_eq!(config.api.base_url, OPENLIBRARY_SEARCH_URL);
    }

    #[test]
    fn test_env_overrides_without_file() {
        let _env = clean_env();
        std::env::set_var("BOOK_HARVEST_HARVEST__TARGET_COUNT", "12");
        let loaded = load_config(None);
        remove_prefixed_vars();

        let config = loaded.unwrap();
        assert_eq!(config.harvest.target_count, 12);
        assert_eq!(config.api.timeout_secs, 15);
    }

    #[test]
    fn test_load_config_missing_file() {
        let path = PathBuf::from("/nonexistent/book-harvest.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }
}
