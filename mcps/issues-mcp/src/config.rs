//! Configuration loading for issues-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variables (`JIRA_URL`, `JIRA_USERNAME`, `JIRA_TOKEN`,
//!    `JIRA_PROJECT`, `GITHUB_REPO`, `GITHUB_TOKEN`)
//! 2. Environment variable ISSUES_CONFIG_PATH
//! 3. ~/.binks/issues.toml
//! 4. Default values
//!
//! The `issues-query` CLI can additionally read a JSON payload file with the
//! same structure.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

/// Jira connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Server URL, e.g. `https://issues.apache.org/jira`
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    /// API token or password
    #[serde(default)]
    pub token: Option<String>,

    /// Project key used to recognise ticket ids in queries (e.g. `HIVE`)
    #[serde(default)]
    pub project: Option<String>,
}

/// GitHub settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Repository slug in OWNER/REPO format
    #[serde(default)]
    pub repo: Option<String>,

    /// Token passed to `gh` as GH_TOKEN; the gh login is used when absent
    #[serde(default)]
    pub token: Option<String>,
}

/// Query tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum results per backend search
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Number of ranked keywords used for text searches
    #[serde(default = "default_keywords")]
    pub keywords: usize,

    /// HTTP timeout for Jira requests
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_max_results() -> u32 {
    10
}

fn default_keywords() -> usize {
    5
}

fn default_timeout() -> u64 {
    30
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            keywords: default_keywords(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_toml_file(&path)?
            }
            Some(_) => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Read a JSON payload file (`{"jira": {...}, "github": {...}}`)
    pub fn from_payload(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Override fields from environment-style lookups; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("JIRA_URL") {
            self.jira.url = Some(v);
        }
        if let Some(v) = get("JIRA_USERNAME") {
            self.jira.username = Some(v);
        }
        if let Some(v) = get("JIRA_TOKEN") {
            self.jira.token = Some(v);
        }
        if let Some(v) = get("JIRA_PROJECT") {
            self.jira.project = Some(v);
        }
        if let Some(v) = get("GITHUB_REPO") {
            self.github.repo = Some(v);
        }
        if let Some(v) = get("GITHUB_TOKEN") {
            self.github.token = Some(v);
        }
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ISSUES_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".binks").join("issues.toml"));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.query.max_results, 10);
        assert_eq!(config.query.keywords, 5);
        assert!(config.jira.url.is_none());
        assert!(config.github.repo.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [jira]
            url = "https://issues.apache.org/jira"
            project = "HIVE"

            [query]
            max_results = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.jira.project.as_deref(), Some("HIVE"));
        assert_eq!(config.query.max_results, 3);
        assert_eq!(config.query.timeout_seconds, 30);
    }

    #[test]
    fn test_env_overrides_and_ignores_empty() {
        let env: HashMap<&str, &str> = [
            ("GITHUB_REPO", "apache/hive"),
            ("JIRA_TOKEN", "secret"),
            ("JIRA_URL", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.jira.url = Some("https://jira.example.com".into());
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.github.repo.as_deref(), Some("apache/hive"));
        assert_eq!(config.jira.token.as_deref(), Some("secret"));
        assert_eq!(config.jira.url.as_deref(), Some("https://jira.example.com"));
    }

    #[test]
    fn test_from_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"jira": {{"url": "https://issues.apache.org/jira", "username": "bot"}},
                "github": {{"repo": "apache/hive"}}}}"#
        )
        .unwrap();

        let config = Config::from_payload(file.path()).unwrap();
        assert_eq!(config.jira.username.as_deref(), Some("bot"));
        assert_eq!(config.github.repo.as_deref(), Some("apache/hive"));
        assert_eq!(config.query.max_results, 10);
    }

    #[test]
    fn test_missing_payload_is_read_error() {
        let err = Config::from_payload(Path::new("/nonexistent/payload.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
