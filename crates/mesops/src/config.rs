//! CLI configuration.
//!
//! Loading order (later sources override earlier):
//! 1. Global config: `~/.config/mesops/config.json`
//! 2. Environment variable: `MESOPS_CONFIG_CONTENT`
//! 3. Project config: `./mesops.json`
//! 4. Command line flags

use std::path::{Path, PathBuf};
use std::time::Duration;

use mesops_client::{ClientBuilder, Encoding};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding inline JSON configuration.
pub const CONFIG_CONTENT_ENV: &str = "MESOPS_CONFIG_CONTENT";

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "mesops.json";

/// URL used when no source names one.
pub const DEFAULT_MASTER_URL: &str = "http://127.0.0.1:5050";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {source_name}: {message}")]
    InvalidJson { source_name: String, message: String },
}

/// Which side of the Operator API to talk to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Master,
    Agent,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Master => f.write_str("master"),
            Role::Agent => f.write_str("agent"),
        }
    }
}

/// Settings shared by every subcommand. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,

    /// Deadline for a whole command, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Per-attempt HTTP timeout, in seconds. `0` disables it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl CliConfig {
    /// Load configuration from all file and environment sources.
    ///
    /// Returns the merged config and the files it was read from.
    pub fn load(project_dir: Option<&Path>) -> Result<(Self, Vec<PathBuf>), ConfigError> {
        Self::load_from(
            Self::global_config_dir().as_deref(),
            std::env::var(CONFIG_CONTENT_ENV).ok(),
            project_dir,
        )
    }

    /// Same as [`CliConfig::load`] with every source passed in.
    pub fn load_from(
        global_dir: Option<&Path>,
        env_content: Option<String>,
        project_dir: Option<&Path>,
    ) -> Result<(Self, Vec<PathBuf>), ConfigError> {
        let mut config = CliConfig::default();
        let mut sources = Vec::new();

        if let Some(dir) = global_dir {
            let path = dir.join("config.json");
            if path.exists() {
                config = config.merge(Self::load_file(&path)?);
                sources.push(path);
            }
        }

        if let Some(content) = env_content.filter(|c| !c.trim().is_empty()) {
            config = config.merge(Self::parse(&content, "<env>")?);
        }

        if let Some(dir) = project_dir {
            let path = dir.join(PROJECT_CONFIG_FILE);
            if path.exists() {
                config = config.merge(Self::load_file(&path)?);
                sources.push(path);
            }
        }

        Ok((config, sources))
    }

    /// `~/.config/mesops` on Unix, the platform config directory elsewhere.
    pub fn global_config_dir() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(".config").join("mesops"));
            }
        }

        dirs::config_dir().map(|d| d.join("mesops"))
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::InvalidJson {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Fields set in `other` replace those in `self`.
    pub fn merge(self, other: CliConfig) -> CliConfig {
        CliConfig {
            url: other.url.or(self.url),
            role: other.role.or(self.role),
            max_retries: other.max_retries.or(self.max_retries),
            encoding: other.encoding.or(self.encoding),
            timeout: other.timeout.or(self.timeout),
            request_timeout: other.request_timeout.or(self.request_timeout),
            user_agent: other.user_agent.or(self.user_agent),
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_MASTER_URL)
    }

    pub fn role(&self) -> Role {
        self.role.unwrap_or_default()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.timeout.filter(|secs| *secs > 0).map(Duration::from_secs)
    }

    /// A client builder carrying every configured setting.
    pub fn client_builder(&self) -> ClientBuilder {
        let mut builder = ClientBuilder::new(self.url());
        if let Some(max_retries) = self.max_retries {
            builder = builder.max_retries(max_retries);
        }
        if let Some(encoding) = self.encoding {
            builder = builder.encoding(encoding);
        }
        if let Some(secs) = self.request_timeout {
            builder = builder.request_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse() {
        let config = CliConfig::parse(
            r#"{"url": "http://leader.mesos:5050", "role": "master", "encoding": "protobuf", "max_retries": 3}"#,
            "test",
        )
        .unwrap();
        assert_eq!(config.url.as_deref(), Some("http://leader.mesos:5050"));
        assert_eq!(config.role, Some(Role::Master));
        assert_eq!(config.encoding, Some(Encoding::Protobuf));
        assert_eq!(config.max_retries, Some(3));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let err = CliConfig::parse(r#"{"uri": "http://x"}"#, "mesops.json").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON in mesops.json"), "{err}");
    }

    #[test]
    fn test_merge_prefers_later() {
        let base = CliConfig {
            url: Some("http://a:5050".to_string()),
            max_retries: Some(1),
            ..Default::default()
        };
        let over = CliConfig {
            url: Some("http://b:5051".to_string()),
            role: Some(Role::Agent),
            ..Default::default()
        };

        let merged = base.merge(over);
        assert_eq!(merged.url.as_deref(), Some("http://b:5051"));
        assert_eq!(merged.role, Some(Role::Agent));
        assert_eq!(merged.max_retries, Some(1));
    }

    #[test]
    fn test_load_layers() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            global.path().join("config.json"),
            r#"{"url": "http://global:5050", "max_retries": 4, "timeout": 10}"#,
        )
        .unwrap();
        fs::write(
            project.path().join("mesops.json"),
            r#"{"url": "http://project:5051", "role": "agent"}"#,
        )
        .unwrap();

        let (config, sources) = CliConfig::load_from(
            Some(global.path()),
            Some(r#"{"max_retries": 7, "url": "http://env:5050"}"#.to_string()),
            Some(project.path()),
        )
        .unwrap();

        assert_eq!(config.url(), "http://project:5051");
        assert_eq!(config.role(), Role::Agent);
        assert_eq!(config.max_retries, Some(7));
        assert_eq!(config.deadline(), Some(Duration::from_secs(10)));
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn test_load_without_sources() {
        let empty = TempDir::new().unwrap();
        let (config, sources) =
            CliConfig::load_from(Some(empty.path()), None, Some(empty.path())).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(sources.is_empty());
        assert_eq!(config.url(), DEFAULT_MASTER_URL);
        assert_eq!(config.role(), Role::Master);
        assert_eq!(config.deadline(), None);
    }

    #[test]
    fn test_invalid_project_file() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("mesops.json"), "{not json").unwrap();
        assert!(matches!(
            CliConfig::load_from(None, None, Some(project.path())),
            Err(ConfigError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_client_builder() {
        let config = CliConfig {
            url: Some("http://agent:5051/".to_string()),
            max_retries: Some(2),
            encoding: Some(Encoding::Protobuf),
            request_timeout: Some(0),
            user_agent: Some("ops-bot/1.0".to_string()),
            ..Default::default()
        };

        let client = config.client_builder().config().unwrap();
        assert_eq!(client.url.as_str(), "http://agent:5051/api/v1");
        assert_eq!(client.max_retries, 2);
        assert_eq!(client.encoding, Encoding::Protobuf);
        assert_eq!(client.request_timeout, None);
        assert_eq!(client.user_agent, "ops-bot/1.0");
    }
}
