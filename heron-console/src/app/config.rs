//! Console configuration
//!
//! 配置优先级：环境变量 < 配置文件 < 命令行参数
//!
//! # 环境变量
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | HERON_API_URL | http://localhost:8080 | 核心 HR API 地址 |
//! | HERON_RECRUITMENT_URL | (同 HERON_API_URL) | 招聘服务地址 |
//! | HERON_SESSION_DIR | ~/.heron/session | 会话文件目录 |
//! | HERON_TIMEOUT_SECS | 30 | 请求超时(秒) |
//! | HERON_LOG_LEVEL | info | 日志级别 |
//! | HERON_LOG_DIR | (无) | 滚动日志目录 |

use std::path::{Path, PathBuf};

use heron_client::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::app::error::ConsoleError;
use crate::cli::Cli;

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Core HR API base URL
    pub api_url: String,
    /// Recruitment service base URL, falls back to `api_url` when unset
    pub recruitment_url: Option<String>,
    /// Directory holding the persisted session files
    pub session_dir: PathBuf,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Directory for daily-rolling log files
    pub log_dir: Option<String>,
}

/// Partial file form; absent fields keep their env defaults
#[derive(Debug, Default, Deserialize)]
struct AppConfigFile {
    api_url: Option<String>,
    recruitment_url: Option<String>,
    session_dir: Option<PathBuf>,
    timeout_secs: Option<u64>,
    log_level: Option<String>,
    log_dir: Option<String>,
}

impl AppConfig {
    /// Defaults from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("HERON_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            recruitment_url: std::env::var("HERON_RECRUITMENT_URL").ok(),
            session_dir: std::env::var("HERON_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_dir()),
            timeout_secs: std::env::var("HERON_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            log_level: std::env::var("HERON_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("HERON_LOG_DIR").ok(),
        }
    }

    /// Load from a JSON file over the env defaults
    ///
    /// A missing file is not an error; the defaults stand.
    pub fn load(path: &Path) -> Result<Self, ConsoleError> {
        let mut config = Self::from_env();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let file: AppConfigFile = serde_json::from_str(&content)
                .map_err(|e| ConsoleError::Config(format!("{}: {e}", path.display())))?;
            config.merge(file);
        }
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConsoleError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConsoleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn merge(&mut self, file: AppConfigFile) {
        if let Some(v) = file.api_url {
            self.api_url = v;
        }
        if let Some(v) = file.recruitment_url {
            self.recruitment_url = Some(v);
        }
        if let Some(v) = file.session_dir {
            self.session_dir = v;
        }
        if let Some(v) = file.timeout_secs {
            self.timeout_secs = v;
        }
        if let Some(v) = file.log_level {
            self.log_level = v;
        }
        if let Some(v) = file.log_dir {
            self.log_dir = Some(v);
        }
    }

    /// Apply command-line overrides
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.api_url {
            self.api_url = v.clone();
        }
        if let Some(v) = &cli.recruitment_url {
            self.recruitment_url = Some(v.clone());
        }
        if let Some(v) = &cli.session_dir {
            self.session_dir = v.clone();
        }
        if let Some(v) = &cli.log_level {
            self.log_level = v.clone();
        }
        if let Some(v) = &cli.log_dir {
            self.log_dir = Some(v.clone());
        }
    }

    /// Client configuration for this console
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_url.clone())
            .with_session_dir(&self.session_dir)
            .with_timeout(self.timeout_secs);
        if let Some(url) = &self.recruitment_url {
            config = config.with_recruitment_base_url(url.clone());
        }
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    heron_home().join("config.json")
}

fn default_session_dir() -> PathBuf {
    heron_home().join("session")
}

fn heron_home() -> PathBuf {
    std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".heron"))
        .unwrap_or_else(|_| PathBuf::from(".heron"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.api_url.is_empty());
    }

    #[test]
    fn test_file_overrides_subset_of_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api_url": "http://hr.internal:9000", "timeout_secs": 5}"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.api_url, "http://hr.internal:9000");
        assert_eq!(config.timeout_secs, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.log_level, AppConfig::from_env().log_level);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::from_env();
        config.api_url = "http://hr.example:8080".to_string();
        config.recruitment_url = Some("http://jobs.example:8081".to_string());
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn test_client_config_falls_back_to_core_url() {
        let mut config = AppConfig::from_env();
        config.api_url = "http://core:8080".to_string();
        config.recruitment_url = None;
        assert_eq!(config.client_config().recruitment_url(), "http://core:8080");
    }
}
