// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::api_client::DEFAULT_TIMEOUT_SECS;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_LOG_PATH: &str = "/tmp/jobsearch.log";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub log_path: PathBuf,
}

/// One environment section of config.yaml; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentSection {
    api_url: Option<String>,
    timeout_seconds: Option<u64>,
    log_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl AppConfig {
    /// Defaults, then config.yaml (if present), then environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let environment = Self::get_environment();

        let mut config = Self::default();

        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            config = config.with_file(&content, &environment)?;
        }

        config.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Selected config.yaml section: JOBSEARCH_ENV, ENVIRONMENT or ENV, else "local"
    pub fn get_environment() -> String {
        Self::environment_from(|key| std::env::var(key).ok())
    }

    fn environment_from<F>(lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        ["JOBSEARCH_ENV", "ENVIRONMENT", "ENV"]
            .into_iter()
            .find_map(|key| lookup(key))
            .unwrap_or_else(|| "local".to_string())
    }

    fn with_file(mut self, content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        if let Some(api_url) = section.api_url {
            self.api_url = api_url;
        }
        if let Some(timeout_seconds) = section.timeout_seconds {
            self.timeout_seconds = timeout_seconds;
        }
        if let Some(log_path) = section.log_path {
            self.log_path = log_path;
        }
        Ok(self)
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_url) = lookup("JOBSEARCH_API_URL") {
            self.api_url = api_url;
        }
        if let Some(timeout) = lookup("JOBSEARCH_TIMEOUT_SECS") {
            self.timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow::anyhow!("JOBSEARCH_TIMEOUT_SECS must be a number of seconds"))?;
        }
        if let Some(log_path) = lookup("JOBSEARCH_LOG_PATH") {
            self.log_path = PathBuf::from(log_path);
        }

        if self.timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be at least one second");
        }
        Ok(self)
    }
}
