//! Extension configuration

use pagechat_backend::DEFAULT_BACKEND_URL;
use pagechat_relay::ScrapeFailurePolicy;
use pagechat_widget::ReopenPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::CoreError;
use crate::Result;

const BACKEND_URL_ENV: &str = "PAGECHAT_BACKEND_URL";
const TIMEOUT_ENV: &str = "PAGECHAT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the scrape/chat service
    pub backend_url: String,
    /// Per-request timeout. Unset leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
    pub scrape_failure: ScrapeFailurePolicy,
    pub reopen: ReopenPolicy,
    /// Path to the database file
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: None,
            scrape_failure: ScrapeFailurePolicy::default(),
            reopen: ReopenPolicy::default(),
            database_path: data_dir.join("pagechat.db"),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("pagechat"))
            .unwrap_or_else(|| PathBuf::from(".pagechat"))
    }

    /// `<config dir>/pagechat/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pagechat").join("config.toml"))
    }

    /// Resolve the effective configuration: defaults, then the file, then
    /// environment overrides.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// used only when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.backend_url = url;
        }

        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| CoreError::Config(format!("{}: {}", TIMEOUT_ENV, e)))?;
            self.request_timeout_secs = Some(secs);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.backend_url)
            .map_err(|e| CoreError::Config(format!("backend_url: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CoreError::Config(format!(
                "backend_url must be http(s), got {}",
                url.scheme()
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(CoreError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
