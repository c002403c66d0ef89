pub mod admin;
pub mod api;
pub mod build;
pub mod client;
pub mod clock;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod notifier;
pub mod secret;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::build::BuildStore;
use crate::client::ZeroBugClient;
use crate::clock::DatePolicy;
use crate::error::{Result, ZeroBugError};
use crate::notifier::Notifier;
use crate::secret::SecretToken;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_LOG_FILES: usize = 5;

#[derive(Debug, Deserialize, Clone)]
pub struct ZeroBugConfig {
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    pub log: Option<LogConfig>,
}

/// ZeroBug service URLs.
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    /// Called once per notified build.
    pub request_url: String,
    /// Answers with the site list; also used to validate connectivity.
    pub list_sites_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CredentialsConfig {
    pub default_token: Option<SecretToken>,
    pub admin_key: Option<SecretToken>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifyConfig {
    #[serde(default = "default_only_on_success")]
    pub only_on_success: bool,
    #[serde(default)]
    pub date_policy: DatePolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub directory: PathBuf,
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            only_on_success: default_only_on_success(),
            date_policy: DatePolicy::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_only_on_success() -> bool {
    true
}

fn default_max_log_files() -> usize {
    DEFAULT_MAX_LOG_FILES
}

impl ZeroBugConfig {
    /// Parses a TOML document and checks the endpoint URLs.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ZeroBugConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (key, url) in [
            ("endpoints.request_url", &self.endpoints.request_url),
            ("endpoints.list_sites_url", &self.endpoints.list_sites_url),
        ] {
            reqwest::Url::parse(url).map_err(|e| {
                ZeroBugError::ConfigError(format!("Invalid {} '{}': {}", key, url, e))
            })?;
        }
        if self.endpoints.timeout_secs == 0 {
            return Err(ZeroBugError::ConfigError(
                "endpoints.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load and parse the configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<ZeroBugConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        ZeroBugError::ConfigError(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    ZeroBugConfig::from_toml(&content).map_err(|e| match e {
        ZeroBugError::TomlParseError(e) => ZeroBugError::ConfigError(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        )),
        other => other,
    })
}

pub struct AppState {
    pub config: ZeroBugConfig,
    pub client: ZeroBugClient,
    pub notifier: Notifier,
    pub build_store: Mutex<BuildStore>,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: ZeroBugConfig, max_builds: usize) -> Result<Self> {
        let client = ZeroBugClient::new(&config.endpoints)?;
        let notifier = Notifier::new(client.clone(), config.notify.date_policy);

        Ok(Self {
            config,
            client,
            notifier,
            build_store: Mutex::new(BuildStore::new(max_builds)),
            start_time: Instant::now(),
            started_at: Utc::now(),
        })
    }
}

pub type SharedState = Arc<AppState>;
