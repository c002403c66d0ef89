use std::fmt;
use std::io;

/// A required notifier input is missing. Fails the enclosing build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Please set a ZeroBug token")]
    MissingToken,

    #[error("Please set a website")]
    MissingWebsite,
}

/// Every configuration check that failed, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationErrors(Vec<ConfigurationError>);

impl ConfigurationErrors {
    /// Returns `None` when no check failed.
    pub fn from_checks(errors: Vec<ConfigurationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn errors(&self) -> &[ConfigurationError] {
        &self.0
    }

    pub fn contains(&self, error: ConfigurationError) -> bool {
        self.0.contains(&error)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ConfigurationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ConfigurationErrors {}

/// Outbound call to the ZeroBug service failed. Logged, never fatal.
#[derive(Debug, thiserror::Error)]
#[error("GET {url} failed: {source}")]
pub struct TransportError {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

/// Custom error type for zerobug_notifier operations
#[derive(Debug, thiserror::Error)]
pub enum ZeroBugError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Notifier misconfigured: {0}")]
    Configuration(#[from] ConfigurationErrors),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Helper type for Results that use ZeroBugError
pub type Result<T> = std::result::Result<T, ZeroBugError>;
