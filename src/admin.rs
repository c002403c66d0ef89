//! Admin-only ZeroBug calls and form-field validation

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use tracing::{error, info, warn};

use crate::client::ZeroBugClient;
use crate::error::ConfigurationError;
use crate::secret::SecretToken;

type HmacSha256 = Hmac<Sha256>;

const ADMIN_CHALLENGE: &[u8] = b"zerobug-admin";

/// Entries always offered ahead of whatever ZeroBug returns.
pub const PLACEHOLDER_SITES: [&str; 4] = [
    "http://www.google.com",
    "http://www.globo.com",
    "http://www.jenkins.com",
    "http://www.java.com",
];

/// Proof that the caller presented the configured admin key.
#[derive(Debug)]
pub struct AdminCapability {
    _private: (),
}

impl AdminCapability {
    /// Returns `None` when no admin key is configured or `presented` does
    /// not match it.
    pub fn authorize(admin_key: Option<&SecretToken>, presented: &str) -> Option<Self> {
        let admin_key = admin_key.filter(|key| !key.is_blank())?;

        let expected = admin_tag(admin_key.reveal().as_bytes())?;
        let mut mac = HmacSha256::new_from_slice(presented.as_bytes()).ok()?;
        mac.update(ADMIN_CHALLENGE);

        // Constant-time comparison
        match mac.verify_slice(&expected) {
            Ok(()) => Some(Self { _private: () }),
            Err(_) => {
                warn!("Rejected admin request with a wrong key");
                None
            }
        }
    }
}

fn admin_tag(key: &[u8]) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(ADMIN_CHALLENGE);
    Some(mac.finalize().into_bytes().to_vec())
}

/// Outcome of a form check or connection test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormValidation {
    Ok { message: Option<String> },
    Error { message: String },
}

impl FormValidation {
    pub fn ok() -> Self {
        FormValidation::Ok { message: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        FormValidation::Error {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, FormValidation::Ok { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormValidation::Ok { message } => message.as_deref(),
            FormValidation::Error { message } => Some(message),
        }
    }
}

pub fn check_token(value: &str) -> FormValidation {
    if value.trim().is_empty() {
        FormValidation::error(ConfigurationError::MissingToken.to_string())
    } else {
        FormValidation::ok()
    }
}

pub fn check_website(value: &str) -> FormValidation {
    if value.trim().is_empty() {
        FormValidation::error(ConfigurationError::MissingWebsite.to_string())
    } else {
        FormValidation::ok()
    }
}

/// Sites offered in the website dropdown.
///
/// The list endpoint's body is appended as one opaque entry when it answers
/// 200; otherwise only the placeholders are returned.
pub async fn list_sites(client: &ZeroBugClient, _admin: &AdminCapability) -> Vec<String> {
    let mut sites: Vec<String> = PLACEHOLDER_SITES.iter().map(|s| s.to_string()).collect();

    match client.fetch_site_list().await {
        Ok(response) if !response.is_ok() => {
            warn!(status = response.status, "ZeroBug site list request failed");
        }
        Ok(response) if !response.body.trim().is_empty() => sites.push(response.body),
        Ok(response) => {
            info!(status = response.status, "ZeroBug site list was empty");
        }
        Err(e) => {
            error!("Could not fetch ZeroBug site list: {}", e);
        }
    }

    sites
}

/// Ok only for HTTP 200 from the list endpoint.
pub async fn validate_connection(
    client: &ZeroBugClient,
    _admin: &AdminCapability,
) -> FormValidation {
    match client.fetch_site_list().await {
        Ok(response) if response.is_ok() => FormValidation::Ok {
            message: Some("Success".to_string()),
        },
        Ok(response) => {
            warn!(status = response.status, "ZeroBug connection check failed");
            FormValidation::error(format!("Error code: {}", response.status))
        }
        Err(e) => {
            warn!("ZeroBug connection check failed: {}", e);
            FormValidation::error(format!("Client error: {}", e))
        }
    }
}
