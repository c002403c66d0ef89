//! Decide-and-notify at build completion
//!
//! A notification is a single best-effort GET against the configured
//! request endpoint. Missing inputs fail the build; a failing ZeroBug
//! service never does.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::build::{BuildRecord, BuildResult, ZeroBugAction};
use crate::client::ZeroBugClient;
use crate::clock::{Clock, DatePolicy, SystemClock};
use crate::error::{ConfigurationError, ConfigurationErrors};
use crate::identifier::BuildIdentifier;
use crate::secret::SecretToken;

/// Inputs of one notification, validated on construction
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    token: SecretToken,
    site: String,
    build_result: BuildResult,
    only_on_success: bool,
    date: NaiveDate,
}

impl NotificationRequest {
    /// Runs both checks and reports every one that fails.
    pub fn new(
        token: &SecretToken,
        site: &str,
        build_result: BuildResult,
        only_on_success: bool,
        date: NaiveDate,
    ) -> Result<Self, ConfigurationErrors> {
        let mut errors = Vec::new();
        if token.is_blank() {
            errors.push(ConfigurationError::MissingToken);
        }
        if site.trim().is_empty() {
            errors.push(ConfigurationError::MissingWebsite);
        }
        if let Some(errors) = ConfigurationErrors::from_checks(errors) {
            return Err(errors);
        }

        Ok(Self {
            token: token.clone(),
            site: site.to_string(),
            build_result,
            only_on_success,
            date,
        })
    }

    /// Successful builds always notify; others only when not restricted.
    pub fn should_dispatch(&self) -> bool {
        self.build_result.is_success() || !self.only_on_success
    }

    pub fn identifier(&self) -> BuildIdentifier {
        BuildIdentifier::derive(&self.token, &self.site, self.date)
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResult {
    pub attempted: bool,
    /// ZeroBug answered with a 2xx status.
    pub succeeded: bool,
    pub status: Option<u16>,
    pub identifier: BuildIdentifier,
    pub log_lines: Vec<String>,
}

#[derive(Clone)]
pub struct Notifier {
    client: ZeroBugClient,
    clock: Arc<dyn Clock>,
}

impl Notifier {
    pub fn new(client: ZeroBugClient, date_policy: DatePolicy) -> Self {
        Self::with_clock(client, Arc::new(SystemClock::new(date_policy)))
    }

    pub fn with_clock(client: ZeroBugClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    /// Validate, gate, and (maybe) call ZeroBug for one finished build.
    pub async fn notify(
        &self,
        token: &SecretToken,
        site: &str,
        build_result: BuildResult,
        only_on_success: bool,
    ) -> Result<NotificationResult, ConfigurationErrors> {
        let request = NotificationRequest::new(
            token,
            site,
            build_result,
            only_on_success,
            self.clock.today(),
        )?;
        Ok(self.dispatch(&request).await)
    }

    /// Issue the GET for an already validated request.
    ///
    /// Transport failures end up in the result, never in an error.
    pub async fn dispatch(&self, request: &NotificationRequest) -> NotificationResult {
        let identifier = request.identifier();
        let mut log_lines = vec![format!("ZeroBug build identifier: {}", identifier)];

        if !request.should_dispatch() {
            info!(
                site = %request.site,
                result = ?request.build_result,
                "Build did not succeed; skipping ZeroBug notification"
            );
            log_lines.push(format!(
                "Skipping ZeroBug notification: build result is {:?}",
                request.build_result
            ));
            return NotificationResult {
                attempted: false,
                succeeded: false,
                status: None,
                identifier,
                log_lines,
            };
        }

        match self.client.request_notification().await {
            Ok(response) => {
                let succeeded = (200..300).contains(&response.status);
                info!(
                    site = %request.site,
                    identifier = %identifier,
                    status = response.status,
                    "ZeroBug notified"
                );
                log_lines.push(format!(
                    "GET {} returned {}",
                    self.client.request_url(),
                    response.status
                ));
                if !response.body.is_empty() {
                    log_lines.push(response.body);
                }
                NotificationResult {
                    attempted: true,
                    succeeded,
                    status: Some(response.status),
                    identifier,
                    log_lines,
                }
            }
            Err(e) => {
                warn!(
                    site = %request.site,
                    identifier = %identifier,
                    error = %e,
                    "ZeroBug notification failed"
                );
                log_lines.push(format!("ZeroBug notification failed: {}", e));
                NotificationResult {
                    attempted: true,
                    succeeded: false,
                    status: None,
                    identifier,
                    log_lines,
                }
            }
        }
    }

    /// Notify for `build` and record the outcome on it.
    ///
    /// Configuration errors mark the build failed and are returned. An
    /// attempted notification attaches a [`ZeroBugAction`]; a skipped one
    /// attaches nothing.
    pub async fn notify_build(
        &self,
        build: &mut BuildRecord,
        token: Option<SecretToken>,
        site: &str,
        only_on_success: bool,
    ) -> Result<NotificationResult, ConfigurationErrors> {
        let token = token.unwrap_or_default();

        let result = match self.notify(&token, site, build.result, only_on_success).await {
            Ok(result) => result,
            Err(errors) => {
                warn!(build = %build.build_url, "{}", errors);
                build.mark_failed(&errors);
                return Err(errors);
            }
        };

        build.log.extend(result.log_lines.iter().cloned());
        if result.attempted {
            build.attach(ZeroBugAction {
                token,
                website: site.to_string(),
                identifier: result.identifier.clone(),
                build_url: build.build_url.clone(),
                notification: result.clone(),
            });
        }

        Ok(result)
    }
}
