//! Thin HTTP client for the ZeroBug service
//!
//! Every outbound call is a single GET with no body and no retry. The
//! response body is read to completion so the connection goes back to the
//! pool on every path.

use std::time::Duration;
use tracing::{debug, warn};

use crate::EndpointConfig;
use crate::error::{Result, TransportError};

type TransportResult<T> = std::result::Result<T, TransportError>;

/// Status and body of a ZeroBug response.
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
}

impl ServiceResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone)]
pub struct ZeroBugClient {
    http: reqwest::Client,
    request_url: String,
    list_sites_url: String,
}

impl ZeroBugClient {
    pub fn new(endpoints: &EndpointConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoints.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            request_url: endpoints.request_url.clone(),
            list_sites_url: endpoints.list_sites_url.clone(),
        })
    }

    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    pub fn list_sites_url(&self) -> &str {
        &self.list_sites_url
    }

    /// `GET {request_url}`
    pub async fn request_notification(&self) -> TransportResult<ServiceResponse> {
        self.get(&self.request_url).await
    }

    /// `GET {list_sites_url}`
    pub async fn fetch_site_list(&self) -> TransportResult<ServiceResponse> {
        self.get(&self.list_sites_url).await
    }

    async fn get(&self, url: &str) -> TransportResult<ServiceResponse> {
        let to_transport = |source: reqwest::Error| TransportError {
            url: url.to_string(),
            source,
        };

        debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(to_transport)?;
        let status = response.status().as_u16();
        // A status was received; a broken body does not turn it into a failure
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status, "Failed to read ZeroBug response body from {}: {}", url, e);
                String::new()
            }
        };
        debug!(status, bytes = body.len(), "ZeroBug responded");

        Ok(ServiceResponse { status, body })
    }
}
