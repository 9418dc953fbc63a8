//! HTTP transport abstraction.
//!
//! The engine only builds [`RequestDescriptor`]s; sending them is delegated to
//! a [`Transport`]. [`ReqwestTransport`] is the default implementation.

use async_trait::async_trait;
use tracing::{debug, warn};
use woorest_core::Config;

use crate::error::{Error, TransportError};
use crate::request::RequestDescriptor;

/// Sends assembled requests.
///
/// Implementations must return their response and errors unchanged; the
/// client performs no retries and no reinterpretation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// The response type handed back to callers.
    type Response: Send;

    /// Send one request.
    async fn send(&self, request: RequestDescriptor) -> Result<Self::Response, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport honoring the TLS settings of `config`.
    ///
    /// Certificate verification is disabled only for secure transport with
    /// `verify_ssl` explicitly set to `false`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let skip_verification = accept_invalid_certs(config);
        if skip_verification {
            warn!(
                base_url = %config.base_url(),
                "TLS certificate verification is disabled"
            );
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(skip_verification)
            .build()
            .map_err(|e| Error::Transport(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Whether certificate verification is skipped for `config`.
fn accept_invalid_certs(config: &Config) -> bool {
    config.is_secure() && !config.verify_ssl()
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Response = reqwest::Response;

    async fn send(&self, request: RequestDescriptor) -> Result<Self::Response, TransportError> {
        let url = request.full_url();
        debug!(method = %request.method, url = %request.url, "Dispatching request");

        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        debug!(status = %response.status(), "Received response");
        Ok(response)
    }
}
