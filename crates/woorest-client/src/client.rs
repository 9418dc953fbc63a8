//! The API client and its verb operations.

use http::Method;
use serde::Serialize;
use woorest_core::{ClientOptions, Config, ParameterSet};

use crate::error::Error;
use crate::request::{RequestDescriptor, assemble};
use crate::transport::{ReqwestTransport, Transport};

/// Client for a `wp-json` REST API.
///
/// Holds only the immutable [`Config`] and a transport; every request is
/// built independently, so a client can be shared across tasks freely.
#[derive(Debug, Clone)]
pub struct WooClient<T = ReqwestTransport> {
    config: Config,
    transport: T,
}

impl WooClient<ReqwestTransport> {
    /// Create a client that sends requests with `reqwest`.
    ///
    /// # Examples
    ///
    /// ```
    /// use woorest_client::WooClient;
    /// use woorest_core::ClientOptions;
    ///
    /// let client = WooClient::new(
    ///     ClientOptions::builder()
    ///         .url("https://shop.test")
    ///         .consumer_key("ck_xxx")
    ///         .consumer_secret("cs_xxx")
    ///         .build(),
    /// )
    /// .unwrap();
    /// assert!(client.config().is_secure());
    /// ```
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        let config = Config::from_options(options)?;
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> WooClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(options: ClientOptions, transport: T) -> Result<Self, Error> {
        let config = Config::from_options(options)?;
        Ok(Self { config, transport })
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The transport requests are sent through.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for an API call without sending it.
    pub fn build_request<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        params: &ParameterSet,
    ) -> Result<RequestDescriptor, Error>
    where
        B: Serialize + ?Sized,
    {
        assemble(&self.config, method, endpoint, body, params)
    }

    /// `GET endpoint`.
    pub async fn get(&self, endpoint: &str, params: &ParameterSet) -> Result<T::Response, Error> {
        self.request::<()>(Method::GET, endpoint, None, params)
            .await
    }

    /// `POST endpoint` with a JSON body.
    pub async fn post<B>(
        &self,
        endpoint: &str,
        body: &B,
        params: &ParameterSet,
    ) -> Result<T::Response, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::POST, endpoint, Some(body), params)
            .await
    }

    /// `PUT endpoint` with a JSON body.
    pub async fn put<B>(
        &self,
        endpoint: &str,
        body: &B,
        params: &ParameterSet,
    ) -> Result<T::Response, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::PUT, endpoint, Some(body), params)
            .await
    }

    /// `DELETE endpoint`.
    pub async fn delete(
        &self,
        endpoint: &str,
        params: &ParameterSet,
    ) -> Result<T::Response, Error> {
        self.request::<()>(Method::DELETE, endpoint, None, params)
            .await
    }

    /// `OPTIONS endpoint`.
    pub async fn options(
        &self,
        endpoint: &str,
        params: &ParameterSet,
    ) -> Result<T::Response, Error> {
        self.request::<()>(Method::OPTIONS, endpoint, None, params)
            .await
    }

    /// Build and send a request with an arbitrary method.
    ///
    /// Engine errors are raised before the transport is touched; transport
    /// errors are returned as [`Error::Transport`] with the source unchanged.
    pub async fn request<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        params: &ParameterSet,
    ) -> Result<T::Response, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self.build_request(method, endpoint, body, params)?;
        self.transport
            .send(request)
            .await
            .map_err(Error::Transport)
    }
}
