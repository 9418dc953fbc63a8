//! Request assembly.
//!
//! Merges the auth material with the standard headers and the JSON body, then
//! applies the configured [`TransportOverrides`] last so they win over every
//! computed field.

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use tracing::debug;
use woorest_auth::AuthMaterial;
use woorest_auth::canonical::build_canonical_query;
use woorest_core::{Config, ParameterSet, TransportOverrides};

use crate::error::Error;

/// `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("woorest/", env!("CARGO_PKG_VERSION"));

/// `Content-Type` sent with every request that carries a body.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// A fully authenticated, transport-agnostic request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Request URL; over plain HTTP this already carries the caller's
    /// canonicalized parameters.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Query parameters to append to `url`.
    pub query_params: BTreeMap<String, String>,
    /// JSON body bytes.
    pub body: Option<Bytes>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Expected response text encoding.
    ///
    /// The transport does not read it; callers decode the response body
    /// with it, e.g. `response.text_with_charset(&descriptor.encoding)`.
    pub encoding: String,
}

impl RequestDescriptor {
    /// The URL with `query_params` appended in canonical order.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use http::{HeaderMap, Method};
    /// use woorest_client::RequestDescriptor;
    ///
    /// let descriptor = RequestDescriptor {
    ///     method: Method::GET,
    ///     url: "http://a.test/p?per_page=5".to_owned(),
    ///     headers: HeaderMap::new(),
    ///     query_params: BTreeMap::from([("oauth_nonce".to_owned(), "n 1".to_owned())]),
    ///     body: None,
    ///     timeout: None,
    ///     encoding: "utf-8".to_owned(),
    /// };
    /// assert_eq!(descriptor.full_url(), "http://a.test/p?per_page=5&oauth_nonce=n%201");
    /// ```
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query_params.is_empty() {
            return self.url.clone();
        }
        let separator = match self.url.split_once('?') {
            None => "?",
            Some((_, "")) => "",
            Some(_) => "&",
        };
        format!(
            "{}{separator}{}",
            self.url,
            build_canonical_query(&self.query_params)
        )
    }

    fn apply_overrides(&mut self, overrides: &TransportOverrides) {
        if let Some(url) = &overrides.url {
            self.url.clone_from(url);
        }
        if let Some(method) = &overrides.method {
            self.method = method.clone();
        }
        for name in overrides.headers.keys() {
            self.headers.remove(name);
        }
        for (name, value) in &overrides.headers {
            self.headers.append(name, value.clone());
        }
        self.query_params.extend(
            overrides
                .query_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        if let Some(body) = &overrides.body {
            self.body = Some(body.clone());
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(encoding) = &overrides.encoding {
            self.encoding.clone_from(encoding);
        }
    }
}

/// Build the descriptor for one API call.
pub fn assemble<B>(
    config: &Config,
    method: Method,
    endpoint: &str,
    body: Option<&B>,
    params: &ParameterSet,
) -> Result<RequestDescriptor, Error>
where
    B: Serialize + ?Sized,
{
    let auth = woorest_auth::authorize(config, &method, endpoint, params)?;
    finish(config, method, auth, body)
}

/// Like [`assemble`], with a fixed OAuth nonce and timestamp.
pub fn assemble_with_nonce<B>(
    config: &Config,
    method: Method,
    endpoint: &str,
    body: Option<&B>,
    params: &ParameterSet,
    nonce: &str,
    timestamp: i64,
) -> Result<RequestDescriptor, Error>
where
    B: Serialize + ?Sized,
{
    let auth =
        woorest_auth::authorize_with_nonce(config, &method, endpoint, params, nonce, timestamp)?;
    finish(config, method, auth, body)
}

fn finish<B>(
    config: &Config,
    method: Method,
    auth: AuthMaterial,
    body: Option<&B>,
) -> Result<RequestDescriptor, Error>
where
    B: Serialize + ?Sized,
{
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    if let Some(basic) = &auth.basic_auth {
        headers.insert(AUTHORIZATION, basic.header_value());
    }

    let body = match body {
        Some(body) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            Some(Bytes::from(serde_json::to_vec(body)?))
        }
        None => None,
    };

    let mut descriptor = RequestDescriptor {
        method,
        url: auth.url,
        headers,
        query_params: auth.query_params,
        body,
        timeout: config.timeout(),
        encoding: config.encoding().to_owned(),
    };
    descriptor.apply_overrides(config.transport_overrides());

    debug!(
        method = %descriptor.method,
        url = %descriptor.url,
        strategy = ?auth.strategy,
        has_body = descriptor.body.is_some(),
        "Assembled request"
    );

    Ok(descriptor)
}
