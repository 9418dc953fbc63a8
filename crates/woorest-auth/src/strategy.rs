//! Per-request auth strategy selection.
//!
//! | Transport | `query_string_auth` | Strategy |
//! |-----------|---------------------|----------|
//! | HTTPS     | `true`              | `consumer_key`/`consumer_secret` query parameters |
//! | HTTPS     | `false`             | HTTP Basic credentials |
//! | HTTP      | ignored             | OAuth 1.0a signature |

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::{HeaderValue, Method};
use tracing::debug;
use woorest_core::{Config, Credentials, ParameterSet, UrlError};

use crate::oauth1::{OAuthSigner, SignatureMaterial};
use crate::url::build_url;

/// How a request authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// OAuth 1.0a signature in the query string (plain HTTP).
    OAuth1,
    /// Consumer key and secret as query parameters (HTTPS).
    QueryString,
    /// Consumer key and secret as HTTP Basic credentials (HTTPS).
    Basic,
}

impl AuthStrategy {
    /// Pick the strategy for a configuration.
    #[must_use]
    pub fn select(config: &Config) -> Self {
        match (config.is_secure(), config.query_string_auth()) {
            (false, _) => Self::OAuth1,
            (true, true) => Self::QueryString,
            (true, false) => Self::Basic,
        }
    }
}

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Basic credentials from the consumer key (username) and secret (password).
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            username: credentials.consumer_key().to_owned(),
            password: credentials.consumer_secret().to_owned(),
        }
    }

    /// The username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The `Authorization` header value, marked sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use woorest_auth::strategy::BasicAuth;
    /// use woorest_core::Credentials;
    ///
    /// let value = BasicAuth::from_credentials(&Credentials::new("ck", "cs")).header_value();
    /// assert_eq!(value, "Basic Y2s6Y3M=");
    /// assert!(value.is_sensitive());
    /// ```
    #[must_use]
    pub fn header_value(&self) -> HeaderValue {
        let token = BASE64.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))
            .expect("base64 output is a valid header value");
        value.set_sensitive(true);
        value
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Everything the auth layer contributes to a request.
#[derive(Debug, Clone)]
pub struct AuthMaterial {
    /// The strategy that produced this material.
    pub strategy: AuthStrategy,
    /// The request URL (canonicalized with caller parameters over HTTP).
    pub url: String,
    /// Query parameters to attach to the request.
    pub query_params: BTreeMap<String, String>,
    /// Basic credentials, for [`AuthStrategy::Basic`] only.
    pub basic_auth: Option<BasicAuth>,
}

/// Compute the URL and auth material for a request.
///
/// Over HTTP, the OAuth nonce and timestamp are generated fresh.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use woorest_auth::strategy::{AuthStrategy, authorize};
/// use woorest_core::{ClientOptions, Config, ParameterSet};
///
/// let config = Config::from_options(
///     ClientOptions::builder()
///         .url("https://example.com")
///         .consumer_key("ck")
///         .consumer_secret("cs")
///         .build(),
/// )
/// .unwrap();
///
/// let auth = authorize(&config, &Method::GET, "products", &ParameterSet::from([("per_page", 5)]))
///     .unwrap();
/// assert_eq!(auth.strategy, AuthStrategy::Basic);
/// assert_eq!(auth.url, "https://example.com/wp-json/v3/products");
/// assert_eq!(auth.query_params.get("per_page").map(String::as_str), Some("5"));
/// ```
pub fn authorize(
    config: &Config,
    method: &Method,
    endpoint: &str,
    params: &ParameterSet,
) -> Result<AuthMaterial, UrlError> {
    authorize_inner(config, method, endpoint, params, None)
}

/// Like [`authorize`], with a fixed OAuth nonce and timestamp.
///
/// Only affects plain-HTTP requests; the other strategies carry no
/// per-request material.
pub fn authorize_with_nonce(
    config: &Config,
    method: &Method,
    endpoint: &str,
    params: &ParameterSet,
    nonce: &str,
    timestamp: i64,
) -> Result<AuthMaterial, UrlError> {
    authorize_inner(config, method, endpoint, params, Some((nonce, timestamp)))
}

fn authorize_inner(
    config: &Config,
    method: &Method,
    endpoint: &str,
    params: &ParameterSet,
    fixed: Option<(&str, i64)>,
) -> Result<AuthMaterial, UrlError> {
    let url = build_url(config, endpoint, params)?;
    let strategy = AuthStrategy::select(config);
    let credentials = config.credentials();

    let (query_params, basic_auth) = match strategy {
        AuthStrategy::QueryString => {
            let mut query = BTreeMap::from([
                (
                    "consumer_key".to_owned(),
                    credentials.consumer_key().to_owned(),
                ),
                (
                    "consumer_secret".to_owned(),
                    credentials.consumer_secret().to_owned(),
                ),
            ]);
            query.extend(params.flatten());
            (query, None)
        }
        AuthStrategy::Basic => (
            params.flatten().into_iter().collect(),
            Some(BasicAuth::from_credentials(credentials)),
        ),
        AuthStrategy::OAuth1 => {
            let signer = OAuthSigner::new(credentials);
            let query = match fixed {
                Some((nonce, timestamp)) => signer.authorize_with(
                    method,
                    &url,
                    &SignatureMaterial::new(credentials, nonce, timestamp),
                ),
                None => signer.authorize(method, &url),
            };
            (query, None)
        }
    };

    debug!(
        strategy = ?strategy,
        method = %method,
        url = %url,
        "Selected auth strategy"
    );

    Ok(AuthMaterial {
        strategy,
        url,
        query_params,
        basic_auth,
    })
}
