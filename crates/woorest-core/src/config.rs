//! Client configuration.
//!
//! A [`ClientOptions`] bag is what callers hand in; [`Config`] is the validated,
//! immutable form the engine reads for the lifetime of a client.

use std::time::Duration;

use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::credentials::Credentials;
use crate::error::ConfigError;
use crate::overrides::TransportOverrides;

/// Default REST API prefix.
pub const DEFAULT_API_PREFIX: &str = "wp-json";

/// Default API version segment.
pub const DEFAULT_VERSION: &str = "v3";

/// Default response text encoding.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// The options bag accepted when constructing a client.
///
/// Every field is optional here; [`Config::from_options`] enforces the
/// required ones. Deserializes from a camelCase JSON object, `timeout` given
/// in milliseconds.
///
/// # Examples
///
/// ```
/// use woorest_core::ClientOptions;
///
/// let options: ClientOptions = serde_json::from_str(
///     r#"{"url":"https://shop.test","consumerKey":"ck","consumerSecret":"cs","wpAPIPrefix":"api"}"#,
/// )
/// .unwrap();
/// assert_eq!(options.wp_api_prefix.as_deref(), Some("api"));
///
/// let built = ClientOptions::builder()
///     .url("https://shop.test")
///     .consumer_key("ck")
///     .consumer_secret("cs")
///     .build();
/// assert_eq!(built.url.as_deref(), Some("https://shop.test"));
/// ```
#[derive(Clone, Default, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    /// Base URL of the store (required).
    #[builder(default, setter(into, strip_option))]
    pub url: Option<String>,

    /// Consumer key (required).
    #[builder(default, setter(into, strip_option))]
    pub consumer_key: Option<String>,

    /// Consumer secret (required).
    #[builder(default, setter(into, strip_option))]
    pub consumer_secret: Option<String>,

    /// REST API prefix, `"wp-json"` when unset.
    #[serde(rename = "wpAPIPrefix")]
    #[builder(default, setter(into, strip_option))]
    pub wp_api_prefix: Option<String>,

    /// API version segment, `"v3"` when unset.
    #[builder(default, setter(into, strip_option))]
    pub version: Option<String>,

    /// Whether to verify TLS certificates, `true` when unset.
    #[builder(default, setter(strip_option))]
    pub verify_ssl: Option<bool>,

    /// Response text encoding, `"utf-8"` when unset.
    #[builder(default, setter(into, strip_option))]
    pub encoding: Option<String>,

    /// Send credentials as query parameters instead of Basic auth over HTTPS.
    #[builder(default, setter(strip_option))]
    pub query_string_auth: Option<bool>,

    /// Explicit port spliced into the request URL.
    #[builder(default, setter(into, strip_option))]
    pub port: Option<String>,

    /// Request timeout in milliseconds; `0` or unset means no timeout.
    #[builder(default, setter(strip_option))]
    pub timeout: Option<u64>,

    /// Raw transport overrides, applied after everything else.
    #[serde(skip)]
    #[builder(default)]
    pub transport_overrides: TransportOverrides,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("url", &self.url)
            .field("consumer_key", &self.consumer_key)
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("wp_api_prefix", &self.wp_api_prefix)
            .field("version", &self.version)
            .field("verify_ssl", &self.verify_ssl)
            .field("encoding", &self.encoding)
            .field("query_string_auth", &self.query_string_auth)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("transport_overrides", &self.transport_overrides)
            .finish()
    }
}

/// Validated, immutable client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    api_prefix: String,
    version: String,
    credentials: Credentials,
    query_string_auth: bool,
    verify_ssl: bool,
    port: Option<String>,
    encoding: String,
    timeout: Option<Duration>,
    transport_overrides: TransportOverrides,
    secure: bool,
}

impl Config {
    /// Validate an options bag and apply defaults.
    ///
    /// `url`, `consumerKey` and `consumerSecret` are checked in that order,
    /// before any other option is looked at.
    ///
    /// # Examples
    ///
    /// ```
    /// use woorest_core::{ClientOptions, Config, ConfigError};
    ///
    /// let err = Config::from_options(ClientOptions::default()).unwrap_err();
    /// assert_eq!(err, ConfigError::MissingOption("url"));
    /// ```
    pub fn from_options(options: ClientOptions) -> Result<Self, ConfigError> {
        let base_url = required(options.url, "url")?;
        let consumer_key = required(options.consumer_key, "consumerKey")?;
        let consumer_secret = required(options.consumer_secret, "consumerSecret")?;

        let secure = base_url
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"));

        Ok(Self {
            base_url,
            api_prefix: options
                .wp_api_prefix
                .unwrap_or_else(|| DEFAULT_API_PREFIX.to_owned()),
            version: options
                .version
                .unwrap_or_else(|| DEFAULT_VERSION.to_owned()),
            credentials: Credentials::new(consumer_key, consumer_secret),
            query_string_auth: options.query_string_auth.unwrap_or(false),
            verify_ssl: options.verify_ssl.unwrap_or(true),
            port: options.port.filter(|p| !p.is_empty()),
            encoding: options
                .encoding
                .unwrap_or_else(|| DEFAULT_ENCODING.to_owned()),
            timeout: options
                .timeout
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            transport_overrides: options.transport_overrides,
            secure,
        })
    }

    /// The store base URL as configured.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The REST API prefix.
    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// The API version segment.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The consumer credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether credentials travel as query parameters over HTTPS.
    #[must_use]
    pub fn query_string_auth(&self) -> bool {
        self.query_string_auth
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// The explicit port, if any.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// The response text encoding.
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// The request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Raw transport overrides.
    #[must_use]
    pub fn transport_overrides(&self) -> &TransportOverrides {
        &self.transport_overrides
    }

    /// Whether the base URL uses TLS (`https`, case-insensitive).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.secure
    }
}

impl TryFrom<ClientOptions> for Config {
    type Error = ConfigError;

    fn try_from(options: ClientOptions) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingOption(name))
}
