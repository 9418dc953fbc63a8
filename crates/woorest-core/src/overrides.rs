//! Raw transport overrides applied after every computed request field.

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method};
use typed_builder::TypedBuilder;

/// Transport settings that take precedence over everything the engine computes.
///
/// `headers` and `query_params` replace computed entries key by key; every
/// other field, when set, replaces the computed value wholesale. This lets an
/// advanced caller override any auth or encoding decision, including the
/// target URL.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use woorest_core::TransportOverrides;
///
/// let overrides = TransportOverrides::builder()
///     .timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(overrides.timeout, Some(Duration::from_secs(5)));
/// assert!(overrides.headers.is_empty());
/// ```
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct TransportOverrides {
    /// Replacement request URL.
    #[builder(default, setter(into, strip_option))]
    pub url: Option<String>,

    /// Replacement HTTP method.
    #[builder(default, setter(strip_option))]
    pub method: Option<Method>,

    /// Headers replacing computed headers of the same name.
    #[builder(default)]
    pub headers: HeaderMap,

    /// Query parameters replacing computed parameters of the same key.
    #[builder(default)]
    pub query_params: BTreeMap<String, String>,

    /// Replacement request body.
    #[builder(default, setter(into, strip_option))]
    pub body: Option<Bytes>,

    /// Replacement request timeout.
    #[builder(default, setter(strip_option))]
    pub timeout: Option<Duration>,

    /// Replacement response text encoding, used by callers when decoding
    /// the response body.
    #[builder(default, setter(into, strip_option))]
    pub encoding: Option<String>,
}

impl TransportOverrides {
    /// Whether no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.method.is_none()
            && self.headers.is_empty()
            && self.query_params.is_empty()
            && self.body.is_none()
            && self.timeout.is_none()
            && self.encoding.is_none()
    }
}
