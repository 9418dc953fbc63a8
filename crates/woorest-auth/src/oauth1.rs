//! OAuth 1.0a request signing (HMAC-SHA256, one-legged).
//!
//! Used when the store is reached over plain HTTP, where sending the consumer
//! secret directly would expose it. The signature is computed as:
//!
//! ```text
//! BaseString = UPPER(method) & enc(url without query) & enc(sorted params)
//! Signature  = Base64(HMAC-SHA256(enc(consumer_secret) & "", BaseString))
//! ```
//!
//! The signed parameters are the `oauth_*` set plus every query parameter
//! already present on the request URL.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use hmac::{Hmac, KeyInit, Mac};
use http::Method;
use sha2::Sha256;
use tracing::debug;
use woorest_core::Credentials;

use crate::canonical::{build_signature_parameter_string, percent_encode, query_pairs};

type HmacSha256 = Hmac<Sha256>;

/// The only signature method produced.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";

/// The `oauth_version` value sent with every signed request.
pub const OAUTH_VERSION: &str = "1.0";

/// Per-request signing inputs.
#[derive(Debug, Clone)]
pub struct SignatureMaterial<'a> {
    credentials: &'a Credentials,
    nonce: String,
    timestamp: i64,
}

impl<'a> SignatureMaterial<'a> {
    /// Fresh material: a random URL-safe nonce and the current epoch seconds.
    #[must_use]
    pub fn generate(credentials: &'a Credentials) -> Self {
        Self::new(
            credentials,
            uuid::Uuid::new_v4().simple().to_string(),
            Utc::now().timestamp(),
        )
    }

    /// Material with a fixed nonce and timestamp.
    pub fn new(credentials: &'a Credentials, nonce: impl Into<String>, timestamp: i64) -> Self {
        Self {
            credentials,
            nonce: nonce.into(),
            timestamp,
        }
    }

    /// The credentials being signed with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        self.credentials
    }

    /// The `oauth_nonce` value.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// The `oauth_timestamp` value.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The `oauth_signature_method` value.
    #[must_use]
    pub fn signature_method(&self) -> &'static str {
        SIGNATURE_METHOD
    }
}

/// Signs requests on behalf of one consumer.
#[derive(Debug, Clone, Copy)]
pub struct OAuthSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> OAuthSigner<'a> {
    /// Create a signer for the given credentials.
    #[must_use]
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Sign `method url` with a fresh nonce and timestamp.
    ///
    /// Returns the `oauth_*` query parameters, `oauth_signature` included.
    #[must_use]
    pub fn authorize(&self, method: &Method, url: &str) -> BTreeMap<String, String> {
        self.authorize_with(method, url, &SignatureMaterial::generate(self.credentials))
    }

    /// Sign `method url` with caller-provided material.
    #[must_use]
    pub fn authorize_with(
        &self,
        method: &Method,
        url: &str,
        material: &SignatureMaterial<'_>,
    ) -> BTreeMap<String, String> {
        let mut oauth = BTreeMap::from([
            (
                "oauth_consumer_key".to_owned(),
                self.credentials.consumer_key().to_owned(),
            ),
            ("oauth_nonce".to_owned(), material.nonce().to_owned()),
            (
                "oauth_signature_method".to_owned(),
                material.signature_method().to_owned(),
            ),
            (
                "oauth_timestamp".to_owned(),
                material.timestamp().to_string(),
            ),
            ("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
        ]);

        let mut signed = query_pairs(url);
        signed.extend(oauth.iter().map(|(k, v)| (k.clone(), v.clone())));

        let base_string = build_signature_base_string(method, url, &signed);
        let signature = compute_signature(self.credentials.consumer_secret(), &base_string);

        debug!(
            consumer_key = %self.credentials.consumer_key(),
            nonce = %material.nonce(),
            timestamp = material.timestamp(),
            "Signed request with OAuth 1.0a"
        );

        oauth.insert("oauth_signature".to_owned(), signature);
        oauth
    }
}

/// Build the signature base string.
///
/// The query component of `url` is dropped; `params` must already contain
/// every parameter to be signed.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use http::Method;
/// use woorest_auth::oauth1::build_signature_base_string;
///
/// let params = BTreeMap::from([("b".to_owned(), "x y".to_owned())]);
/// assert_eq!(
///     build_signature_base_string(&Method::GET, "http://a.test/p?b=x", &params),
///     "GET&http%3A%2F%2Fa.test%2Fp&b%3Dx%2520y"
/// );
/// ```
#[must_use]
pub fn build_signature_base_string(
    method: &Method,
    url: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let base_url = url.split_once('?').map_or(url, |(base, _)| base);
    format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        percent_encode(base_url),
        percent_encode(&build_signature_parameter_string(params))
    )
}

/// Compute `Base64(HMAC-SHA256(enc(secret) + "&", base_string))`.
///
/// The trailing `&` is the empty token secret of one-legged OAuth.
#[must_use]
pub fn compute_signature(consumer_secret: &str, base_string: &str) -> String {
    let key = format!("{}&", percent_encode(consumer_secret));
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can accept keys of any length");
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
