//! Query string canonicalization.
//!
//! The canonical form is what both the request line and the OAuth signature
//! are computed from:
//!
//! ```text
//! path?k1=v1&k2=v2...
//! ```
//!
//! Keys are sorted by their percent-encoded bytes, keys and values are encoded
//! with the RFC 3986 unreserved set, and literal `[`/`]` are restored in keys
//! so bracketed sub-keys (`filter[date]`) stay readable on the wire.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use woorest_core::ParameterSet;

/// Characters percent-encoded in query keys and values.
///
/// Everything except the RFC 3986 unreserved characters
/// (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`).
pub const RFC3986_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a string with the RFC 3986 unreserved set.
///
/// # Examples
///
/// ```
/// use woorest_auth::canonical::percent_encode;
///
/// assert_eq!(percent_encode("red shirt"), "red%20shirt");
/// assert_eq!(percent_encode("a[b]"), "a%5Bb%5D");
/// assert_eq!(percent_encode("~safe-_."), "~safe-_.");
/// ```
#[must_use]
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, RFC3986_ENCODE_SET).to_string()
}

/// Fold `params` into the query string of `url` and canonicalize the result.
///
/// A URL with no query string and an empty parameter set is returned as-is.
///
/// # Examples
///
/// ```
/// use woorest_auth::canonical::canonicalize_url;
/// use woorest_core::{ParamValue, ParameterSet};
///
/// let params = ParameterSet::new()
///     .with("per_page", 5)
///     .with("filter", ParamValue::nested([("date", "2020")]));
///
/// assert_eq!(
///     canonicalize_url("http://example.com/wp-json/v3/orders?b=2", &params),
///     "http://example.com/wp-json/v3/orders?b=2&filter[date]=2020&per_page=5"
/// );
/// assert_eq!(
///     canonicalize_url("http://example.com/x", &ParameterSet::new()),
///     "http://example.com/x"
/// );
/// ```
#[must_use]
pub fn canonicalize_url(url: &str, params: &ParameterSet) -> String {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    if query.is_none() && params.is_empty() {
        return url.to_owned();
    }

    let merged = merge_query(query.unwrap_or_default(), params);
    format!("{path}?{}", build_canonical_query(&merged))
}

/// Decode an existing query string and merge flattened `params` over it.
///
/// Later entries overwrite earlier ones with the same final key, so caller
/// parameters win over the URL's own query.
#[must_use]
pub fn merge_query(query: &str, params: &ParameterSet) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    merged.extend(params.flatten());
    merged
}

/// Parse the query component of `url` into decoded key/value pairs.
///
/// Returns an empty map when the URL has no query string.
#[must_use]
pub fn query_pairs(url: &str) -> BTreeMap<String, String> {
    url.split_once('?')
        .map(|(_, query)| {
            form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// Render the canonical query string for the request line.
///
/// Keys are sorted by encoded form and `[`/`]` are restored in keys.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use woorest_auth::canonical::build_canonical_query;
///
/// let pairs = BTreeMap::from([
///     ("b".to_owned(), "2".to_owned()),
///     ("a[x]".to_owned(), "1 2".to_owned()),
/// ]);
/// assert_eq!(build_canonical_query(&pairs), "a[x]=1%202&b=2");
/// ```
#[must_use]
pub fn build_canonical_query(pairs: &BTreeMap<String, String>) -> String {
    sorted_encoded_pairs(pairs)
        .iter()
        .map(|(k, v)| format!("{}={v}", restore_brackets(k)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Render the parameter string hashed into an OAuth signature.
///
/// Same ordering as [`build_canonical_query`] but keys stay fully encoded;
/// this string is hashed, never transmitted.
#[must_use]
pub fn build_signature_parameter_string(pairs: &BTreeMap<String, String>) -> String {
    sorted_encoded_pairs(pairs)
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn sorted_encoded_pairs(pairs: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut encoded: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort_unstable();
    encoded
}

fn restore_brackets(key: &str) -> String {
    key.replace("%5B", "[").replace("%5D", "]")
}
