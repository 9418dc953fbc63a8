//! Request URL composition.
//!
//! ```text
//! <base_url>/<api_prefix>/<version>/<endpoint>
//! ```
//!
//! The base URL is parsed with WHATWG rules, so internationalized hosts are
//! sent in their punycode form and userinfo is preserved. An explicit port,
//! when configured, replaces the base URL's port. Over plain HTTP the caller's
//! parameters are folded into the URL immediately so they take part in OAuth
//! signing; over HTTPS the bare URL is returned and parameters travel as
//! ordinary query parameters.

use tracing::debug;
use ::url::Url;
use woorest_core::{Config, ParameterSet, UrlError};

use crate::canonical::canonicalize_url;

/// Build the request URL for `endpoint`, canonicalizing `params` into it when
/// the transport is not secure.
///
/// # Examples
///
/// ```
/// use woorest_auth::url::build_url;
/// use woorest_core::{ClientOptions, Config, ParameterSet};
///
/// let config = Config::from_options(
///     ClientOptions::builder()
///         .url("http://example.com/")
///         .consumer_key("ck")
///         .consumer_secret("cs")
///         .build(),
/// )
/// .unwrap();
///
/// let url = build_url(&config, "products", &ParameterSet::from([("per_page", 5)])).unwrap();
/// assert_eq!(url, "http://example.com/wp-json/v3/products?per_page=5");
/// ```
pub fn build_url(
    config: &Config,
    endpoint: &str,
    params: &ParameterSet,
) -> Result<String, UrlError> {
    let url = build_endpoint_url(config, endpoint)?;
    if config.is_secure() {
        return Ok(url);
    }
    let url = canonicalize_url(&url, params);
    debug!(url = %url, "Built canonical request URL");
    Ok(url)
}

/// Build the bare endpoint URL, without folding in any parameters.
///
/// A `#fragment` in `endpoint` is dropped; it is never sent to the server.
pub fn build_endpoint_url(config: &Config, endpoint: &str) -> Result<String, UrlError> {
    let base = normalize_base_url(config.base_url(), config.port())?;
    let endpoint = endpoint.split_once('#').map_or(endpoint, |(path, _)| path);
    Ok(format!(
        "{base}/{}/{}/{endpoint}",
        config.api_prefix(),
        config.version()
    ))
}

/// Validate the base URL, apply `port`, and strip trailing slashes.
fn normalize_base_url(base_url: &str, port: Option<&str>) -> Result<String, UrlError> {
    let base = base_url.trim_end_matches('/');
    let mut url = Url::parse(base).map_err(|e| invalid(base, &e))?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(invalid(base, &"missing scheme or host"));
    }

    if let Some(port) = port {
        let port: u16 = port
            .parse()
            .map_err(|_| UrlError::InvalidPort(port.to_owned()))?;
        url.set_port(Some(port))
            .map_err(|()| invalid(base, &"URL cannot carry a port"))?;
    }

    Ok(url.as_str().trim_end_matches('/').to_owned())
}

fn invalid(url: &str, err: &dyn std::fmt::Display) -> UrlError {
    UrlError::Invalid {
        url: url.to_owned(),
        reason: err.to_string(),
    }
}
