//! Error types raised by the request-building engine.
//!
//! Both errors are raised before any network activity takes place.

/// Errors raised while constructing a client [`Config`](crate::Config).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option is missing or empty.
    #[error("missing required option: {0}")]
    MissingOption(&'static str),
}

/// Errors raised while composing a request URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    /// The configured port is not a valid TCP port number.
    #[error("invalid port: {0}")]
    InvalidPort(String),

    /// The composed URL could not be parsed.
    #[error("invalid URL {url}: {reason}")]
    Invalid {
        /// The URL that failed to parse.
        url: String,
        /// Why parsing failed.
        reason: String,
    },
}
