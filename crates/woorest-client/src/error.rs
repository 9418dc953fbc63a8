//! Client error type.
//!
//! Engine errors ([`Error::Config`], [`Error::Url`], [`Error::Body`]) are
//! raised before any network activity. [`Error::Transport`] carries the
//! transport's own error unchanged; downcast it to inspect.

use woorest_core::{ConfigError, UrlError};

/// The error a [`Transport`](crate::Transport) returns.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`WooClient`](crate::WooClient).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required option was missing at construction.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request URL could not be composed.
    #[error(transparent)]
    Url(#[from] UrlError),

    /// The request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    /// The transport failed; the source is passed through unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),
}

impl Error {
    /// The transport's error, if this is a transport failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use woorest_client::Error;
    ///
    /// let err = Error::Transport(Box::new(std::io::Error::other("reset")));
    /// let io = err
    ///     .transport_error()
    ///     .and_then(|e| e.downcast_ref::<std::io::Error>());
    /// assert!(io.is_some());
    /// ```
    #[must_use]
    pub fn transport_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
