//! Consumer credentials.

/// The long-lived consumer key/secret pair identifying the calling application.
///
/// The secret never appears in `Debug` output.
///
/// # Examples
///
/// ```
/// use woorest_core::Credentials;
///
/// let creds = Credentials::new("ck_live", "cs_live");
/// assert_eq!(creds.consumer_key(), "ck_live");
/// assert!(!format!("{creds:?}").contains("cs_live"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
}

impl Credentials {
    /// Create credentials from a consumer key and secret.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// The consumer key (safe to log).
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// The consumer secret.
    ///
    /// Only hand this to signing or to a TLS-protected transport.
    #[must_use]
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}
