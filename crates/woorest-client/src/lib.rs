//! Authenticated request builder and HTTP client for `wp-json` REST APIs.
//!
//! [`WooClient`] turns a logical API call (method, endpoint, parameters, body)
//! into a [`RequestDescriptor`] carrying the right credentials for the
//! transport in use, and dispatches it through a [`Transport`]:
//!
//! - HTTPS: HTTP Basic credentials, or `consumer_key`/`consumer_secret` query
//!   parameters when `queryStringAuth` is set;
//! - plain HTTP: an OAuth 1.0a HMAC-SHA256 signature over the canonical URL.
//!
//! # Example
//!
//! ```rust,no_run
//! use woorest_client::WooClient;
//! use woorest_core::{ClientOptions, ParameterSet};
//!
//! # async fn run() -> Result<(), woorest_client::Error> {
//! let client = WooClient::new(
//!     ClientOptions::builder()
//!         .url("https://shop.example.com")
//!         .consumer_key("ck_xxx")
//!         .consumer_secret("cs_xxx")
//!         .version("wc/v3")
//!         .build(),
//! )?;
//!
//! let response = client
//!     .get("products", &ParameterSet::new().with("per_page", 20))
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod request;
mod transport;

pub use client::WooClient;
pub use error::{Error, TransportError};
pub use request::{
    DEFAULT_USER_AGENT, JSON_CONTENT_TYPE, RequestDescriptor, assemble, assemble_with_nonce,
};
pub use transport::{ReqwestTransport, Transport};
pub use woorest_core::{
    ClientOptions, Config, ConfigError, Credentials, ParamValue, ParameterSet, TransportOverrides,
    UrlError,
};
