//! Configuration, credentials and parameter types for woorest.
//!
//! This crate holds the values every other woorest crate reads: the validated
//! client [`Config`], the consumer [`Credentials`], caller-supplied
//! [`ParameterSet`]s and raw [`TransportOverrides`], plus the engine-level
//! error types raised before any request leaves the process.

mod config;
mod credentials;
mod error;
mod overrides;
mod params;

pub use config::{ClientOptions, Config, DEFAULT_API_PREFIX, DEFAULT_ENCODING, DEFAULT_VERSION};
pub use credentials::Credentials;
pub use error::{ConfigError, UrlError};
pub use overrides::TransportOverrides;
pub use params::{ParamValue, ParameterSet};
