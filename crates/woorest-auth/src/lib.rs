//! Authentication and URL canonicalization for woorest.
//!
//! Given a validated [`Config`](woorest_core::Config), this crate decides how a
//! request authenticates and produces the exact URL and query parameters a
//! `wp-json` REST server will verify:
//!
//! - over HTTPS, consumer credentials travel as HTTP Basic credentials or as
//!   `consumer_key`/`consumer_secret` query parameters;
//! - over plain HTTP, the request is signed with OAuth 1.0a (HMAC-SHA256).
//!
//! # Modules
//!
//! - [`canonical`] - Sorted, percent-encoded query strings
//! - [`url`] - Endpoint URL composition and port injection
//! - [`oauth1`] - OAuth 1.0a signature computation
//! - [`strategy`] - Auth strategy selection

pub mod canonical;
pub mod oauth1;
pub mod strategy;
pub mod url;

pub use oauth1::{OAuthSigner, SignatureMaterial};
pub use strategy::{AuthMaterial, AuthStrategy, BasicAuth, authorize, authorize_with_nonce};
