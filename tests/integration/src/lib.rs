//! End-to-end tests for the woorest client.
//!
//! Each test starts an in-process HTTP server on `127.0.0.1` that records
//! every request it receives, sends real requests through
//! [`ReqwestTransport`], and inspects what arrived on the wire.
//!
//! ```text
//! cargo test -p woorest-integration
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Once;

use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, Uri};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::warn;
use woorest_client::{ClientOptions, ReqwestTransport, WooClient};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A request as received by the [`CaptureServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request method.
    pub method: Method,
    /// Request target (origin form: path and query).
    pub uri: Uri,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Bytes,
}

impl CapturedRequest {
    /// The raw query string, empty when absent.
    #[must_use]
    pub fn query(&self) -> &str {
        self.uri.query().unwrap_or_default()
    }

    /// Query parameter names in wire order.
    #[must_use]
    pub fn query_keys(&self) -> Vec<&str> {
        self.query()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').map_or(pair, |(k, _)| k))
            .collect()
    }
}

/// HTTP server recording every request and answering `{"ok":true}`.
#[derive(Debug)]
pub struct CaptureServer {
    addr: SocketAddr,
    requests: mpsc::UnboundedReceiver<CapturedRequest>,
}

impl CaptureServer {
    /// Bind an ephemeral port and start serving.
    pub async fn start() -> anyhow::Result<Self> {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (tx, requests) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req| capture(req, tx.clone()));
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        warn!(error = %e, "Capture server connection failed");
                    }
                });
            }
        });

        Ok(Self { addr, requests })
    }

    /// `http://127.0.0.1:<port>`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The bound port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Wait for the next recorded request.
    pub async fn next_request(&mut self) -> CapturedRequest {
        self.requests
            .recv()
            .await
            .expect("capture server stopped before a request arrived")
    }
}

async fn capture(
    req: Request<Incoming>,
    tx: mpsc::UnboundedSender<CapturedRequest>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = body
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .unwrap_or_default();

    let _ = tx.send(CapturedRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
    });

    Ok(Response::builder()
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from_static(br#"{"ok":true}"#)))
        .expect("static response is valid"))
}

/// A reqwest-backed client that bypasses any system proxy.
pub fn client(options: ClientOptions) -> WooClient<ReqwestTransport> {
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("reqwest client builds");
    WooClient::with_transport(options, ReqwestTransport::from_client(http))
        .expect("valid client options")
}

mod test_https;
mod test_oauth;
