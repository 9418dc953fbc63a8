//! OAuth 1.0a signing over plain HTTP, verified on the receiving side.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use http::Method;
    use woorest_auth::canonical::query_pairs;
    use woorest_auth::oauth1::{build_signature_base_string, compute_signature};
    use woorest_client::{ClientOptions, ParamValue, ParameterSet};

    use crate::{CaptureServer, CapturedRequest, client};

    const SECRET: &str = "cs_integration&secret";

    fn options(url: String) -> ClientOptions {
        ClientOptions::builder()
            .url(url)
            .consumer_key("ck_integration")
            .consumer_secret(SECRET)
            .version("wc/v3")
            .build()
    }

    /// Recompute the signature the way a server would and compare.
    fn assert_valid_signature(server: &CaptureServer, request: &CapturedRequest) {
        let mut params: BTreeMap<String, String> = query_pairs(&format!("?{}", request.query()));
        let signature = params
            .remove("oauth_signature")
            .expect("signed request carries oauth_signature");

        let url = format!("{}{}", server.base_url(), request.uri.path());
        let base_string = build_signature_base_string(&request.method, &url, &params);
        assert_eq!(compute_signature(SECRET, &base_string), signature);
    }

    #[tokio::test]
    async fn test_should_send_verifiable_signature_for_get() {
        let mut server = CaptureServer::start().await.unwrap();
        let client = client(options(server.base_url()));

        let params = ParameterSet::new()
            .with("search", "red shirt")
            .with("filter", ParamValue::nested([("date", "2020")]))
            .with("per_page", 5);
        let response = client.get("orders", &params).await.unwrap();
        assert!(response.status().is_success());

        let request = server.next_request().await;
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.uri.path(), "/wp-json/wc/v3/orders");
        assert_eq!(
            request.query_keys(),
            [
                "filter[date]",
                "per_page",
                "search",
                "oauth_consumer_key",
                "oauth_nonce",
                "oauth_signature",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_version",
            ]
        );
        assert!(request.query().contains("search=red%20shirt"));
        assert!(request.headers.get(http::header::AUTHORIZATION).is_none());
        assert_valid_signature(&server, &request);
    }

    #[tokio::test]
    async fn test_should_sign_post_with_json_body() {
        let mut server = CaptureServer::start().await.unwrap();
        let client = client(options(server.base_url()));

        let body = serde_json::json!({"name": "Premium Quality", "type": "simple"});
        let response = client
            .post("products", &body, &ParameterSet::new())
            .await
            .unwrap();
        let echoed: serde_json::Value = response.json().await.unwrap();
        assert_eq!(echoed, serde_json::json!({"ok": true}));

        let request = server.next_request().await;
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.headers[http::header::CONTENT_TYPE],
            "application/json;charset=utf-8"
        );
        let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(sent, body);
        assert_valid_signature(&server, &request);
    }

    #[tokio::test]
    async fn test_should_inject_port_option_into_request_url() {
        let mut server = CaptureServer::start().await.unwrap();
        let mut opts = options("http://127.0.0.1:1/".to_owned());
        opts.port = Some(server.port().to_string());
        let client = client(opts);

        client
            .delete("products/42", &ParameterSet::from([("force", true)]))
            .await
            .unwrap();

        let request = server.next_request().await;
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.uri.path(), "/wp-json/wc/v3/products/42");
        assert!(request.query().starts_with("force=true&oauth_consumer_key="));
        assert_valid_signature(&server, &request);
    }

    #[tokio::test]
    async fn test_should_decode_response_with_configured_encoding() {
        let server = CaptureServer::start().await.unwrap();
        let mut opts = options(server.base_url());
        opts.encoding = Some("iso-8859-1".to_owned());
        let client = client(opts);

        let response = client.get("products", &ParameterSet::new()).await.unwrap();
        let text = response
            .text_with_charset(client.config().encoding())
            .await
            .unwrap();
        assert_eq!(text, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_should_use_fresh_nonce_per_request() {
        let mut server = CaptureServer::start().await.unwrap();
        let client = client(options(server.base_url()));

        client.get("products", &ParameterSet::new()).await.unwrap();
        client.get("products", &ParameterSet::new()).await.unwrap();

        let nonce = |request: &CapturedRequest| {
            query_pairs(&format!("?{}", request.query()))
                .remove("oauth_nonce")
                .unwrap()
        };
        let first = server.next_request().await;
        let second = server.next_request().await;
        assert_ne!(nonce(&first), nonce(&second));
        assert_valid_signature(&server, &first);
        assert_valid_signature(&server, &second);
    }
}
