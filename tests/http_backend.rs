use qr_check::backend::{ApiError, Backend, HttpBackend};
use qr_check::config::Config;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend_for(server: &MockServer) -> HttpBackend {
    let mut cfg = Config::default();
    cfg.backend.api_base_url = server.uri();
    HttpBackend::new(&cfg).unwrap()
}

#[tokio::test]
async fn predict_posts_payload_and_decodes_the_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(body_json(json!({ "payload": "http://evil.example/login" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": "http://evil.example/login",
            "prob_malicious": 0.92,
            "threshold": 0.5,
            "label": "phish"
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let item = backend.predict("http://evil.example/login").await.unwrap();

    assert_eq!(item.payload, "http://evil.example/login");
    assert_eq!(item.prob_malicious, 0.92);
    assert_eq!(item.threshold, 0.5);
    assert_eq!(item.label, "phish");
    assert!(item.qr_type.is_none());
}

#[tokio::test]
async fn predict_accepts_integer_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": "x",
            "prob_malicious": 0.7,
            "threshold": 0.5,
            "label": 1
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let item = backend.predict("x").await.unwrap();
    assert_eq!(item.label, "1");
}

#[tokio::test]
async fn error_body_text_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(
            ResponseTemplate::new(413).set_body_json(json!({ "error": "file too large" })),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let err = backend.predict("x").await.unwrap_err();

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status.as_u16(), 413);
            assert_eq!(message, "file too large");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let err = backend.predict("x").await.unwrap_err();

    match err {
        ApiError::Api { message, .. } => assert_eq!(message, "Request failed"),
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn scan_image_uploads_multipart_and_decodes_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scan-image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "qr_type": "QRCODE",
                    "payload": "http://evil.example/a",
                    "prob_malicious": 0.8,
                    "threshold": 0.5,
                    "label": "phish"
                },
                {
                    "payload": "https://example.com/b",
                    "prob_malicious": 0.3,
                    "threshold": 0.5,
                    "label": "benign"
                }
            ]
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let items = backend
        .scan_image("ticket.png", b"png bytes".to_vec())
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].qr_type.as_deref(), Some("QRCODE"));
    assert!(items[1].qr_type.is_none());
}

#[tokio::test]
async fn empty_results_array_is_a_valid_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scan-image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let items = backend.scan_image("blank.png", vec![0u8; 8]).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn ok_status_without_results_key_means_no_qr_detected() {
    // Some service versions answer a no-QR image with 200 and an error body.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scan-image"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "No QR detected in image" })),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let items = backend.scan_image("blank.png", vec![0u8; 8]).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn health_probe_decodes_the_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "model_loaded": false })),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let diag = backend.health().await.unwrap();
    assert!(diag.ok);
    assert!(!diag.model_loaded);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Port is bound then dropped, so nothing is listening. A pooled server
    // (`MockServer::start`) keeps its listener alive after drop, so use a
    // non-pooled one that actually shuts down.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let mut cfg = Config::default();
    cfg.backend.api_base_url = uri;
    let backend = HttpBackend::new(&cfg).unwrap();

    let err = backend.predict("x").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
