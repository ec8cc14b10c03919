//! Integration tests for the HTTP transport against a local stub server

use crate::integration::test_utils::StubServer;
use clawprint::error::ApiError;
use clawprint::transport::{ApiRequest, Authorization, Endpoint, HttpTransport, Transport};
use serde_json::json;
use std::time::Duration;

fn transport(server: &StubServer, key: Option<&str>) -> HttpTransport {
    HttpTransport::new(
        &server.base_url,
        key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_sends_json_headers_and_bearer() {
    let server = StubServer::start(200, r#"{"business_id":"biz_1"}"#);
    let transport = transport(&server, Some("pk_abc:sk_def"));

    let request = ApiRequest::post(Endpoint::new(["businesses"]))
        .with_body(json!({ "legal_name": "Acme AI LLC" }));
    let body = transport.send(request).await.unwrap();
    assert_eq!(body, json!({ "business_id": "biz_1" }));

    let captured = server.last_request();
    assert_eq!(captured.request_line, "POST /api/businesses HTTP/1.1");
    assert_eq!(captured.header("content-type"), Some("application/json"));
    assert_eq!(captured.header("authorization"), Some("Bearer pk_abc:sk_def"));
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent, json!({ "legal_name": "Acme AI LLC" }));
}

#[tokio::test]
async fn test_no_authorization_without_key() {
    let server = StubServer::start(200, r#"{"status":"healthy"}"#);
    let transport = transport(&server, None);

    transport
        .send(ApiRequest::get(Endpoint::new(["health"])))
        .await
        .unwrap();

    let captured = server.last_request();
    assert_eq!(captured.request_line, "GET /api/health HTTP/1.1");
    assert_eq!(captured.header("authorization"), None);
}

#[tokio::test]
async fn test_omit_authorization_overrides_configured_key() {
    let server = StubServer::start(201, r#"{"public_key":"pk_1","secret_key":"sk_1"}"#);
    let transport = transport(&server, Some("pk_abc:sk_def"));

    let request = ApiRequest::post(Endpoint::new(["agents"]))
        .with_body(json!({ "email": "agent@example.com" }))
        .with_authorization(Authorization::Omit);
    transport.send(request).await.unwrap();

    assert_eq!(server.last_request().header("authorization"), None);
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = StubServer::start(200, r#"{"invoices":[]}"#);
    let transport = transport(&server, Some("pk_abc:sk_def"));

    let endpoint = Endpoint::new(["sponsors"]).query("email", "a+b@example.com");
    transport.send(ApiRequest::get(endpoint)).await.unwrap();

    assert_eq!(
        server.last_request().request_line,
        "GET /api/sponsors?email=a%2Bb%40example.com HTTP/1.1"
    );
}

#[tokio::test]
async fn test_empty_success_body_is_empty_object() {
    let server = StubServer::start(200, "");
    let transport = transport(&server, None);

    let body = transport
        .send(ApiRequest::delete(Endpoint::new(["businesses", "biz_1"])))
        .await
        .unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let server = StubServer::start(404, r#"{"error":"Business not found"}"#);
    let transport = transport(&server, None);

    let err = transport
        .send(ApiRequest::get(Endpoint::new(["businesses", "biz_missing"])))
        .await
        .unwrap_err();
    match err {
        ApiError::Server {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Business not found");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_still_reports_status() {
    let server = StubServer::start(502, "<html>Bad Gateway</html>");
    let transport = transport(&server, None);

    let err = transport
        .send(ApiRequest::get(Endpoint::new(["health"])))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_unparseable_success_body_is_parse_error() {
    let server = StubServer::start(200, "not json");
    let transport = transport(&server, None);

    let err = transport
        .send(ApiRequest::get(Endpoint::new(["health"])))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = StubServer::with_delay(200, "{}", Duration::from_millis(1500));
    let transport = HttpTransport::new(&server.base_url, None, Duration::from_millis(200)).unwrap();

    let err = transport
        .send(ApiRequest::get(Endpoint::new(["health"])))
        .await
        .unwrap_err();
    match err {
        ApiError::Timeout(timeout) => {
            assert_eq!(timeout, Duration::from_millis(200));
            assert_eq!(
                ApiError::Timeout(timeout).to_string(),
                "Request timeout after 200ms"
            );
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let transport = HttpTransport::new(
        &format!("http://127.0.0.1:{}/api", port),
        None,
        Duration::from_secs(2),
    )
    .unwrap();

    let err = transport
        .send(ApiRequest::get(Endpoint::new(["health"])))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_exchange_returns_error_statuses_raw() {
    let server = StubServer::start(401, r#"{"error":"Missing Authorization header"}"#);
    let transport = transport(&server, None);

    let response = transport
        .exchange(ApiRequest::get(Endpoint::new(["businesses"])))
        .await
        .unwrap();
    assert_eq!(response.status, 401);
    assert!(!response.is_success());
    assert_eq!(response.body["error"], "Missing Authorization header");
}

#[tokio::test]
async fn test_exchange_keeps_status_of_non_json_error_page() {
    let server = StubServer::start(502, "<html>Bad Gateway</html>");
    let transport = transport(&server, None);

    let response = transport
        .exchange(ApiRequest::get(Endpoint::new(["businesses"])))
        .await
        .unwrap();
    assert_eq!(response.status, 502);
    assert_eq!(response.body, serde_json::Value::String("<html>Bad Gateway</html>".to_string()));
}
