// Integration tests for `Transport` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lazyfetch_api::{Error, Transport};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Transport) {
    let server = MockServer::start().await;
    let transport = Transport::from_reqwest(reqwest::Client::new());
    (server, transport)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_get_json_sends_accept_header() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let body = transport
        .get_json(&format!("{}/items", server.uri()), &[], &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn test_get_json_merges_query_params() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("filter", "active"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    // `filter` rides on the URL, `page` comes in through params.
    let body = transport
        .get_json(
            &format!("{}/items?filter=active", server.uri()),
            &[("page".into(), "3".into())],
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(body.as_array().unwrap().is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_error_uses_body_message() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "No such thing"})))
        .mount(&server)
        .await;

    let result = transport
        .get_json(&server.uri(), &[], &CancellationToken::new())
        .await;

    match result {
        Err(Error::Status { status, ref message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "No such thing");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_status_error_without_body() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = transport
        .get_json(&server.uri(), &[], &CancellationToken::new())
        .await;

    match result {
        Err(Error::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_decode_error_on_non_json_body() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = transport
        .get_json(&server.uri(), &[], &CancellationToken::new())
        .await;

    match result {
        Err(Error::Decode { ref body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Decode error, got: {other:?}"),
    }
}

// ── Cancellation ────────────────────────────────────────────────────

#[tokio::test]
async fn test_cancellation_aborts_request() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"slow": true}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let uri = server.uri();
    let fut = transport.get_json(&uri, &[], &cancel);

    cancel.cancel();
    let result = fut.await;

    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(result.unwrap_err().is_cancelled());
}
