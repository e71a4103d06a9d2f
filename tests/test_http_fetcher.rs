//! Integration tests for the HttpFetcher using mockito for HTTP mocking.

use mockito::Server;
use reverse_lookup::config::DEFAULT_USER_AGENT;
use reverse_lookup::{HttpFetcher, LookupError, LookupMetrics};
use std::collections::HashMap;
use std::net::TcpListener;
use std::time::Duration;

fn fetcher() -> HttpFetcher {
    HttpFetcher::with_options(DEFAULT_USER_AGENT, Duration::from_secs(5), LookupMetrics::new())
}

#[test]
fn test_fetch_returns_body_with_default_user_agent() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/phone/4155551234")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><h1>Hello</h1></html>")
        .create();

    let fetcher = fetcher();
    let body = fetcher
        .fetch(&format!("{}/phone/4155551234", server.url()), None)
        .unwrap();

    mock.assert();
    assert_eq!(body, "<html><h1>Hello</h1></html>");
    assert_eq!(fetcher.metrics().http_requests_total(), 1);
    assert_eq!(fetcher.metrics().http_errors_total(), 0);
}

#[test]
fn test_fetch_caller_headers_override_default() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/lookup")
        .match_header("user-agent", "custom-agent/1.0")
        .match_header("x-api-key", "secret")
        .with_status(200)
        .with_body("ok")
        .create();

    let mut headers = HashMap::new();
    headers.insert("User-Agent".to_string(), "custom-agent/1.0".to_string());
    headers.insert("X-Api-Key".to_string(), "secret".to_string());

    let body = fetcher()
        .fetch(&format!("{}/lookup", server.url()), Some(&headers))
        .unwrap();

    mock.assert();
    assert_eq!(body, "ok");
}

#[test]
fn test_fetch_status_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/phone/0")
        .with_status(503)
        .with_body("Service Unavailable")
        .create();

    let fetcher = fetcher();
    let result = fetcher.fetch(&format!("{}/phone/0", server.url()), None);

    mock.assert();
    match result {
        Err(LookupError::HttpStatus { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("Expected HttpStatus error, got: {:?}", other),
    }
    assert_eq!(fetcher.metrics().http_errors_total(), 1);
}

#[test]
fn test_fetch_not_found_is_status_error() {
    let mut server = Server::new();

    let _mock = server.mock("GET", "/missing").with_status(404).create();

    let result = fetcher().fetch(&format!("{}/missing", server.url()), None);
    assert!(matches!(
        result,
        Err(LookupError::HttpStatus { status: 404, .. })
    ));
}

#[test]
fn test_fetch_connection_refused() {
    let fetcher = fetcher();
    let result = fetcher.fetch("http://127.0.0.1:1/phone/4155551234", None);

    let err = result.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, LookupError::Network(_)));
    assert_eq!(fetcher.metrics().http_errors_total(), 1);
}

#[test]
fn test_fetch_makes_exactly_one_request() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/flaky")
        .with_status(500)
        .expect(1)
        .create();

    let result = fetcher().fetch(&format!("{}/flaky", server.url()), None);

    assert!(result.is_err());
    mock.assert();
}

#[test]
fn test_fetch_silent_server_times_out() {
    // Accepts the connection but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        std::thread::sleep(Duration::from_millis(1500));
        drop(stream);
    });

    let fetcher = HttpFetcher::with_options(
        DEFAULT_USER_AGENT,
        Duration::from_millis(300),
        LookupMetrics::new(),
    );
    let result = fetcher.fetch(&format!("http://{}/phone/4155551234", addr), None);

    match result {
        Err(err @ LookupError::Timeout) => assert!(err.is_transport()),
        other => panic!("Expected Timeout error, got: {:?}", other),
    }
    assert_eq!(fetcher.metrics().http_errors_total(), 1);

    server.join().unwrap();
}
