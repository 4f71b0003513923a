//! Integration tests for the HTTP transport.
//!
//! These tests verify request construction against a live mock server,
//! executor injection, authentication strategies and response
//! classification.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use servicenow_api::clients::{HttpClient, HttpExecutor, HttpMethod, HttpRequest};
use servicenow_api::{BasicAuth, BearerToken, HttpError, InstanceUrl, ServiceNowConfig};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn basic_config(uri: &str) -> ServiceNowConfig {
    ServiceNowConfig::builder()
        .instance_url(InstanceUrl::new(uri).unwrap())
        .auth(BasicAuth::new("admin", "secret").unwrap())
        .build()
        .unwrap()
}

/// An executor that counts requests before delegating to reqwest.
#[derive(Debug, Default)]
struct CountingExecutor {
    inner: reqwest::Client,
    calls: AtomicUsize,
}

#[async_trait]
impl HttpExecutor for CountingExecutor {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(request).await
    }
}

// ============================================================================
// Request construction
// ============================================================================

#[tokio::test]
async fn test_request_carries_default_headers_user_agent_and_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/now/table/sys_user"))
        .and(header("accept", "application/json"))
        .and(header("user-agent", "integration-test/1.0"))
        .and(header("x-correlation-id", "abc-123"))
        .and(header("authorization", "Bearer token-xyz"))
        .and(query_param("sysparm_limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ServiceNowConfig::builder()
        .instance_url(InstanceUrl::new(server.uri()).unwrap())
        .auth(BearerToken::new("token-xyz").unwrap())
        .user_agent("integration-test/1.0")
        .default_header("X-Correlation-Id", "abc-123")
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/sys_user")
        .query_param("sysparm_limit", "1")
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 200);
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_body_is_sent_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/now/table/incident"))
        .and(header("content-type", "application/json"))
        .and(header_exists("authorization"))
        .and(body_json(json!({"short_description": "Printer on fire"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": {"sys_id": "1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&basic_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Post, "/api/now/table/incident")
        .body(json!({"short_description": "Printer on fire"}))
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 201);
    let decoded: Option<serde_json::Value> = response.decode().unwrap();
    assert_eq!(decoded.unwrap()["result"]["sys_id"], "1");
}

#[tokio::test]
async fn test_response_headers_are_case_insensitive() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/now/table/incident"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": []}))
                .insert_header("X-Total-Count", "42"),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&basic_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/incident")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert_eq!(response.header("x-total-count"), Some("42"));
    assert_eq!(response.header("X-TOTAL-COUNT"), Some("42"));
}

// ============================================================================
// Executor injection
// ============================================================================

#[tokio::test]
async fn test_injected_executor_sends_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/now/table/incident"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(2)
        .mount(&server)
        .await;

    let executor = Arc::new(CountingExecutor::default());
    let client = HttpClient::with_executor(&basic_config(&server.uri()), executor.clone());

    for _ in 0..2 {
        let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/incident")
            .build()
            .unwrap();
        client.request(request).await.unwrap();
    }

    assert_eq!(executor.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_invalid_request_never_reaches_executor() {
    let executor = Arc::new(CountingExecutor::default());
    let client = HttpClient::with_executor(
        &basic_config("https://dev.example.com"),
        executor.clone(),
    );

    let request = HttpRequest {
        http_method: HttpMethod::Patch,
        path: "/api/now/table/incident/abc".to_string(),
        body: None,
        query: Default::default(),
    };
    let result = client.request(request).await;

    assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
    assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Response classification
// ============================================================================

#[tokio::test]
async fn test_structured_error_envelope_is_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/now/table/incident/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Not found", "detail": "no such record"},
            "status": "failure"
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new(&basic_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/incident/missing")
        .build()
        .unwrap();

    let error = client.request(request).await.unwrap_err();
    let api_error = error.api_error().unwrap();

    assert_eq!(api_error.status, 404);
    assert_eq!(api_error.message, "Not found");
    assert_eq!(api_error.detail, "no such record");
    assert!(!api_error.raw.is_empty());
}

#[tokio::test]
async fn test_redirect_status_outside_success_range_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/now/table/incident"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let client = HttpClient::new(&basic_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/incident")
        .build()
        .unwrap();

    let error = client.request(request).await.unwrap_err();

    assert_eq!(error.api_error().map(|e| e.status), Some(304));
    assert!(error.api_error().unwrap().raw.is_empty());
}

#[tokio::test]
async fn test_empty_success_body_decodes_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/now/table/incident/abc"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = HttpClient::new(&basic_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Delete, "/api/now/table/incident/abc")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert!(response.is_empty());
    let decoded: Option<serde_json::Value> = response.decode().unwrap();
    assert!(decoded.is_none());
}

#[tokio::test]
async fn test_connection_failure_is_a_network_error() {
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = HttpClient::new(&basic_config(&uri)).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/incident")
        .build()
        .unwrap();

    let result = client.request(request).await;

    assert!(matches!(result, Err(HttpError::Network(_))));
}
