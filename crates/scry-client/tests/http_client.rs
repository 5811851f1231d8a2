//! Integration tests for the store client against a loopback HTTP store.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{Router, get, post};
use chrono::Utc;

use scry_client::{ClientConfig, LogStoreClient, StoreError};
use scry_proto::{LogLevel, LogRecord, NewLogEntry, QueryResult, SearchParams};

/// Query strings the fake store has seen, one map per request.
type CapturedQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serves the router on a free loopback port.
async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn client_for(addr: SocketAddr) -> LogStoreClient {
    let config = ClientConfig::new().with_base_url(format!("http://{addr}"));
    LogStoreClient::new(&config).expect("build client")
}

fn make_record(id: &str, level: LogLevel) -> LogRecord {
    LogRecord {
        id: id.to_string(),
        timestamp: Utc::now(),
        level,
        message: "connection refused".to_string(),
        service: "payment-service".to_string(),
    }
}

async fn echo_create(Json(entry): Json<NewLogEntry>) -> Json<LogRecord> {
    Json(LogRecord {
        id: "generated-1".to_string(),
        timestamp: entry.timestamp,
        level: entry.level,
        message: entry.message,
        service: entry.service,
    })
}

async fn capture_query(
    State(captured): State<CapturedQueries>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<QueryResult> {
    captured.lock().expect("lock").push(params);
    Json(QueryResult::empty())
}

// ===========================================
// create_log
// ===========================================

#[tokio::test]
async fn create_log_returns_stored_record() {
    let app = Router::new().route("/logs", post(echo_create));
    let addr = serve(app).await;
    let client = client_for(addr);

    let entry = NewLogEntry::new(LogLevel::Warning, "disk low", "storage");
    let record = client.create_log(&entry).await.expect("create");

    assert_eq!(record.id, "generated-1");
    assert_eq!(record.level, LogLevel::Warning);
    assert_eq!(record.message, "disk low");
    assert_eq!(record.service, "storage");
    assert_eq!(record.timestamp, entry.timestamp);
}

#[tokio::test]
async fn create_log_surfaces_store_rejection_verbatim() {
    async fn reject() -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"detail": "message is required"})),
        )
    }
    let app = Router::new().route("/logs", post(reject));
    let addr = serve(app).await;
    let client = client_for(addr);

    let entry = NewLogEntry::new(LogLevel::Info, "", "svc");
    let err = client.create_log(&entry).await.expect_err("must fail");
    match err {
        StoreError::Validation(message) => assert_eq!(message, "message is required"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ===========================================
// search_logs
// ===========================================

#[tokio::test]
async fn search_omits_absent_filter_fields() {
    let captured: CapturedQueries = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/logs/search", get(capture_query))
        .with_state(captured.clone());
    let addr = serve(app).await;
    let client = client_for(addr);

    let params = SearchParams::new().with_level(LogLevel::Error);
    client.search_logs(&params).await.expect("search");

    let seen = captured.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    let query = &seen[0];
    assert_eq!(query.get("level").map(String::as_str), Some("ERROR"));
    assert_eq!(query.get("size").map(String::as_str), Some("20"));
    assert_eq!(query.get("from").map(String::as_str), Some("0"));
    assert!(!query.contains_key("q"));
    assert!(!query.contains_key("service"));
}

#[tokio::test]
async fn search_sends_all_present_fields() {
    let captured: CapturedQueries = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/logs/search", get(capture_query))
        .with_state(captured.clone());
    let addr = serve(app).await;
    let client = client_for(addr);

    let params = SearchParams::new()
        .with_query("timeout")
        .with_level(LogLevel::Warning)
        .with_service("payment-service")
        .with_size(50)
        .with_from(100);
    client.search_logs(&params).await.expect("search");

    let seen = captured.lock().expect("lock");
    let query = &seen[0];
    assert_eq!(query.get("q").map(String::as_str), Some("timeout"));
    assert_eq!(query.get("level").map(String::as_str), Some("WARNING"));
    assert_eq!(
        query.get("service").map(String::as_str),
        Some("payment-service")
    );
    assert_eq!(query.get("size").map(String::as_str), Some("50"));
    assert_eq!(query.get("from").map(String::as_str), Some("100"));
}

#[tokio::test]
async fn search_decodes_full_response() {
    async fn respond() -> Json<QueryResult> {
        Json(QueryResult {
            logs: vec![
                make_record("a", LogLevel::Error),
                make_record("b", LogLevel::Error),
            ],
            total: 41,
            took: Some(12),
        })
    }
    let app = Router::new().route("/logs/search", get(respond));
    let addr = serve(app).await;
    let client = client_for(addr);

    let result = client
        .search_logs(&SearchParams::new().with_query("refused"))
        .await
        .expect("search");

    assert_eq!(result.logs.len(), 2);
    assert_eq!(result.logs[0].id, "a");
    assert_eq!(result.total, 41);
    assert_eq!(result.took, Some(12));
}

// ===========================================
// latest_logs
// ===========================================

#[tokio::test]
async fn latest_defaults_page_size() {
    let captured: CapturedQueries = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/logs/latest", get(capture_query))
        .with_state(captured.clone());
    let addr = serve(app).await;
    let client = client_for(addr);

    client.latest_logs(None).await.expect("latest");

    let seen = captured.lock().expect("lock");
    assert_eq!(seen[0].get("size").map(String::as_str), Some("20"));
}

#[tokio::test]
async fn latest_respects_custom_size() {
    let captured: CapturedQueries = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/logs/latest", get(capture_query))
        .with_state(captured.clone());
    let addr = serve(app).await;
    let client = client_for(addr);

    client.latest_logs(Some(5)).await.expect("latest");

    let seen = captured.lock().expect("lock");
    assert_eq!(seen[0].get("size").map(String::as_str), Some("5"));
}

// ===========================================
// Error classification
// ===========================================

#[tokio::test]
async fn server_error_carries_detail() {
    async fn fail() -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"detail": "OpenSearch connection failed"})),
        )
    }
    let app = Router::new().route("/logs/latest", get(fail));
    let addr = serve(app).await;
    let client = client_for(addr);

    let err = client.latest_logs(None).await.expect_err("must fail");
    match err {
        StoreError::Server { status, detail } => {
            assert_eq!(status, 503);
            assert_eq!(detail.as_deref(), Some("OpenSearch connection failed"));
        }
        other => panic!("expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_json_body_has_no_detail() {
    async fn fail() -> (StatusCode, &'static str) {
        (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
    }
    let app = Router::new().route("/logs/search", get(fail));
    let addr = serve(app).await;
    let client = client_for(addr);

    let err = client
        .search_logs(&SearchParams::new())
        .await
        .expect_err("must fail");
    match err {
        StoreError::Server { status, detail } => {
            assert_eq!(status, 502);
            assert_eq!(detail, None);
        }
        other => panic!("expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_store_is_network_error() {
    // Bind a port, learn it, then close the listener so nothing answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = client_for(addr);
    let err = client.latest_logs(None).await.expect_err("must fail");
    assert!(matches!(err, StoreError::Network(_)));
}
