//! Integration Tests for API Endpoints
//!
//! Drives the full request/response cycle through the real HTTP fetcher,
//! against a local stand-in for the country directory.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use country_search::{
    api::create_router, cache::CacheStore, client::HttpFetcher, AppState, CountryService,
};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

const INDIA: &str = r#"[
    {
        "name": {"common": "India"},
        "capital": ["New Delhi"],
        "population": 1400000000,
        "currencies": {"INR": {"symbol": "₹"}}
    }
]"#;

// == Stub Upstream ==

#[derive(Clone, Default)]
struct Upstream {
    calls: Arc<AtomicUsize>,
}

async fn directory_handler(
    State(upstream): State<Upstream>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.calls.fetch_add(1, Ordering::SeqCst);

    if params.get("fullText").map(String::as_str) != Some("true")
        || params.get("fields").map(String::as_str)
            != Some("name,capital,currencies,population")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match name.as_str() {
        "India" => (StatusCode::OK, INDIA).into_response(),
        "Broken" => (StatusCode::OK, r#"[{"name":{}}]"#).into_response(),
        "Error" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "Slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, INDIA).into_response()
        }
        _ => (StatusCode::NOT_FOUND, r#"{"status":404,"message":"Not Found"}"#).into_response(),
    }
}

async fn spawn_upstream() -> (SocketAddr, Upstream) {
    let upstream = Upstream::default();
    let router = Router::new()
        .route("/v3.1/name/:name", get(directory_handler))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, upstream)
}

// == Helper Functions ==

struct TestApp {
    router: Router,
    cache: Arc<CacheStore>,
    upstream: Upstream,
}

async fn create_test_app(request_timeout: Duration) -> TestApp {
    let (addr, upstream) = spawn_upstream().await;
    let base_url = Url::parse(&format!("http://{addr}/v3.1")).unwrap();

    let cache = Arc::new(CacheStore::new());
    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let service = CountryService::new(Arc::new(fetcher), Arc::clone(&cache), base_url);
    let router = create_router(AppState::new(service, request_timeout, "India"));

    TestApp {
        router,
        cache,
        upstream,
    }
}

async fn get_request(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn wait_for_entry(cache: &CacheStore) {
    for _ in 0..200 {
        if !cache.is_empty() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("cache was never populated");
}

// == Search Endpoint Tests ==

#[tokio::test]
async fn test_search_success() {
    let app = create_test_app(Duration::from_secs(5)).await;

    let (status, json) = get_request(&app.router, "/api/countries/search?name=India").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "India");
    assert_eq!(json["capital"], "New Delhi");
    assert_eq!(json["currency"], "₹");
    assert_eq!(json["population"], 1_400_000_000u64);
}

#[tokio::test]
async fn test_search_defaults_to_india() {
    let app = create_test_app(Duration::from_secs(5)).await;

    let (status, json) = get_request(&app.router, "/api/countries/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "India");
}

#[tokio::test]
async fn test_search_second_request_served_from_cache() {
    let app = create_test_app(Duration::from_secs(5)).await;

    let (first, _) = get_request(&app.router, "/api/countries/search?name=India").await;
    wait_for_entry(&app.cache).await;
    let (second, json) = get_request(&app.router, "/api/countries/search?name=India").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(json["capital"], "New Delhi");
    assert_eq!(app.upstream.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_not_found() {
    let app = create_test_app(Duration::from_secs(5)).await;

    let (status, json) = get_request(&app.router, "/api/countries/search?name=Atlantis").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "country not found");
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_search_invalid_upstream_record() {
    let app = create_test_app(Duration::from_secs(5)).await;

    let (status, json) = get_request(&app.router, "/api/countries/search?name=Broken").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "could not validate country details");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_search_upstream_error() {
    let app = create_test_app(Duration::from_secs(5)).await;

    let (status, json) = get_request(&app.router, "/api/countries/search?name=Error").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "upstream service error");
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_search_deadline_exceeded() {
    let app = create_test_app(Duration::from_millis(200)).await;

    let (status, json) = get_request(&app.router, "/api/countries/search?name=Slow").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"], "request timeout");
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_search_failures_are_not_cached() {
    let app = create_test_app(Duration::from_secs(5)).await;

    get_request(&app.router, "/api/countries/search?name=Error").await;
    get_request(&app.router, "/api/countries/search?name=Error").await;

    assert_eq!(app.upstream.calls.load(Ordering::SeqCst), 2);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(Duration::from_secs(5)).await;

    // Miss, then hit once the entry lands
    get_request(&app.router, "/api/countries/search?name=India").await;
    wait_for_entry(&app.cache).await;
    get_request(&app.router, "/api/countries/search?name=India").await;

    let (status, json) = get_request(&app.router, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert!(json["hits"].as_u64().unwrap() >= 1);
    assert!(json["misses"].as_u64().unwrap() >= 1);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(Duration::from_secs(5)).await;

    let (status, json) = get_request(&app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
