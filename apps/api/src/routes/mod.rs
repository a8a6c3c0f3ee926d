pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::scanner::handlers as scanner_handlers;
use crate::state::AppState;
use crate::submission::handlers as submission_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // JD scanning
        .route("/api/v1/jd/analyze", post(scanner_handlers::handle_analyze))
        .route("/api/v1/jd/correct", post(scanner_handlers::handle_correct))
        // Technology catalog
        .route("/api/v1/technologies", get(catalog_handlers::handle_search))
        .route(
            "/api/v1/technologies/refresh",
            post(catalog_handlers::handle_refresh),
        )
        .route(
            "/api/v1/technologies/submit",
            post(submission_handlers::handle_submit),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::{CatalogStore, StaticProvider};
    use crate::models::technology::Technology;
    use crate::scanner::FixedYearClock;

    fn catalog() -> Vec<Technology> {
        vec![
            Technology::new("React", 2013),
            Technology::new("Vue", 2014),
            Technology::new("LangChain", 2022),
            Technology::new("Kubernetes", 2014).with_aliases(["K8s"]),
        ]
    }

    fn test_state(provider: Vec<Technology>) -> AppState {
        AppState {
            catalog: CatalogStore::new(catalog()),
            catalog_provider: Arc::new(StaticProvider(provider)),
            clock: Arc::new(FixedYearClock(2024)),
            relay: None,
        }
    }

    async fn send(state: AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_state(vec![]), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_flags_impossible_claim() {
        let (status, body) = send(
            test_state(vec![]),
            Method::POST,
            "/api/v1/jd/analyze",
            Some(json!({ "jd_text": "React (12 years) and Vue, 3 years" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["invalid_count"], 1);
        assert_eq!(body["current_year"], 2024);
        let requirements = body["requirements"].as_array().unwrap();
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0]["technology"]["name"], "React");
        assert_eq!(requirements[0]["requested_years"], 12);
        assert_eq!(requirements[0]["max_possible_years"], 11);
        assert_eq!(requirements[0]["is_valid"], false);
        assert_eq!(requirements[1]["technology"]["name"], "Vue");
        assert_eq!(requirements[1]["requested_years"], 3);
    }

    #[tokio::test]
    async fn test_analyze_honours_requested_year() {
        let (_, body) = send(
            test_state(vec![]),
            Method::POST,
            "/api/v1/jd/analyze",
            Some(json!({ "jd_text": "React 12 years", "current_year": 2030 })),
        )
        .await;
        assert_eq!(body["invalid_count"], 0);
        assert_eq!(body["requirements"][0]["max_possible_years"], 17);
    }

    #[tokio::test]
    async fn test_analyze_accepts_extreme_year() {
        let (status, body) = send(
            test_state(vec![]),
            Method::POST,
            "/api/v1/jd/analyze",
            Some(json!({ "jd_text": "React 5 years", "current_year": i32::MIN })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["invalid_count"], 1);
        assert_eq!(body["requirements"][0]["max_possible_years"], i32::MIN);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_text() {
        let (status, body) = send(
            test_state(vec![]),
            Method::POST,
            "/api/v1/jd/analyze",
            Some(json!({ "jd_text": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_correct_returns_text_and_changelog() {
        let (status, body) = send(
            test_state(vec![]),
            Method::POST,
            "/api/v1/jd/correct",
            Some(json!({
                "jd_text": "Looking for a LangChain expert with 10+ years of experience"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["corrected_text"],
            "Looking for a LangChain expert with 2+ years of experience"
        );
        assert_eq!(
            body["changelog"],
            json!([{ "technology": "LangChain", "original": 10, "corrected": 2, "position": 14 }])
        );
    }

    #[tokio::test]
    async fn test_search_with_quick_check() {
        let (status, body) = send(
            test_state(vec![]),
            Method::GET,
            "/api/v1/technologies?q=k8s%2015",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["technologies"].as_array().unwrap().len(), 1);
        assert_eq!(body["quick_check"]["max_possible_years"], 10);
        assert_eq!(body["quick_check"]["is_valid"], false);
    }

    #[tokio::test]
    async fn test_search_without_query_lists_catalog() {
        let (_, body) = send(test_state(vec![]), Method::GET, "/api/v1/technologies", None).await;
        assert_eq!(body["technologies"].as_array().unwrap().len(), 4);
        assert!(body["quick_check"].is_null());
    }

    #[tokio::test]
    async fn test_refresh_swaps_catalog() {
        let state = test_state(vec![Technology::new("Rust", 2015)]);
        let (status, body) = send(
            state.clone(),
            Method::POST,
            "/api/v1/technologies/refresh",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(state.catalog.snapshot().await[0].name, "Rust");
    }

    #[tokio::test]
    async fn test_refresh_keeps_catalog_when_provider_is_empty() {
        let state = test_state(vec![]);
        let (status, _) = send(
            state.clone(),
            Method::POST,
            "/api/v1/technologies/refresh",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(state.catalog.snapshot().await.len(), 4);
    }

    #[tokio::test]
    async fn test_submit_without_relay_is_unavailable() {
        let (status, body) = send(
            test_state(vec![]),
            Method::POST,
            "/api/v1/technologies/submit",
            Some(json!({ "name": "Bun", "category": "Backend", "releaseYear": "2022" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_submit_validates_before_relaying() {
        let (status, _) = send(
            test_state(vec![]),
            Method::POST,
            "/api/v1/technologies/submit",
            Some(json!({ "name": "", "category": "Backend", "releaseYear": "2022" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
