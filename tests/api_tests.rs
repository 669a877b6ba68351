//! HTTP API tests driven through the router without a socket

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use travelplanner::api::AppState;
use travelplanner::{
    ItineraryPlanner, LlmClient, LlmProvider, PlannerSettings, Result, TravelAiError, web,
};

struct CannedClient;

#[async_trait]
impl LlmClient for CannedClient {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok("Day 1\n- Sagrada Familia tour\nDay 2\n- Park Güell in the morning\n\
            Cost Summary:\n- Tickets: €60"
            .to_string())
    }
}

struct UnreachableClient;

#[async_trait]
impl LlmClient for UnreachableClient {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(TravelAiError::api(
            "Gemini request failed: error sending request for url (http://10.0.0.1/?key=SECRETKEY123)",
        ))
    }
}

fn state_with(client: Arc<dyn LlmClient>) -> AppState {
    let planner = ItineraryPlanner::new(
        client,
        None,
        PlannerSettings {
            currency_symbol: "€".to_string(),
            model: "gemini-1.5-flash".to_string(),
            cache_ttl: std::time::Duration::from_secs(60),
        },
    );
    AppState::new(Some(Arc::new(planner)))
}

fn state_with_planner() -> AppState {
    state_with(Arc::new(CannedClient))
}

async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = web::app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = web::app(AppState::new(None)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_trip_duration() {
    let (status, body) = post_json(
        AppState::new(None),
        "/api/trip/duration",
        json!({"startDate": "2024-06-01", "endDate": "2024-06-10"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"diffDays": 10, "totalDays": 7}));

    let (_, body) = post_json(
        AppState::new(None),
        "/api/trip/duration",
        json!({"endDate": "2024-06-10"}),
    )
    .await;
    assert_eq!(body["diffDays"], 5);
}

#[tokio::test]
async fn test_parse_itinerary() {
    let (status, body) = post_json(
        AppState::new(None),
        "/api/itinerary/parse",
        json!({"text": "Day1\nVisit the old town\nCost Summary:\nTransport: $50\nTotal: $50"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "days": [{"title": "Day 1", "items": ["Visit the old town"]}],
            "costSummary": ["Transport: $50", "Total: $50"]
        })
    );
}

#[tokio::test]
async fn test_parse_strict_rejects_empty_itinerary() {
    let (status, body) = post_json(
        AppState::new(None),
        "/api/itinerary/parse",
        json!({"text": "nothing useful", "strict": true}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("no day sections"));
}

#[tokio::test]
async fn test_generate_without_provider_is_unavailable() {
    let (status, _) = post_json(
        AppState::new(None),
        "/api/itinerary/generate",
        json!({"location": "Barcelona"}),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_generate_itinerary() {
    let (status, body) = post_json(
        state_with_planner(),
        "/api/itinerary/generate",
        json!({
            "location": "Barcelona",
            "startDate": "2024-09-10",
            "endDate": "2024-09-11",
            "budget": 500,
            "participants": 2,
            "type": "cultural"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalDays"], 2);
    assert_eq!(body["provider"], "gemini");
    assert_eq!(body["cached"], false);
    assert_eq!(body["itinerary"]["days"][1]["items"][0], "Park Güell in the morning");
    assert_eq!(body["itinerary"]["costSummary"][0], "Tickets: €60");
}

#[tokio::test]
async fn test_generate_rejects_invalid_request() {
    let (status, body) = post_json(
        state_with_planner(),
        "/api/itinerary/generate",
        json!({"location": "Barcelona", "participants": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("participant"));
}

#[tokio::test]
async fn test_upstream_failure_hides_error_text() {
    let (status, body) = post_json(
        state_with(Arc::new(UnreachableClient)),
        "/api/itinerary/generate",
        json!({"location": "Barcelona"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("detail").is_none());
    assert!(!body.to_string().contains("SECRETKEY123"));
    assert!(body["error"].as_str().unwrap().contains("itinerary service"));
}

#[tokio::test]
async fn test_cors_headers_on_api_responses() {
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://planner.example")
        .body(Body::empty())
        .unwrap();
    let response = web::app(AppState::new(None)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let text = "a".repeat(300 * 1024);
    let payload = json!({ "text": text }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/api/itinerary/parse")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();
    let response = web::app(AppState::new(None)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
