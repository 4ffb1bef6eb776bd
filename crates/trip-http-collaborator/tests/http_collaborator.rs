//! HTTP collaborator against an in-process fake backend

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::{json, Value};
use trip_http_collaborator::{HttpCollaborator, HttpCollaboratorConfig};
use trip_workflow::{
    CollaboratorError, ImageRequest, InFlight, PlanRequest, SearchCriteria, Stage,
    TripCollaborator, WorkflowError, WorkflowOrchestrator,
};

type Params = HashMap<String, String>;
type Seen = Arc<Mutex<Vec<(&'static str, Params)>>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn collaborator(base_url: &str) -> HttpCollaborator {
    HttpCollaborator::new(HttpCollaboratorConfig::with_base_url(base_url)).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn beach_criteria() -> SearchCriteria {
    SearchCriteria::new(date("2025-06-01"), date("2025-06-07"), 2000.0, "beach")
}

fn cancun() -> Value {
    json!({
        "depart_airport_code": "JFK",
        "destination_airport_code": "CUN",
        "is_direct_flight": true,
        "flight_numbers": ["AA 1021"],
        "total_duration": 245,
        "hotel_name": "Hotel Playa",
        "hotel_address": "Blvd Kukulcan km 9",
        "hotel_rating": 4.5,
        "remaining_budget": 500
    })
}

/// Backend that answers like the reference one and records every query
fn recording_backend(seen: Seen) -> Router {
    Router::new()
        .route(
            "/search_options",
            get({
                let seen = seen.clone();
                move |Query(params): Query<Params>| async move {
                    seen.lock().push(("search", params));
                    Json(json!({ "data": { "Cancun": cancun() } }))
                }
            }),
        )
        .route(
            "/chosen_destination_daily_plan",
            get({
                let seen = seen.clone();
                move |Query(params): Query<Params>| async move {
                    seen.lock().push(("plan", params));
                    Json(json!({ "data": "Day 1: Snorkeling\nDay 2: Resort" }))
                }
            }),
        )
        .route(
            "/dalle_image",
            get(move |Query(params): Query<Params>| async move {
                seen.lock().push(("images", params));
                Json(json!({ "data": ["https://img/1.png", "https://img/2.png"] }))
            }),
        )
}

#[tokio::test]
async fn test_full_workflow_over_http() {
    let seen: Seen = Arc::default();
    let base_url = serve(recording_backend(seen.clone())).await;
    let orchestrator = WorkflowOrchestrator::new(Arc::new(collaborator(&base_url)));

    orchestrator.submit_search(beach_criteria()).await.unwrap();
    let snapshot = orchestrator.snapshot();
    assert_eq!(snapshot.stage, Stage::ResultsReady);
    assert_eq!(snapshot.options["Cancun"].destination, "Cancun");
    assert_eq!(snapshot.options["Cancun"].remaining_budget, 500.0);
    assert_eq!(snapshot.options["Cancun"].total_duration, "245");

    orchestrator.select_destination("Cancun").await.unwrap();
    assert_eq!(
        orchestrator.snapshot().day_rows(),
        vec![
            ("Day 1".to_string(), "Snorkeling".to_string()),
            ("Day 2".to_string(), "Resort".to_string()),
        ]
    );

    orchestrator.fetch_images().await.unwrap();
    let snapshot = orchestrator.snapshot();
    assert_eq!(snapshot.stage, Stage::ImagesReady);
    assert_eq!(snapshot.images.len(), 2);

    let seen = seen.lock().clone();
    assert_eq!(seen.len(), 3);

    let (kind, search) = &seen[0];
    assert_eq!(*kind, "search");
    assert_eq!(search["start_date"], "2025-06-01");
    assert_eq!(search["end_date"], "2025-06-07");
    assert_eq!(search["budget"], "2000");
    assert_eq!(search["trip_type"], "beach");

    let (kind, plan) = &seen[1];
    assert_eq!(*kind, "plan");
    assert_eq!(plan["destination"], "Cancun");
    assert_eq!(plan["start_date"], "2025-06-01");
    assert_eq!(plan["end_date"], "2025-06-07");

    let (kind, images) = &seen[2];
    assert_eq!(*kind, "images");
    assert_eq!(images["destination"], "Cancun");
    assert_eq!(images["daily_plan"], "Day 1: Snorkeling\nDay 2: Resort");
}

#[tokio::test]
async fn test_listed_search_results() {
    let router = Router::new().route(
        "/search_options",
        get(|| async {
            let mut lisbon = cancun();
            lisbon["destination"] = "Lisbon".into();
            Json(json!({ "data": [lisbon] }))
        }),
    );
    let base_url = serve(router).await;

    let options = collaborator(&base_url)
        .search_destinations(&beach_criteria())
        .await
        .unwrap();
    assert_eq!(options.keys().collect::<Vec<_>>(), vec!["Lisbon"]);
}

#[tokio::test]
async fn test_backend_error_fails_the_step() {
    let router = Router::new().route(
        "/search_options",
        get(|| async { Json(json!({ "error": "serpapi quota exceeded" })) }),
    );
    let base_url = serve(router).await;
    let orchestrator = WorkflowOrchestrator::new(Arc::new(collaborator(&base_url)));

    let err = orchestrator.submit_search(beach_criteria()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Collaborator(CollaboratorError::Backend(ref m)) if m == "serpapi quota exceeded"
    ));

    let snapshot = orchestrator.snapshot();
    assert_eq!(
        snapshot.stage,
        Stage::Failed {
            from: InFlight::Searching
        }
    );
    assert_eq!(
        snapshot.last_error.as_deref(),
        Some("Backend error: serpapi quota exceeded")
    );
}

#[tokio::test]
async fn test_detail_is_a_rejection() {
    let router = Router::new().route(
        "/dalle_image",
        get(|| async { Json(json!({ "detail": "daily_plan is required" })) }),
    );
    let base_url = serve(router).await;

    let err = collaborator(&base_url)
        .images(&ImageRequest {
            destination: "Cancun".to_string(),
            daily_plan: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Rejected(ref m) if m == "daily_plan is required"));
}

#[tokio::test]
async fn test_query_validation_failure_is_a_rejection() {
    let router = Router::new().route(
        "/search_options",
        get(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "detail": [{
                        "loc": ["query", "trip_type"],
                        "msg": "field required",
                        "type": "value_error.missing"
                    }]
                })),
            )
        }),
    );
    let base_url = serve(router).await;

    let err = collaborator(&base_url)
        .search_destinations(&beach_criteria())
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Rejected(ref m) if m.contains("field required")));
}

#[tokio::test]
async fn test_client_error_without_detail_keeps_status() {
    let router = Router::new().route(
        "/dalle_image",
        get(|| async { (StatusCode::NOT_FOUND, "Not Found") }),
    );
    let base_url = serve(router).await;

    let err = collaborator(&base_url)
        .images(&ImageRequest {
            destination: "Cancun".to_string(),
            daily_plan: "Day 1: Snorkeling".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_error_status() {
    let router = Router::new().route(
        "/chosen_destination_daily_plan",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
    );
    let base_url = serve(router).await;

    let err = collaborator(&base_url)
        .daily_plan(&PlanRequest {
            destination: "Cancun".to_string(),
            start_date: date("2025-06-01"),
            end_date: date("2025-06-07"),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CollaboratorError::Status { status: 500, ref body } if body == "Internal Server Error"
    ));
}

#[tokio::test]
async fn test_unparseable_payload() {
    let router = Router::new().route(
        "/search_options",
        get(|| async { Json(json!({ "data": "five destinations" })) }),
    );
    let base_url = serve(router).await;

    let err = collaborator(&base_url)
        .search_destinations(&beach_criteria())
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Decode(_)));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let router = Router::new().route(
        "/chosen_destination_daily_plan",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "data": "Day 1: Late" }))
        }),
    );
    let base_url = serve(router).await;
    let config = HttpCollaboratorConfig {
        timeout_secs: 1,
        ..HttpCollaboratorConfig::with_base_url(&base_url)
    };

    let err = HttpCollaborator::new(config)
        .unwrap()
        .daily_plan(&PlanRequest {
            destination: "Cancun".to_string(),
            start_date: date("2025-06-01"),
            end_date: date("2025-06-02"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Timeout));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = collaborator(&format!("http://{}", addr))
        .search_destinations(&beach_criteria())
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Transport(_)));
}
