use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use lookup_service::classifier::ErrorClassifier;
use lookup_service::store::{Record, RecordStore};
use lookup_service::{build_router, AppState};
use service_core::error::ErrorEnvelope;
use std::sync::Arc;
use tower::util::ServiceExt;

fn router_with(records: Vec<Record>, classifier: ErrorClassifier) -> axum::Router {
    let store = Arc::new(RecordStore::initialize(records).unwrap());
    build_router(AppState::new(store, classifier))
}

async fn send(router: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

#[tokio::test]
async fn serves_records_from_the_given_store() {
    let router = router_with(vec![Record::new(10, "diez")], ErrorClassifier::default());

    let (status, _, body) = send(router, "/get/10").await;
    assert_eq!(status, StatusCode::OK);

    let record: Record = serde_json::from_slice(&body).unwrap();
    assert_eq!(record, Record::new(10, "diez"));
}

#[tokio::test]
async fn empty_store_reports_not_found() {
    let router = router_with(Vec::new(), ErrorClassifier::default());

    let (status, _, body) = send(router, "/get/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
    assert_eq!(envelope.message, "Record with id: 1 not found");
}

#[tokio::test]
async fn out_of_range_id_is_internal() {
    let router = router_with(Vec::new(), ErrorClassifier::default());

    let (status, _, body) = send(router, "/get/99999999999").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
    assert_eq!(envelope.error, "Internal Server Error");
}

#[tokio::test]
async fn negative_id_is_a_lookup_miss() {
    let router = router_with(Vec::new(), ErrorClassifier::default());

    let (status, _, _) = send(router, "/get/-5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_still_returns_envelope() {
    let router = router_with(Vec::new(), ErrorClassifier::default());

    let (status, _, body) = send(router, "/records/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
    assert_eq!(envelope.error, "Not Found");
    assert_eq!(envelope.details, "uri=/records/1");
}

#[tokio::test]
async fn unknown_route_envelope_carries_request_id() {
    let router = router_with(Vec::new(), ErrorClassifier::default());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/nowhere")
                .header("x-request-id", "fallback-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(envelope.request_id.as_deref(), Some("fallback-id"));
}

#[tokio::test]
async fn generated_request_id_matches_envelope() {
    let router = router_with(Vec::new(), ErrorClassifier::default());

    let (status, headers, body) = send(router, "/get/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let header = headers.get("x-request-id").unwrap().to_str().unwrap();
    let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
    assert_eq!(envelope.request_id.as_deref(), Some(header));
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let router = router_with(vec![Record::new(1, "uno")], ErrorClassifier::default());

    let (_, headers, _) = send(router, "/get/1").await;
    assert!(headers.get("x-request-id").is_some());
    assert_eq!(
        headers.get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}
