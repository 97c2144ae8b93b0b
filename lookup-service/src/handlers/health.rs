use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "lookup-service",
        "version": env!("CARGO_PKG_VERSION"),
        "records": state.store.len()
    }))
}
