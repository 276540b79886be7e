use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// Landing endpoint kept for browser checks.
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Lifeline AI backend is running!" }))
}

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "prediction-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe. State only exists once every artifact has loaded.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ready",
        "symptoms": state.predictor.symptom_count(),
        "labels": state.predictor.label_count()
    }))
}
