use crate::dtos::{PredictionResponse, SymptomRequest};
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;

/// Rank diseases for the submitted symptom names.
///
/// A request with no recognized symptom is still a 200; the body carries an
/// `error` field instead of a ranking.
#[tracing::instrument(skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<SymptomRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected prediction body");
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    })?;

    let outcome = state.predictor.predict(&request.symptom_names)?;

    Ok(Json(outcome.into()))
}
