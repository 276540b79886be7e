use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use prediction_service::artifacts::{LabelTable, SymptomIndex};
use prediction_service::classifier::{Classifier, ClassifierError};
use prediction_service::models::FeatureVector;
use prediction_service::services::Predictor;
use prediction_service::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Stand-in model returning a fixed distribution.
struct FixedClassifier(Vec<f64>);

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        3
    }

    fn n_classes(&self) -> usize {
        self.0.len()
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        Ok(self.0.clone())
    }
}

fn router(proba: &[f64]) -> Router {
    let index = SymptomIndex::from_map(HashMap::from([
        ("fever".to_string(), 0),
        ("cough".to_string(), 1),
        ("fatigue".to_string(), 2),
    ]))
    .unwrap();
    let labels = LabelTable::new(vec!["Flu".into(), "Cold".into(), "Anemia".into()]).unwrap();
    let classifier = Arc::new(FixedClassifier(proba.to_vec()));
    let predictor = Predictor::new(index, labels, classifier).unwrap();

    build_router(AppState::new(predictor), &["*".to_string()])
}

async fn post_predict(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn fever_scenario_matches_reference_output() {
    let (status, body) = post_predict(
        router(&[0.7, 0.2, 0.1]),
        json!({"symptom_names": ["fever"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "top_prediction": "Flu",
            "confidence": 0.7,
            "ranked_predictions": [
                {"disease": "Flu", "confidence": 0.7},
                {"disease": "Cold", "confidence": 0.2},
                {"disease": "Anemia", "confidence": 0.1}
            ]
        })
    );
}

#[tokio::test]
async fn empty_input_is_in_band_error() {
    let (status, body) =
        post_predict(router(&[0.7, 0.2, 0.1]), json!({"symptom_names": []})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "No valid symptoms provided."}));
}

#[tokio::test]
async fn unknown_input_is_in_band_error() {
    let (status, body) =
        post_predict(router(&[0.7, 0.2, 0.1]), json!({"symptom_names": ["xyz"]})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "No valid symptoms provided."}));
}

#[tokio::test]
async fn degenerate_model_output_is_server_error() {
    let (status, body) =
        post_predict(router(&[0.0, 0.0, 0.0]), json!({"symptom_names": ["fever"]})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = router(&[0.7, 0.2, 0.1])
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
