use crate::models::{PredictionOutcome, RankedPrediction};
use serde::{Deserialize, Serialize};

pub const NO_VALID_SYMPTOMS: &str = "No valid symptoms provided.";

/// Any list is accepted, including an empty one or one full of duplicates.
/// Request size is bounded only by the body limit of the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct SymptomRequest {
    pub symptom_names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RankedResponse {
    pub top_prediction: String,
    pub confidence: f64,
    pub ranked_predictions: Vec<RankedPrediction>,
}

/// Body of a `POST /predict` reply. Both shapes are sent with 200 OK.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PredictionResponse {
    Ranked(RankedResponse),
    Rejected { error: String },
}

impl From<PredictionOutcome> for PredictionResponse {
    fn from(outcome: PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Ranked(ranking) => {
                let top = ranking.top().clone();
                PredictionResponse::Ranked(RankedResponse {
                    top_prediction: top.disease,
                    confidence: top.confidence,
                    ranked_predictions: ranking.into_predictions(),
                })
            }
            PredictionOutcome::NoValidSymptoms => PredictionResponse::Rejected {
                error: NO_VALID_SYMPTOMS.to_string(),
            },
        }
    }
}
