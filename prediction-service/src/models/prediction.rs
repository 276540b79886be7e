use serde::{Deserialize, Serialize};

/// A single disease with its rounded confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPrediction {
    pub disease: String,
    pub confidence: f64,
}

/// Diseases sorted by descending confidence; never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    predictions: Vec<RankedPrediction>,
}

impl Ranking {
    /// Returns `None` for an empty list.
    pub fn new(predictions: Vec<RankedPrediction>) -> Option<Self> {
        if predictions.is_empty() {
            None
        } else {
            Some(Self { predictions })
        }
    }

    pub fn top(&self) -> &RankedPrediction {
        &self.predictions[0]
    }

    pub fn predictions(&self) -> &[RankedPrediction] {
        &self.predictions
    }

    pub fn into_predictions(self) -> Vec<RankedPrediction> {
        self.predictions
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Ranked(Ranking),
    /// None of the submitted names matched a known symptom.
    NoValidSymptoms,
}
