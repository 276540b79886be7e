//! Symptom names in, ranked diseases out.

use crate::artifacts::{ArtifactError, LabelTable, SymptomIndex};
use crate::classifier::{Classifier, ClassifierError};
use crate::models::{FeatureVector, PredictionOutcome, RankedPrediction, Ranking};
use metrics::{counter, histogram};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Classifier failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Classifier returned {actual} probabilities for {expected} labels")]
    OutputMismatch { expected: usize, actual: usize },

    #[error("Classifier returned no positive probability")]
    DegenerateOutput,
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Read-only prediction context shared by every request.
pub struct Predictor {
    index: SymptomIndex,
    labels: LabelTable,
    classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("symptoms", &self.index.len())
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl Predictor {
    /// Fails when the classifier shape disagrees with the index or the labels.
    pub fn new(
        index: SymptomIndex,
        labels: LabelTable,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        if classifier.n_features() != index.len() {
            return Err(ArtifactError::invalid(
                "model",
                format!(
                    "expects {} features but the symptom index has {}",
                    classifier.n_features(),
                    index.len()
                ),
            ));
        }
        if classifier.n_classes() != labels.len() {
            return Err(ArtifactError::invalid(
                "model",
                format!(
                    "predicts {} classes but the label table has {}",
                    classifier.n_classes(),
                    labels.len()
                ),
            ));
        }

        Ok(Self {
            index,
            labels,
            classifier,
        })
    }

    pub fn symptom_count(&self) -> usize {
        self.index.len()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn encode<S: AsRef<str>>(&self, names: &[S]) -> FeatureVector {
        self.index.encode(names)
    }

    pub fn predict<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<PredictionOutcome, PredictionError> {
        let features = self.encode(names);
        let recognized = features.active_count();

        if recognized == 0 {
            tracing::debug!(submitted = names.len(), "No recognized symptoms");
            counter!("predictions_total", "outcome" => "no_valid_symptoms").increment(1);
            return Ok(PredictionOutcome::NoValidSymptoms);
        }

        let start = Instant::now();
        let proba = self.classifier.predict_proba(&features)?;
        histogram!("prediction_inference_seconds").record(start.elapsed().as_secs_f64());

        if proba.len() != self.labels.len() {
            return Err(PredictionError::OutputMismatch {
                expected: self.labels.len(),
                actual: proba.len(),
            });
        }

        let ranking = Ranking::new(self.rank(&proba)).ok_or(PredictionError::DegenerateOutput)?;

        tracing::debug!(
            submitted = names.len(),
            recognized,
            candidates = ranking.predictions().len(),
            top = %ranking.top().disease,
            "Prediction ranked"
        );
        counter!("predictions_total", "outcome" => "ranked").increment(1);

        Ok(PredictionOutcome::Ranked(ranking))
    }

    /// Positive probabilities, rounded, sorted descending. `sort_by` is stable,
    /// so ties keep label order.
    fn rank(&self, proba: &[f64]) -> Vec<RankedPrediction> {
        let mut ranked: Vec<RankedPrediction> = proba
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > 0.0)
            .filter_map(|(position, &p)| {
                let confidence = round_confidence(p);
                let disease = self.labels.get(position)?;
                (confidence > 0.0).then(|| RankedPrediction {
                    disease: disease.to_string(),
                    confidence,
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ranked
    }
}

/// Round to 4 decimal places.
///
/// Rounds the exact binary value, half to even: `0.00035` is stored just below
/// the half and becomes `0.0003`.
pub fn round_confidence(p: f64) -> f64 {
    format!("{:.4}", p).parse().unwrap_or(p)
}
