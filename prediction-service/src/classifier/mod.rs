//! Pre-trained classifier behind a capability trait.
//!
//! The service only needs one thing from a model: a probability distribution
//! over the label table for a single feature vector. Concrete model families
//! live in their own modules and are selected by the `kind` field of the
//! model document.
//!
//! ```json
//! {
//!   "kind": "random_forest",
//!   "n_features": 3,
//!   "n_classes": 2,
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
//!         { "value": [4.0, 1.0] },
//!         { "value": [0.0, 5.0] }
//!     ] }
//!   ]
//! }
//! ```

pub mod forest;
pub mod linear;

pub use forest::{RandomForest, Tree, TreeNode};
pub use linear::LogisticRegression;

use crate::artifacts::{read_json, ArtifactError};
use crate::models::FeatureVector;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Feature vector has {actual} slots, model expects {expected}")]
    WidthMismatch { expected: usize, actual: usize },
}

/// Opaque probability oracle.
pub trait Classifier: Send + Sync {
    /// Length of the feature vector the model was trained on.
    fn n_features(&self) -> usize;

    /// Length of the returned distribution.
    fn n_classes(&self) -> usize;

    /// Class probabilities for a single row, index-aligned with the label table.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError>;
}

/// Serialized model document.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelDocument {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl ModelDocument {
    /// Check structural invariants and hand back a ready-to-serve classifier.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ArtifactError> {
        match self {
            ModelDocument::RandomForest(forest) => {
                forest.validate()?;
                Ok(Arc::new(forest))
            }
            ModelDocument::LogisticRegression(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ModelDocument::RandomForest(_) => "random_forest",
            ModelDocument::LogisticRegression(_) => "logistic_regression",
        }
    }
}

/// Load and validate a model document from disk.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ArtifactError> {
    let document: ModelDocument = read_json(path)?;
    let kind = document.kind();
    let classifier = document.into_classifier()?;

    tracing::info!(
        path = %path.display(),
        kind,
        features = classifier.n_features(),
        classes = classifier.n_classes(),
        "Loaded classifier"
    );

    Ok(classifier)
}

pub(crate) fn check_width(
    expected: usize,
    features: &FeatureVector,
) -> Result<(), ClassifierError> {
    if features.len() != expected {
        return Err(ClassifierError::WidthMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_random_forest_document() {
        let json = r#"{
            "kind": "random_forest",
            "n_features": 1,
            "n_classes": 2,
            "trees": [ { "nodes": [
                { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": [4.0, 1.0] },
                { "value": [0.0, 5.0] }
            ] } ]
        }"#;

        let classifier = serde_json::from_str::<ModelDocument>(json)
            .unwrap()
            .into_classifier()
            .unwrap();
        assert_eq!(classifier.n_features(), 1);
        assert_eq!(classifier.n_classes(), 2);

        let mut present = FeatureVector::zeros(1);
        present.set(0);
        assert_eq!(classifier.predict_proba(&present).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn parses_logistic_regression_document() {
        let json = r#"{
            "kind": "logistic_regression",
            "coefficients": [[1.0, 0.0], [0.0, 1.0]],
            "intercepts": [0.0, 0.0]
        }"#;

        let classifier = serde_json::from_str::<ModelDocument>(json)
            .unwrap()
            .into_classifier()
            .unwrap();
        assert_eq!(classifier.n_features(), 2);
        assert_eq!(classifier.n_classes(), 2);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"{ "kind": "neural_net", "layers": [] }"#;
        assert!(serde_json::from_str::<ModelDocument>(json).is_err());
    }

    #[test]
    fn width_check_reports_both_sizes() {
        let err = check_width(3, &FeatureVector::zeros(2)).unwrap_err();
        assert_eq!(err.to_string(), "Feature vector has 2 slots, model expects 3");
    }
}
