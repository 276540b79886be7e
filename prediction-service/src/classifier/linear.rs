use super::{check_width, Classifier, ClassifierError};
use crate::artifacts::ArtifactError;
use crate::models::FeatureVector;
use serde::Deserialize;

/// Multinomial logistic regression: `softmax(W·x + b)`.
///
/// `coefficients` has one row per class, each `n_features` wide.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let width = self.coefficients.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(ArtifactError::invalid(
                "logistic regression",
                "coefficient matrix is empty",
            ));
        }
        if let Some(row) = self.coefficients.iter().position(|row| row.len() != width) {
            return Err(ArtifactError::invalid(
                "logistic regression",
                format!("coefficient row {} is not {} wide", row, width),
            ));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(ArtifactError::invalid(
                "logistic regression",
                format!(
                    "{} intercepts for {} classes",
                    self.intercepts.len(),
                    self.coefficients.len()
                ),
            ));
        }
        let all_finite = self
            .coefficients
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ArtifactError::invalid(
                "logistic regression",
                "parameters must be finite",
            ));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.first().map(Vec::len).unwrap_or(0)
    }

    fn n_classes(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        check_width(self.n_features(), features)?;

        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                row.iter()
                    .enumerate()
                    .map(|(slot, weight)| weight * features.get(slot))
                    .sum::<f64>()
                    + intercept
            })
            .collect();

        // Shift by the max score so exp() cannot overflow.
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}
