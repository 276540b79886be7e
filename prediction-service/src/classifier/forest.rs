//! Random forest inference over flat node arrays.
//!
//! Each tree is a vector of nodes rooted at index 0. Split nodes send a row
//! left when `x[feature] <= threshold`. Leaves carry per-class weights (sample
//! counts or fractions); the forest probability is the mean of the normalized
//! leaf distributions.

use super::{check_width, Classifier, ClassifierError};
use crate::artifacts::ArtifactError;
use crate::models::FeatureVector;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Leaf weights reached by `features`.
    ///
    /// Relies on `RandomForest::validate`: children always point forward, so
    /// the walk terminates.
    fn leaf_for(&self, features: &FeatureVector) -> &[f64] {
        let mut position = 0;
        loop {
            match &self.nodes[position] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    position = if features.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    fn validate(
        &self,
        tree: usize,
        n_features: usize,
        n_classes: usize,
    ) -> Result<(), ArtifactError> {
        let invalid = |reason: String| {
            ArtifactError::invalid("random forest", format!("tree {}: {}", tree, reason))
        };

        if self.nodes.is_empty() {
            return Err(invalid("has no nodes".to_string()));
        }

        for (position, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(invalid(format!(
                            "node {} splits on feature {} but the model has {}",
                            position, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!(
                            "node {} has a non-finite threshold",
                            position
                        )));
                    }
                    for child in [left, right] {
                        if *child <= position || *child >= self.nodes.len() {
                            return Err(invalid(format!(
                                "node {} has child {} outside {}..{}",
                                position,
                                child,
                                position + 1,
                                self.nodes.len()
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(invalid(format!(
                            "leaf {} has {} weights, expected {}",
                            position,
                            value.len(),
                            n_classes
                        )));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(invalid(format!(
                            "leaf {} has a negative or non-finite weight",
                            position
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<Tree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.n_features == 0 || self.n_classes == 0 {
            return Err(ArtifactError::invalid(
                "random forest",
                "n_features and n_classes must be positive",
            ));
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::invalid("random forest", "no trees defined"));
        }
        for (position, tree) in self.trees.iter().enumerate() {
            tree.validate(position, self.n_features, self.n_classes)?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        check_width(self.n_features, features)?;

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf_for(features);
            let total: f64 = leaf.iter().sum();
            if total > 0.0 {
                for (p, weight) in proba.iter_mut().zip(leaf) {
                    *p += weight / total;
                }
            }
        }

        let tree_count = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= tree_count);

        Ok(proba)
    }
}
