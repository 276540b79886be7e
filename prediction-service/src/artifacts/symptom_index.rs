use super::{read_json, ArtifactError};
use crate::models::FeatureVector;
use std::collections::HashMap;
use std::path::Path;

/// Canonical form used for symptom lookups.
pub fn normalize_symptom(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized symptom name to feature slot. Slots cover `0..len()` exactly once.
#[derive(Debug, Clone)]
pub struct SymptomIndex {
    slots: HashMap<String, usize>,
}

impl SymptomIndex {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let raw: HashMap<String, usize> = read_json(path)?;
        let index = Self::from_map(raw)?;
        tracing::info!(path = %path.display(), symptoms = index.len(), "Loaded symptom index");
        Ok(index)
    }

    pub fn from_map(raw: HashMap<String, usize>) -> Result<Self, ArtifactError> {
        if raw.is_empty() {
            return Err(ArtifactError::invalid("symptom index", "no symptoms defined"));
        }

        let len = raw.len();
        let mut taken = vec![false; len];
        let mut slots = HashMap::with_capacity(len);

        for (name, slot) in raw {
            let key = normalize_symptom(&name);
            if key.is_empty() {
                return Err(ArtifactError::invalid("symptom index", "blank symptom name"));
            }
            if slot >= len {
                return Err(ArtifactError::invalid(
                    "symptom index",
                    format!("slot {} for '{}' is outside 0..{}", slot, name, len),
                ));
            }
            if std::mem::replace(&mut taken[slot], true) {
                return Err(ArtifactError::invalid(
                    "symptom index",
                    format!("slot {} is assigned more than once", slot),
                ));
            }
            if slots.insert(key, slot).is_some() {
                return Err(ArtifactError::invalid(
                    "symptom index",
                    format!("'{}' collides with another name after normalization", name),
                ));
            }
        }

        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot for an already-normalized name.
    pub fn slot(&self, normalized: &str) -> Option<usize> {
        self.slots.get(normalized).copied()
    }

    /// Encode raw names; unknown names and duplicates are ignored.
    pub fn encode<S: AsRef<str>>(&self, names: &[S]) -> FeatureVector {
        let mut vector = FeatureVector::zeros(self.len());
        for name in names {
            if let Some(slot) = self.slot(&normalize_symptom(name.as_ref())) {
                vector.set(slot);
            }
        }
        vector
    }
}
