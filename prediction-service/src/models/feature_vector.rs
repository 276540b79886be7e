/// Binary symptom-presence encoding, positionally aligned with the symptom index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    slots: Vec<u8>,
}

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        Self {
            slots: vec![0; len],
        }
    }

    /// Mark a slot as present. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize) {
        if let Some(value) = self.slots.get_mut(slot) {
            *value = 1;
        }
    }

    pub fn get(&self, slot: usize) -> f64 {
        self.slots.get(slot).copied().map(f64::from).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of symptoms marked present.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|&&v| v == 1).count()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.slots
    }
}
