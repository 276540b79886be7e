use super::{read_json, ArtifactError};
use std::path::Path;

/// Disease names in model output order.
#[derive(Debug, Clone)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let labels: Vec<String> = read_json(path)?;
        let table = Self::new(labels)?;
        tracing::info!(path = %path.display(), labels = table.len(), "Loaded label table");
        Ok(table)
    }

    pub fn new(labels: Vec<String>) -> Result<Self, ArtifactError> {
        if labels.is_empty() {
            return Err(ArtifactError::invalid("label table", "no labels defined"));
        }
        Ok(Self { labels })
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_label_order() {
        let table = LabelTable::new(vec!["Flu".into(), "Cold".into(), "Anemia".into()]).unwrap();
        assert_eq!(table.get(0), Some("Flu"));
        assert_eq!(table.get(2), Some("Anemia"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn rejects_empty_table() {
        assert!(LabelTable::new(Vec::new()).is_err());
    }
}
