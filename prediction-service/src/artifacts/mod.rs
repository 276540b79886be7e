//! Startup-time artifacts: symptom index, label table and the model document.
//!
//! All three are plain JSON files read once before the server starts serving.
//! Any failure here is fatal; the process refuses to start with partial state.

pub mod label_table;
pub mod symptom_index;

pub use label_table::LabelTable;
pub use symptom_index::{normalize_symptom, SymptomIndex};

use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {artifact}: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

impl ArtifactError {
    pub fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            artifact,
            reason: reason.into(),
        }
    }
}

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

/// Read and deserialize a JSON artifact.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
