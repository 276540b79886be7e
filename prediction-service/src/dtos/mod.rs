pub mod prediction;

pub use prediction::{PredictionResponse, RankedResponse, SymptomRequest, NO_VALID_SYMPTOMS};
