pub mod feature_vector;
pub mod prediction;

pub use feature_vector::FeatureVector;
pub use prediction::{PredictionOutcome, RankedPrediction, Ranking};
