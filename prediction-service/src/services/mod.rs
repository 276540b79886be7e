pub mod metrics;
pub mod predictor;

pub use self::metrics::{get_metrics, init_metrics};
pub use predictor::{round_confidence, PredictionError, Predictor};
