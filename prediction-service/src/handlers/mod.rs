//! HTTP handlers for prediction-service.

pub mod health;
pub mod metrics;
pub mod predict;

pub use health::{health_check, readiness_check, root};
pub use self::metrics::metrics_endpoint;
pub use predict::predict;
