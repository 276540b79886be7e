//! Application startup and lifecycle management.
//!
//! Artifacts are loaded and cross-checked before the listener is bound, so a
//! running server always has a complete prediction context.

use crate::artifacts::{LabelTable, SymptomIndex};
use crate::classifier::load_classifier;
use crate::config::{ArtifactsConfig, PredictionConfig};
use crate::handlers::{health_check, metrics_endpoint, predict, readiness_check, root};
use crate::services::Predictor;
use axum::{
    body::Body,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer,
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

/// Load the three artifacts and check that they line up.
pub fn load_predictor(artifacts: &ArtifactsConfig) -> Result<Predictor, AppError> {
    let index = SymptomIndex::load(&artifacts.symptom_index_path)?;
    let labels = LabelTable::load(&artifacts.labels_path)?;
    let classifier = load_classifier(&artifacts.model_path)?;

    Ok(Predictor::new(index, labels, classifier)?)
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        // Outside TraceLayer so spans see the request id.
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PredictionConfig) -> Result<Self, AppError> {
        let predictor = load_predictor(&config.artifacts).map_err(|e| {
            tracing::error!("Failed to load prediction artifacts: {}", e);
            e
        })?;

        let router = build_router(AppState::new(predictor), &config.cors.allowed_origins);

        // Port 0 binds a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Prediction service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
