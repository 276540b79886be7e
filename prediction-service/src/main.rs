use prediction_service::config::PredictionConfig;
use prediction_service::services::init_metrics;
use prediction_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PredictionConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "prediction-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    let application = Application::build(config)
        .await
        .map_err(|e| anyhow::anyhow!("Startup failed: {}", e))?;

    application.run_until_stopped().await?;

    Ok(())
}
