#![allow(dead_code)]

use prediction_service::config::{
    ArtifactsConfig, CorsConfig, ObservabilityConfig, PredictionConfig,
};
use prediction_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Configuration pointing at the fixture artifacts on a random port.
pub fn test_config() -> PredictionConfig {
    PredictionConfig {
        common: CoreConfig { port: 0 },
        artifacts: ArtifactsConfig {
            model_path: fixture("model.json"),
            labels_path: fixture("labels.json"),
            symptom_index_path: fixture("symptom_to_index.json"),
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with(config: PredictionConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to answer health checks
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn predict(&self, symptoms: &[&str]) -> reqwest::Response {
        self.client
            .post(format!("{}/predict", self.address))
            .json(&serde_json::json!({ "symptom_names": symptoms }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn predict_json(&self, symptoms: &[&str]) -> serde_json::Value {
        let response = self.predict(symptoms).await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn post_raw(&self, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/predict", self.address))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }
}
