use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub artifacts: ArtifactsConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

/// Locations of the startup artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub symptom_index_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// `*` allows every origin. Tighten before exposing publicly.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// OTLP collector; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl PredictionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(PredictionConfig {
            common: common_config,
            artifacts: ArtifactsConfig {
                model_path: get_env("MODEL_PATH", Some("model.json"), is_prod)?.into(),
                labels_path: get_env("LABELS_PATH", Some("labels.json"), is_prod)?.into(),
                symptom_index_path: get_env(
                    "SYMPTOM_INDEX_PATH",
                    Some("symptom_to_index.json"),
                    is_prod,
                )?
                .into(),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(
                    &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
            },
            observability: ObservabilityConfig {
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example ,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert!(parse_origins("").is_empty());
    }
}
