//! Prediction service configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use url::Url;

pub const DEFAULT_PREDICTION_API_URL: &str = "http://127.0.0.1:5000/predict";

/// Prediction service environment configuration
#[derive(Debug, Clone)]
pub struct PredictionEnvConfig {
    pub api_url: Url,
    pub health_check: bool,
}

impl PredictionEnvConfig {
    pub fn from_env() -> Result<Self> {
        let raw_url =
            env::var("PREDICTION_API_URL").unwrap_or_else(|_| DEFAULT_PREDICTION_API_URL.to_string());

        Ok(Self {
            api_url: parse_api_url(&raw_url)?,
            health_check: env::var("PREDICTION_HEALTH_CHECK")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .unwrap_or(true),
        })
    }
}

pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("Invalid PREDICTION_API_URL: {}", raw))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!(
            "Invalid PREDICTION_API_URL scheme: {}. Must be 'http' or 'https'",
            other
        ),
    }
}
