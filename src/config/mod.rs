//! Configuration module for the dashboard.
//!
//! Loads structured configuration from environment variables, split into the
//! prediction service and the dashboard window.

mod dashboard_config;
mod prediction_config;

pub use dashboard_config::DashboardEnvConfig;
pub use prediction_config::{DEFAULT_PREDICTION_API_URL, PredictionEnvConfig, parse_api_url};

use anyhow::{Context, Result};
use url::Url;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Prediction service
    pub prediction_api_url: Url,
    pub prediction_health_check: bool,

    // Dashboard
    pub dark_mode: bool,
    pub log_capacity: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let prediction =
            PredictionEnvConfig::from_env().context("Failed to load prediction service config")?;
        let dashboard = DashboardEnvConfig::from_env();

        Ok(Self {
            prediction_api_url: prediction.api_url,
            prediction_health_check: prediction.health_check,

            dark_mode: dashboard.dark_mode,
            log_capacity: dashboard.log_capacity,
            window_width: dashboard.window_width,
            window_height: dashboard.window_height,
        })
    }
}
