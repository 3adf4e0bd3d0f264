//! Dashboard window and presentation settings.

use std::env;

/// Dashboard environment configuration
#[derive(Debug, Clone)]
pub struct DashboardEnvConfig {
    pub dark_mode: bool,
    pub log_capacity: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardEnvConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            log_capacity: 500,
            window_width: 1100.0,
            window_height: 800.0,
        }
    }
}

impl DashboardEnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dark_mode: env::var("DASHBOARD_DARK_MODE")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .unwrap_or(defaults.dark_mode),
            log_capacity: env::var("DASHBOARD_LOG_CAPACITY")
                .unwrap_or_else(|_| "500".to_string())
                .parse::<usize>()
                .unwrap_or(defaults.log_capacity),
            window_width: env::var("DASHBOARD_WIDTH")
                .unwrap_or_else(|_| "1100".to_string())
                .parse::<f32>()
                .ok()
                .filter(|v| is_window_extent(*v))
                .unwrap_or(defaults.window_width),
            window_height: env::var("DASHBOARD_HEIGHT")
                .unwrap_or_else(|_| "800".to_string())
                .parse::<f32>()
                .ok()
                .filter(|v| is_window_extent(*v))
                .unwrap_or(defaults.window_height),
        }
    }
}

/// `f32` parsing accepts `nan`, `inf` and negatives; none of them size a window.
fn is_window_extent(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
