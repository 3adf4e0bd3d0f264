use crate::domain::errors::NetworkError;
use crate::domain::features::ValidatedPayload;
use crate::domain::ports::PredictionClient;
use crate::infrastructure::http_client_factory::HttpClientFactory;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

/// Response field carrying the predicted closing price
pub const PREDICTION_FIELD: &str = "predicted_close";

/// Longest slice of an error body kept for the user-facing message
const MAX_ERROR_BODY: usize = 200;

pub struct HttpPredictionClient {
    client: Client,
    url: Url,
}

impl HttpPredictionClient {
    pub fn new(url: Url) -> Self {
        Self::with_client(HttpClientFactory::create_client(), url)
    }

    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// GET the service root. The service answers with a plain banner when up.
    pub async fn check_health(&self) -> anyhow::Result<String> {
        let root = self.url.join("/").context("Failed to derive service root URL")?;

        let response = self
            .client
            .get(root.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach prediction service at {}", root))?;

        if !response.status().is_success() {
            anyhow::bail!("Prediction service health check returned status: {}", response.status());
        }

        let banner = response
            .text()
            .await
            .context("Failed to read health check response")?;
        info!("Prediction service at {} is up: {}", root, banner.trim());
        Ok(banner)
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, payload: &ValidatedPayload) -> Result<f64, NetworkError> {
        debug!("POST {}", self.url);

        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| NetworkError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| NetworkError::Transport {
            reason: format!("failed to read response body: {}", e),
        })?;

        parse_prediction_response(status, &body)
    }
}

/// Map a raw HTTP answer onto the prediction contract.
pub fn parse_prediction_response(status: StatusCode, body: &str) -> Result<f64, NetworkError> {
    if !status.is_success() {
        return Err(NetworkError::Status {
            status: status.as_u16(),
            body: truncate(body.trim(), MAX_ERROR_BODY),
        });
    }

    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| NetworkError::MalformedBody {
            reason: e.to_string(),
        })?;

    let object = json.as_object().ok_or_else(|| NetworkError::MalformedBody {
        reason: "expected a JSON object".to_string(),
    })?;

    object
        .get(PREDICTION_FIELD)
        .and_then(serde_json::Value::as_f64)
        .filter(|value| value.is_finite())
        .ok_or(NetworkError::MissingPrediction)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_predicted_close() {
        let value = parse_prediction_response(StatusCode::OK, r#"{"predicted_close": 152.34}"#);
        assert_eq!(value, Ok(152.34));
    }

    #[test]
    fn test_accepts_integer_prediction() {
        let value = parse_prediction_response(StatusCode::OK, r#"{"predicted_close": 152}"#);
        assert_eq!(value, Ok(152.0));
    }

    #[test]
    fn test_server_error_is_status_error() {
        let err = parse_prediction_response(StatusCode::INTERNAL_SERVER_ERROR, "boom\n")
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = parse_prediction_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, NetworkError::MalformedBody { .. }));

        let err = parse_prediction_response(StatusCode::OK, "[152.34]").unwrap_err();
        assert!(matches!(err, NetworkError::MalformedBody { .. }));
    }

    #[test]
    fn test_missing_or_non_numeric_field() {
        let err = parse_prediction_response(StatusCode::OK, r#"{"prediction": 1.0}"#).unwrap_err();
        assert_eq!(err, NetworkError::MissingPrediction);

        let err =
            parse_prediction_response(StatusCode::OK, r#"{"predicted_close": "1.0"}"#).unwrap_err();
        assert_eq!(err, NetworkError::MissingPrediction);

        let err =
            parse_prediction_response(StatusCode::OK, r#"{"predicted_close": null}"#).unwrap_err();
        assert_eq!(err, NetworkError::MissingPrediction);
    }

    #[test]
    fn test_long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        let err = parse_prediction_response(StatusCode::BAD_GATEWAY, &body).unwrap_err();
        match err {
            NetworkError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), MAX_ERROR_BODY + 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
