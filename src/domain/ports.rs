use crate::domain::errors::NetworkError;
use crate::domain::features::ValidatedPayload;
use async_trait::async_trait;

/// Access to the external close-price prediction service.
///
/// One call is one request with one outcome: implementations must not retry,
/// time out or cancel on their own.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, payload: &ValidatedPayload) -> Result<f64, NetworkError>;
}
