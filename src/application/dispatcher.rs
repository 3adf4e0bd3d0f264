use crate::domain::errors::NetworkError;
use crate::domain::features::ValidatedPayload;
use crate::domain::ports::PredictionClient;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, error};

pub type PredictionReceiver = oneshot::Receiver<Result<f64, NetworkError>>;

/// Runs prediction requests on the background runtime so the UI thread never blocks.
#[derive(Clone)]
pub struct PredictionDispatcher {
    client: Arc<dyn PredictionClient>,
    runtime: Handle,
}

impl PredictionDispatcher {
    pub fn new(client: Arc<dyn PredictionClient>, runtime: Handle) -> Self {
        Self { client, runtime }
    }

    /// Spawn one request. The receiver resolves exactly once with its outcome.
    pub fn dispatch(&self, payload: ValidatedPayload) -> PredictionReceiver {
        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();

        self.runtime.spawn(async move {
            let result = client.predict(&payload).await;
            debug!("Prediction request finished (ok = {})", result.is_ok());
            if tx.send(result).is_err() {
                error!("Prediction result dropped: receiver is gone");
            }
        });

        rx
    }
}
