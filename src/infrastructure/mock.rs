use crate::domain::errors::NetworkError;
use crate::domain::features::ValidatedPayload;
use crate::domain::ports::PredictionClient;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use tracing::info;

/// Prediction client that replays queued outcomes.
///
/// Requests can be held open until `release` is called, which lets tests
/// observe the Submitting state and count overlapping calls.
#[derive(Clone)]
pub struct MockPredictionClient {
    outcomes: Arc<Mutex<VecDeque<Result<f64, NetworkError>>>>,
    requests: Arc<Mutex<Vec<ValidatedPayload>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    gate: Option<Arc<Semaphore>>,
}

impl MockPredictionClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Every request waits for a `release` before answering.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new()
        }
    }

    pub fn with_outcome(self, outcome: Result<f64, NetworkError>) -> Self {
        self.push_outcome(outcome);
        self
    }

    pub fn push_outcome(&self, outcome: Result<f64, NetworkError>) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
    }

    /// Let `n` held requests proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn requests(&self) -> Vec<ValidatedPayload> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MockPredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionClient for MockPredictionClient {
    async fn predict(&self, payload: &ValidatedPayload) -> Result<f64, NetworkError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(*payload);

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(gate) = &self.gate
            && let Ok(permit) = gate.acquire().await
        {
            permit.forget();
        }

        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(NetworkError::Transport {
                    reason: "mock has no scripted outcome".to_string(),
                })
            });

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        info!("MockPredictionClient answered: {:?}", outcome);
        outcome
    }
}
