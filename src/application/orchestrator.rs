use crate::application::input_state::InputStateManager;
use crate::domain::errors::{NetworkError, SubmitError};
use crate::domain::features::{FeatureSet, ValidatedPayload};
use crate::domain::history::{HistoryLedger, PredictionRecord};
use crate::domain::ports::PredictionClient;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Reason recorded when a submission is dropped before it was settled.
pub const CANCELLED_REASON: &str = "cancelled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Settled(Outcome),
}

#[derive(Debug)]
struct Ticket {
    generation: u64,
}

/// Proof that a request was started. Exactly one can exist at a time and it is
/// consumed by `PredictionOrchestrator::settle`.
///
/// Dropping it unsettled abandons the request; the orchestrator that issued it
/// stops reporting Submitting and records the cancellation on its next `begin`.
#[derive(Debug)]
pub struct Submission {
    ticket: Arc<Ticket>,
    snapshot: FeatureSet,
    payload: ValidatedPayload,
    submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn payload(&self) -> &ValidatedPayload {
        &self.payload
    }

    pub fn snapshot(&self) -> &FeatureSet {
        &self.snapshot
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }
}

/// Drives the Idle -> Submitting -> Settled cycle and owns its results.
#[derive(Debug)]
pub struct PredictionOrchestrator {
    state: SubmissionState,
    generation: u64,
    pending: Option<Weak<Ticket>>,
    current_prediction: Option<f64>,
    history: HistoryLedger,
    last_error: Option<SubmitError>,
}

impl Default for PredictionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionOrchestrator {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            generation: 0,
            pending: None,
            current_prediction: None,
            history: HistoryLedger::new(),
            last_error: None,
        }
    }

    /// An abandoned submission reads as a failed one.
    pub fn state(&self) -> SubmissionState {
        if self.state == SubmissionState::Submitting && !self.pending_alive() {
            return SubmissionState::Settled(Outcome::Failure);
        }
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    pub fn current_prediction(&self) -> Option<f64> {
        self.current_prediction
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    fn pending_alive(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|ticket| ticket.strong_count() > 0)
    }

    /// Settles a submission whose token was dropped as a cancelled transport
    /// failure. Returns whether anything was reclaimed.
    pub fn reclaim_abandoned(&mut self) -> bool {
        if self.state != SubmissionState::Submitting || self.pending_alive() {
            return false;
        }

        warn!(
            "Prediction request #{} was abandoned before it settled",
            self.generation
        );
        self.pending = None;
        self.last_error = Some(SubmitError::Network(NetworkError::Transport {
            reason: CANCELLED_REASON.to_string(),
        }));
        self.state = SubmissionState::Settled(Outcome::Failure);
        true
    }

    /// Validate the current inputs and enter Submitting.
    ///
    /// A reentrant call while a request is outstanding is rejected with
    /// `SubmitError::Busy` and leaves everything untouched.
    pub fn begin(&mut self, input: &InputStateManager) -> Result<Submission, SubmitError> {
        self.reclaim_abandoned();

        if self.is_submitting() {
            warn!("Submit ignored: a prediction request is already in flight");
            return Err(SubmitError::Busy);
        }

        match input.to_validated_payload() {
            Ok(payload) => {
                debug!("Validated payload: {:?}", payload);
                self.generation += 1;
                let ticket = Arc::new(Ticket {
                    generation: self.generation,
                });
                self.pending = Some(Arc::downgrade(&ticket));
                self.state = SubmissionState::Submitting;
                info!("Submitting prediction request #{}", self.generation);
                Ok(Submission {
                    ticket,
                    snapshot: input.snapshot(),
                    payload,
                    submitted_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!("Submit rejected: {}", e);
                let error = SubmitError::Validation(e);
                self.state = SubmissionState::Idle;
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    fn owns(&self, submission: &Submission) -> bool {
        self.state == SubmissionState::Submitting
            && self
                .pending
                .as_ref()
                .and_then(Weak::upgrade)
                .is_some_and(|ticket| Arc::ptr_eq(&ticket, &submission.ticket))
    }

    /// Apply the client's outcome for `submission`.
    ///
    /// Only the submission this orchestrator is waiting on is accepted. Any other
    /// token is rejected with `SubmitError::UnknownSubmission` and changes nothing.
    pub fn settle(
        &mut self,
        submission: Submission,
        result: Result<f64, NetworkError>,
    ) -> Result<f64, SubmitError> {
        if !self.owns(&submission) {
            warn!(
                "Ignoring result for submission #{}: not the request in flight",
                submission.generation()
            );
            return Err(SubmitError::UnknownSubmission);
        }
        self.pending = None;

        match result {
            Ok(predicted_close) => {
                let Submission {
                    snapshot,
                    submitted_at,
                    ..
                } = submission;
                self.current_prediction = Some(predicted_close);
                self.history
                    .append(PredictionRecord::new(snapshot, predicted_close, submitted_at));
                self.last_error = None;
                self.state = SubmissionState::Settled(Outcome::Success);
                info!(
                    "Predicted close: {:.2} ({} in history)",
                    predicted_close,
                    self.history.len()
                );
                Ok(predicted_close)
            }
            Err(e) => {
                warn!("Prediction failed: {}", e);
                let error = SubmitError::Network(e);
                self.last_error = Some(error.clone());
                self.state = SubmissionState::Settled(Outcome::Failure);
                Err(error)
            }
        }
    }

    /// `begin`, one client call, then `settle`.
    ///
    /// Dropping the future mid-request abandons the submission like dropping
    /// the token does.
    pub async fn submit(
        &mut self,
        input: &InputStateManager,
        client: &dyn PredictionClient,
    ) -> Result<f64, SubmitError> {
        let submission = self.begin(input)?;
        let result = client.predict(submission.payload()).await;
        self.settle(submission, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{FEATURE_COUNT, FeatureName};
    use crate::infrastructure::mock::MockPredictionClient;

    fn valid_input() -> InputStateManager {
        let mut input = InputStateManager::new();
        for feature in FeatureName::ALL {
            input.update(feature, "100");
        }
        input
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let orchestrator = PredictionOrchestrator::new();
        assert_eq!(orchestrator.state(), SubmissionState::Idle);
        assert!(orchestrator.current_prediction().is_none());
        assert!(orchestrator.history().is_empty());
        assert!(orchestrator.last_error().is_none());
    }

    #[test]
    fn test_begin_while_submitting_is_busy() {
        let mut orchestrator = PredictionOrchestrator::new();
        let input = valid_input();

        let _first = orchestrator.begin(&input).unwrap();
        assert!(orchestrator.is_submitting());

        let second = orchestrator.begin(&input);
        assert!(matches!(second, Err(SubmitError::Busy)));
        assert!(orchestrator.is_submitting());
    }

    #[test]
    fn test_validation_failure_returns_to_idle() {
        let mut orchestrator = PredictionOrchestrator::new();
        let mut input = valid_input();
        input.update(FeatureName::Close, "");

        let result = orchestrator.begin(&input);
        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert_eq!(orchestrator.state(), SubmissionState::Idle);
        assert!(matches!(
            orchestrator.last_error(),
            Some(SubmitError::Validation(_))
        ));
    }

    #[test]
    fn test_settle_success_records_snapshot_from_submit_time() {
        let mut orchestrator = PredictionOrchestrator::new();
        let mut input = valid_input();

        let submission = orchestrator.begin(&input).unwrap();
        // Edits after submit do not leak into the record.
        input.update(FeatureName::Close, "999");

        let value = orchestrator.settle(submission, Ok(101.5)).unwrap();
        assert_eq!(value, 101.5);
        assert_eq!(orchestrator.current_prediction(), Some(101.5));
        assert_eq!(orchestrator.state(), SubmissionState::Settled(Outcome::Success));

        let record = orchestrator.history().last().unwrap();
        assert_eq!(record.inputs().get(FeatureName::Close), "100");
        assert_eq!(record.predicted_close(), 101.5);
    }

    #[test]
    fn test_settle_failure_keeps_previous_results() {
        let mut orchestrator = PredictionOrchestrator::new();
        let input = valid_input();

        let submission = orchestrator.begin(&input).unwrap();
        orchestrator.settle(submission, Ok(50.0)).unwrap();

        let submission = orchestrator.begin(&input).unwrap();
        let result = orchestrator.settle(submission, Err(NetworkError::MissingPrediction));

        assert!(matches!(result, Err(SubmitError::Network(_))));
        assert_eq!(orchestrator.current_prediction(), Some(50.0));
        assert_eq!(orchestrator.history().len(), 1);
        assert_eq!(orchestrator.state(), SubmissionState::Settled(Outcome::Failure));
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut orchestrator = PredictionOrchestrator::new();
        let input = valid_input();

        let submission = orchestrator.begin(&input).unwrap();
        let _ = orchestrator.settle(
            submission,
            Err(NetworkError::Transport {
                reason: "refused".to_string(),
            }),
        );
        assert!(orchestrator.last_error().is_some());

        let submission = orchestrator.begin(&input).unwrap();
        orchestrator.settle(submission, Ok(1.0)).unwrap();
        assert!(orchestrator.last_error().is_none());
        assert_eq!(orchestrator.history().len(), 1);
    }

    #[test]
    fn test_submit_runs_one_request_and_settles() {
        let client = MockPredictionClient::new().with_outcome(Ok(42.0));
        let mut orchestrator = PredictionOrchestrator::new();

        let value = tokio_test::block_on(orchestrator.submit(&valid_input(), &client)).unwrap();

        assert_eq!(value, 42.0);
        assert_eq!(client.call_count(), 1);
        assert_eq!(orchestrator.history().len(), 1);
    }

    #[test]
    fn test_dropped_submission_is_reclaimed_as_cancelled() {
        let mut orchestrator = PredictionOrchestrator::new();
        let input = valid_input();

        drop(orchestrator.begin(&input).unwrap());
        assert!(!orchestrator.is_submitting());
        assert_eq!(orchestrator.state(), SubmissionState::Settled(Outcome::Failure));

        let submission = orchestrator.begin(&input).unwrap();
        assert_eq!(
            orchestrator.last_error(),
            Some(&SubmitError::Network(NetworkError::Transport {
                reason: CANCELLED_REASON.to_string(),
            }))
        );

        orchestrator.settle(submission, Ok(3.0)).unwrap();
        assert!(orchestrator.last_error().is_none());
        assert_eq!(orchestrator.history().len(), 1);
    }

    #[test]
    fn test_cancelled_submit_future_releases_the_session() {
        let client = MockPredictionClient::gated().with_outcome(Ok(8.0));
        let mut orchestrator = PredictionOrchestrator::new();
        let input = valid_input();

        {
            let mut pending = tokio_test::task::spawn(orchestrator.submit(&input, &client));
            assert!(pending.poll().is_pending());
        }

        assert!(!orchestrator.is_submitting());
        assert!(orchestrator.reclaim_abandoned());
        assert!(!orchestrator.reclaim_abandoned());
        assert!(matches!(
            orchestrator.last_error(),
            Some(SubmitError::Network(NetworkError::Transport { reason })) if reason == CANCELLED_REASON
        ));
        assert!(orchestrator.history().is_empty());
    }

    #[test]
    fn test_settle_rejects_submission_from_another_orchestrator() {
        let input = valid_input();
        let mut owner = PredictionOrchestrator::new();
        let mut other = PredictionOrchestrator::new();

        let foreign = owner.begin(&input).unwrap();
        let result = other.settle(foreign, Ok(9.0));

        assert_eq!(result, Err(SubmitError::UnknownSubmission));
        assert_eq!(other.state(), SubmissionState::Idle);
        assert!(other.history().is_empty());
        assert!(other.current_prediction().is_none());
        assert!(other.last_error().is_none());

        // The owner lost its token along the way and can submit again.
        assert!(owner.begin(&input).is_ok());
    }

    #[test]
    fn test_settle_rejects_token_while_other_orchestrator_is_in_flight() {
        let input = valid_input();
        let mut first = PredictionOrchestrator::new();
        let mut second = PredictionOrchestrator::new();

        let first_token = first.begin(&input).unwrap();
        let second_token = second.begin(&input).unwrap();
        // Both are generation 1; identity is what counts.
        assert_eq!(first_token.generation(), second_token.generation());

        assert_eq!(
            second.settle(first_token, Ok(1.0)),
            Err(SubmitError::UnknownSubmission)
        );
        assert!(second.is_submitting());
        assert_eq!(second.settle(second_token, Ok(2.0)), Ok(2.0));
        assert_eq!(second.history().len(), 1);
    }

    #[test]
    fn test_submission_carries_all_features() {
        let mut orchestrator = PredictionOrchestrator::new();
        let submission = orchestrator.begin(&valid_input()).unwrap();
        assert_eq!(submission.payload().iter().count(), FEATURE_COUNT);
        assert!(submission.payload().iter().all(|(_, v)| v == 100.0));
    }
}
