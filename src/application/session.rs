use crate::application::input_state::InputStateManager;
use crate::application::orchestrator::{PredictionOrchestrator, Submission, SubmissionState};
use crate::domain::errors::{NetworkError, SubmitError};
use crate::domain::features::{FeatureName, FeatureSet};
use crate::domain::history::{HistoryLedger, PredictionRecord};
use crate::domain::ports::PredictionClient;
use tracing::debug;

/// Everything one dashboard session owns. This is the surface the view talks to.
#[derive(Debug)]
pub struct Session {
    input: InputStateManager,
    orchestrator: PredictionOrchestrator,
    dark_mode: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Session {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            input: InputStateManager::new(),
            orchestrator: PredictionOrchestrator::new(),
            dark_mode,
        }
    }

    // --- Actions ---

    pub fn update_field(&mut self, feature: FeatureName, value: impl Into<String>) {
        self.input.update(feature, value);
    }

    pub fn clear_inputs(&mut self) {
        self.input.clear();
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        debug!("Theme switched (dark_mode = {})", self.dark_mode);
    }

    /// First half of a submit: validation and the move to Submitting.
    /// The caller runs the request and hands the result to `settle`.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        self.orchestrator.begin(&self.input)
    }

    pub fn settle(
        &mut self,
        submission: Submission,
        result: Result<f64, NetworkError>,
    ) -> Result<f64, SubmitError> {
        self.orchestrator.settle(submission, result)
    }

    pub async fn submit(&mut self, client: &dyn PredictionClient) -> Result<f64, SubmitError> {
        self.orchestrator.submit(&self.input, client).await
    }

    // --- Observable state ---

    pub fn features(&self) -> &FeatureSet {
        self.input.features()
    }

    pub fn field(&self, feature: FeatureName) -> &str {
        self.input.get(feature)
    }

    pub fn current_prediction(&self) -> Option<f64> {
        self.orchestrator.current_prediction()
    }

    pub fn history(&self) -> &[PredictionRecord] {
        self.orchestrator.history().all()
    }

    pub fn ledger(&self) -> &HistoryLedger {
        self.orchestrator.history()
    }

    pub fn is_submitting(&self) -> bool {
        self.orchestrator.is_submitting()
    }

    pub fn state(&self) -> SubmissionState {
        self.orchestrator.state()
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.orchestrator.last_error()
    }

    /// Whether `feature` was rejected by the most recent validation attempt.
    pub fn is_field_invalid(&self, feature: FeatureName) -> bool {
        matches!(self.last_error(), Some(SubmitError::Validation(e)) if e.is_invalid(feature))
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }
}

/// Two decimals, as shown on the prediction card.
pub fn format_prediction(value: f64) -> String {
    format!("{:.2}", value)
}
