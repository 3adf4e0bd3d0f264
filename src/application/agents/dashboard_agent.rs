use crate::application::dispatcher::{PredictionDispatcher, PredictionReceiver};
use crate::application::orchestrator::Submission;
use crate::application::session::Session;
use crate::domain::errors::{NetworkError, SubmitError};
use crossbeam_channel::Receiver;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::debug;

struct InFlight {
    submission: Submission,
    rx: PredictionReceiver,
}

/// UI-thread owner of the session: forwards view actions and applies request
/// completions as they arrive.
pub struct DashboardAgent {
    pub session: Session,
    dispatcher: PredictionDispatcher,
    in_flight: Option<InFlight>,

    // Log panel
    log_rx: Option<Receiver<String>>,
    pub log_lines: Vec<String>,
    log_capacity: usize,
    pub logs_collapsed: bool,
}

impl DashboardAgent {
    pub fn new(session: Session, dispatcher: PredictionDispatcher) -> Self {
        Self {
            session,
            dispatcher,
            in_flight: None,
            log_rx: None,
            log_lines: Vec::new(),
            log_capacity: 500,
            logs_collapsed: true,
        }
    }

    pub fn with_logs(mut self, log_rx: Receiver<String>, capacity: usize) -> Self {
        self.log_rx = Some(log_rx);
        self.log_capacity = capacity.max(1);
        self
    }

    /// Submit action from the view. Validation errors and `Busy` come back
    /// immediately; otherwise the request is handed to the dispatcher.
    pub fn request_prediction(&mut self) -> Result<(), SubmitError> {
        let submission = self.session.begin_submit()?;
        let rx = self.dispatcher.dispatch(*submission.payload());
        self.in_flight = Some(InFlight { submission, rx });
        Ok(())
    }

    pub fn has_pending_request(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Called once per frame.
    pub fn update(&mut self) {
        self.drain_logs();
        self.poll_prediction();
    }

    fn drain_logs(&mut self) {
        let Some(rx) = &self.log_rx else {
            return;
        };
        while let Ok(msg) = rx.try_recv() {
            self.log_lines.push(msg.trim_end().to_string());
        }

        // Keep history manageable
        if self.log_lines.len() > self.log_capacity {
            let excess = self.log_lines.len() - self.log_capacity;
            self.log_lines.drain(0..excess);
        }
    }

    fn poll_prediction(&mut self) {
        let Some(mut in_flight) = self.in_flight.take() else {
            return;
        };

        let result = match in_flight.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => {
                self.in_flight = Some(in_flight);
                return;
            }
            Err(TryRecvError::Closed) => Err(NetworkError::Transport {
                reason: "request task ended without a result".to_string(),
            }),
        };

        // Errors are kept on the session as `last_error` for the view.
        let settled = self.session.settle(in_flight.submission, result);
        debug!("Prediction settled (ok = {})", settled.is_ok());
    }
}
