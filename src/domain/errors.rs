use crate::domain::features::FeatureName;
use thiserror::Error;

/// Why a single feature failed numeric parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Empty,
    NotNumeric(String),
    NotFinite(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub feature: FeatureName,
    pub kind: IssueKind,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IssueKind::Empty => write!(f, "{} is empty", self.feature),
            IssueKind::NotNumeric(raw) => write!(f, "{} is not a number ('{}')", self.feature, raw),
            IssueKind::NotFinite(raw) => write!(f, "{} is not finite ('{}')", self.feature, raw),
        }
    }
}

/// One or more features could not be parsed as finite numbers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed numeric input: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn invalid_features(&self) -> impl Iterator<Item = FeatureName> + '_ {
        self.issues.iter().map(|issue| issue.feature)
    }

    pub fn is_invalid(&self, feature: FeatureName) -> bool {
        self.issues.iter().any(|issue| issue.feature == feature)
    }
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to the prediction service round-trip
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("Connection failed: {reason}")]
    Transport { reason: String },

    #[error("Prediction service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response body: {reason}")]
    MalformedBody { reason: String },

    #[error("Response is missing a numeric 'predicted_close' field")]
    MissingPrediction,
}

/// Everything a submit attempt can report back to the view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Prediction failed: {0}")]
    Network(#[from] NetworkError),

    #[error("A prediction request is already in flight")]
    Busy,

    #[error("Submission does not match the request in flight")]
    UnknownSubmission,
}
