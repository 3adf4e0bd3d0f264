use crate::domain::errors::{FieldIssue, IssueKind, ValidationError};
use crate::domain::features::{FEATURE_COUNT, FeatureName, FeatureSet, ValidatedPayload};

/// Owns the form's raw text and turns it into a numeric payload on demand.
#[derive(Debug, Default)]
pub struct InputStateManager {
    features: FeatureSet,
}

impl InputStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored text for `feature`. Any text is accepted; numeric
    /// checks happen in `to_validated_payload`.
    pub fn update(&mut self, feature: FeatureName, raw: impl Into<String>) {
        self.features.set(feature, raw);
    }

    pub fn get(&self, feature: FeatureName) -> &str {
        self.features.get(feature)
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn snapshot(&self) -> FeatureSet {
        self.features.clone()
    }

    pub fn clear(&mut self) {
        self.features.clear();
    }

    /// Parse all ten fields. Fails with every offending field, in canonical order.
    pub fn to_validated_payload(&self) -> Result<ValidatedPayload, ValidationError> {
        let mut values = [0.0; FEATURE_COUNT];
        let mut issues = Vec::new();

        for (slot, (feature, raw)) in values.iter_mut().zip(self.features.iter()) {
            match parse_feature(raw) {
                Ok(value) => *slot = value,
                Err(kind) => issues.push(FieldIssue { feature, kind }),
            }
        }

        if issues.is_empty() {
            Ok(ValidatedPayload::from_values(values))
        } else {
            Err(ValidationError { issues })
        }
    }
}

fn parse_feature(raw: &str) -> Result<f64, IssueKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IssueKind::Empty);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| IssueKind::NotNumeric(raw.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(IssueKind::NotFinite(raw.to_string()))
    }
}
