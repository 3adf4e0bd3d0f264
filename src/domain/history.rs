use crate::domain::features::{FeatureName, FeatureSet};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One successful prediction: the inputs as submitted and the service's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    id: Uuid,
    sequence: usize,
    submitted_at: DateTime<Utc>,
    inputs: FeatureSet,
    predicted_close: f64,
}

impl PredictionRecord {
    pub fn new(inputs: FeatureSet, predicted_close: f64, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence: 0,
            submitted_at,
            inputs,
            predicted_close,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 0-based position in the ledger, assigned on append.
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn inputs(&self) -> &FeatureSet {
        &self.inputs
    }

    pub fn predicted_close(&self) -> f64 {
        self.predicted_close
    }
}

/// Append-only, chronologically ordered prediction history
#[derive(Debug, Default)]
pub struct HistoryLedger {
    records: Vec<PredictionRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds at the end and stamps the record's sequence. Returns the stored record.
    pub fn append(&mut self, mut record: PredictionRecord) -> &PredictionRecord {
        record.sequence = self.records.len();
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn all(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&PredictionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `[Close input, predicted close]` per record, in insertion order.
    /// A Close that does not parse is replaced by the record's sequence.
    pub fn chart_points(&self) -> Vec<[f64; 2]> {
        self.records
            .iter()
            .map(|record| {
                let x = record
                    .inputs
                    .get(FeatureName::Close)
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .unwrap_or(record.sequence as f64);
                [x, record.predicted_close]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(close: &str, predicted: f64) -> PredictionRecord {
        let mut fs = FeatureSet::new();
        fs.set(FeatureName::Close, close);
        PredictionRecord::new(fs, predicted, Utc::now())
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut ledger = HistoryLedger::new();
        ledger.append(record("100", 101.0));
        ledger.append(record("102", 103.0));
        ledger.append(record("99", 98.5));

        let predicted: Vec<f64> = ledger.all().iter().map(|r| r.predicted_close()).collect();
        assert_eq!(predicted, vec![101.0, 103.0, 98.5]);
        assert_eq!(ledger.last().unwrap().inputs().get(FeatureName::Close), "99");
    }

    #[test]
    fn test_identical_inputs_are_not_deduplicated() {
        let mut ledger = HistoryLedger::new();
        let first = ledger.append(record("100", 101.0)).id();
        let second = ledger.append(record("100", 101.0)).id();

        assert_eq!(ledger.len(), 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_chart_points_plot_prediction_against_close() {
        let mut ledger = HistoryLedger::new();
        ledger.append(record("150.2", 152.34));
        ledger.append(record(" 151 ", 153.0));

        assert_eq!(ledger.chart_points(), vec![[150.2, 152.34], [151.0, 153.0]]);
    }

    #[test]
    fn test_chart_points_fall_back_to_position() {
        let mut ledger = HistoryLedger::new();
        ledger.append(PredictionRecord::new(FeatureSet::new(), 10.0, Utc::now()));
        ledger.append(PredictionRecord::new(FeatureSet::new(), 11.0, Utc::now()));

        assert_eq!(ledger.chart_points(), vec![[0.0, 10.0], [1.0, 11.0]]);
    }

    #[test]
    fn test_append_assigns_sequence_from_position() {
        let mut ledger = HistoryLedger::new();
        let stored = ledger.append(record("100", 1.0)).sequence();
        assert_eq!(stored, 0);
        ledger.append(record("100", 2.0));
        ledger.append(record("abc", 3.0));

        let sequences: Vec<usize> = ledger.all().iter().map(|r| r.sequence()).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
        assert_eq!(ledger.chart_points()[2], [2.0, 3.0]);
    }
}
