use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// The ten inputs the prediction model was trained on.
///
/// Declaration order is the canonical order: it drives form layout, payload key
/// order and the order validation issues are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    Close,
    Sma7,
    Sma21,
    Ema7,
    Ema21,
    Return,
    Volatility7,
    Volatility21,
    Lag1,
    Lag2,
}

pub const FEATURE_COUNT: usize = 10;

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::Close,
        FeatureName::Sma7,
        FeatureName::Sma21,
        FeatureName::Ema7,
        FeatureName::Ema21,
        FeatureName::Return,
        FeatureName::Volatility7,
        FeatureName::Volatility21,
        FeatureName::Lag1,
        FeatureName::Lag2,
    ];

    /// Key expected by the prediction service.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::Close => "Close",
            FeatureName::Sma7 => "SMA_7",
            FeatureName::Sma21 => "SMA_21",
            FeatureName::Ema7 => "EMA_7",
            FeatureName::Ema21 => "EMA_21",
            FeatureName::Return => "Return",
            FeatureName::Volatility7 => "Volatility_7",
            FeatureName::Volatility21 => "Volatility_21",
            FeatureName::Lag1 => "Lag_1",
            FeatureName::Lag2 => "Lag_2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeatureName::Close => "Previous Day Close Price",
            FeatureName::Sma7 => "7-Day Simple Moving Average",
            FeatureName::Sma21 => "21-Day Simple Moving Average",
            FeatureName::Ema7 => "7-Day Exponential Moving Average",
            FeatureName::Ema21 => "21-Day Exponential Moving Average",
            FeatureName::Return => "Previous Day Return (%)",
            FeatureName::Volatility7 => "7-Day Price Volatility",
            FeatureName::Volatility21 => "21-Day Price Volatility",
            FeatureName::Lag1 => "1-Day Lag Close Price",
            FeatureName::Lag2 => "2-Day Lag Close Price",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FeatureName::Close => "The closing price of the previous trading day.",
            FeatureName::Sma7 => "Average closing price over the last 7 days.",
            FeatureName::Sma21 => "Average closing price over the last 21 days.",
            FeatureName::Ema7 => {
                "Weighted average of last 7 days' closing prices (more weight on recent days)."
            }
            FeatureName::Ema21 => {
                "Weighted average of last 21 days' closing prices (more weight on recent days)."
            }
            FeatureName::Return => "Percentage change in price from the previous day.",
            FeatureName::Volatility7 => "Standard deviation of returns over the last 7 days.",
            FeatureName::Volatility21 => "Standard deviation of returns over the last 21 days.",
            FeatureName::Lag1 => "Closing price from one day ago.",
            FeatureName::Lag2 => "Closing price from two days ago.",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .iter()
            .find(|name| name.as_str() == s)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown feature name: {}", s))
    }
}

/// Raw, unvalidated text for every canonical feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    values: [String; FEATURE_COUNT],
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FeatureName) -> &str {
        &self.values[name.index()]
    }

    pub fn set(&mut self, name: FeatureName, raw: impl Into<String>) {
        self.values[name.index()] = raw.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, &str)> {
        FeatureName::ALL
            .iter()
            .map(move |name| (*name, self.get(*name)))
    }

    pub fn clear(&mut self) {
        for value in self.values.iter_mut() {
            value.clear();
        }
    }
}

/// Numeric feature values, every one finite.
///
/// Only produced by `InputStateManager::to_validated_payload`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedPayload {
    values: [f64; FEATURE_COUNT],
}

impl ValidatedPayload {
    pub(crate) fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, name: FeatureName) -> f64 {
        self.values[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL
            .iter()
            .map(move |name| (*name, self.get(*name)))
    }
}

impl Serialize for ValidatedPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}
