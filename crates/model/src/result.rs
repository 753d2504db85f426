use std::fmt;

use serde::{Deserialize, Serialize};

/// Probabilities strictly above this are labelled positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    #[serde(rename = "Heart Disease")]
    HeartDisease,
    #[serde(rename = "Normal")]
    Normal,
}

impl Diagnosis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::HeartDisease => "Heart Disease",
            Diagnosis::Normal => "Normal",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one prediction request.
///
/// `probability` is the positive-class probability and `confidence` the
/// probability mass of the chosen label, both as percentages rounded to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Diagnosis,
    pub probability: f64,
    pub confidence: f64,
}

impl PredictionResult {
    /// Apply the decision rule to a positive-class probability in \[0, 1\].
    pub fn from_probability(p: f64) -> Self {
        let (prediction, confidence) = if p > DECISION_THRESHOLD {
            (Diagnosis::HeartDisease, p)
        } else {
            (Diagnosis::Normal, 1.0 - p)
        };

        Self {
            prediction,
            probability: percent(p),
            confidence: percent(confidence),
        }
    }
}

/// `x` as a percentage rounded to two decimals.
///
/// `x * 100` is rounded once, from its exact binary value (`{:.2}` is
/// correctly rounded, half-even on exact ties).
fn percent(x: f64) -> f64 {
    let scaled = x * 100.0;
    format!("{scaled:.2}").parse().unwrap_or(scaled)
}
