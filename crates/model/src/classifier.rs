//! Linear classifier fallback.
//!
//! Trained when the network toolchain is not available. Some exported
//! classifiers carry no probability calibration; those only produce a hard
//! label, which is reported as a probability of exactly 0 or 1.

use serde::{Deserialize, Serialize};

use heartcheck_core::{FEATURE_COUNT, FeatureVector, PredictionError};

use crate::estimator::{PositiveClassEstimator, check_width, sigmoid};
use crate::loaded::{ModelError, ModelKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericClassifier {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_supports_probability")]
    supports_probability: bool,
}

fn default_supports_probability() -> bool {
    true
}

impl GenericClassifier {
    pub fn new(coefficients: Vec<f64>, intercept: f64, supports_probability: bool) -> Result<Self, ModelError> {
        let clf = Self {
            coefficients,
            intercept,
            supports_probability,
        };
        clf.validate()?;
        Ok(clf)
    }

    pub fn supports_probability(&self) -> bool {
        self.supports_probability
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::invalid(format!(
                "classifier expects {FEATURE_COUNT} coefficients, got {}",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::invalid("classifier has non-finite parameters"));
        }
        Ok(())
    }

    /// Signed distance to the decision boundary, `w·x + b`.
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Hard class label (0 or 1).
    pub fn predict_label(&self, features: &FeatureVector) -> u8 {
        u8::from(self.decision_function(features) > 0.0)
    }
}

impl PositiveClassEstimator for GenericClassifier {
    fn kind(&self) -> ModelKind {
        ModelKind::GenericClassifier
    }

    fn estimate_positive_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        check_width(FEATURE_COUNT, features)?;

        if self.supports_probability {
            Ok(sigmoid(self.decision_function(features)))
        } else {
            Ok(f64::from(self.predict_label(features)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_features(v: f64) -> FeatureVector {
        FeatureVector::new(vec![v; FEATURE_COUNT])
    }

    #[test]
    fn probability_is_logistic_of_decision_function() {
        let clf = GenericClassifier::new(vec![0.05; FEATURE_COUNT], -0.5, true).unwrap();
        // 20 * 0.05 * 1.0 - 0.5 = 0.5
        let p = clf.estimate_positive_probability(&unit_features(1.0)).unwrap();
        assert!((p - sigmoid(0.5)).abs() < 1e-12);
    }

    #[test]
    fn without_probability_support_the_label_is_used() {
        let clf = GenericClassifier::new(vec![0.05; FEATURE_COUNT], -0.5, false).unwrap();
        assert_eq!(clf.estimate_positive_probability(&unit_features(1.0)).unwrap(), 1.0);
        assert_eq!(clf.estimate_positive_probability(&unit_features(0.0)).unwrap(), 0.0);
    }

    #[test]
    fn boundary_point_is_labelled_negative() {
        let clf = GenericClassifier::new(vec![0.0; FEATURE_COUNT], 0.0, false).unwrap();
        assert_eq!(clf.predict_label(&unit_features(1.0)), 0);
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let err = GenericClassifier::new(vec![0.0; 5], 0.0, true).unwrap_err();
        assert!(err.to_string().contains("20 coefficients"));
        assert!(GenericClassifier::new(vec![f64::NAN; FEATURE_COUNT], 0.0, true).is_err());
    }

    #[test]
    fn probability_support_defaults_to_true_when_absent() {
        let json = serde_json::json!({
            "coefficients": vec![0.0; FEATURE_COUNT],
            "intercept": 0.0,
        });
        let clf: GenericClassifier = serde_json::from_value(json).unwrap();
        assert!(clf.supports_probability());
    }
}
