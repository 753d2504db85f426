//! Prediction dispatch: normalize, score with the loaded model, decide.

use std::sync::Arc;

use heartcheck_core::{ClinicalRecord, FeatureNormalizer, PredictionError};

use crate::estimator::PositiveClassEstimator;
use crate::loaded::{LoadedModel, ModelKind};
use crate::result::PredictionResult;

/// Immutable prediction pipeline built once at start-up.
///
/// `predict` is a pure function of the record and the artifacts captured
/// here, so a dispatcher can be shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct PredictionDispatcher {
    normalizer: FeatureNormalizer,
    model: Option<Arc<LoadedModel>>,
}

impl PredictionDispatcher {
    pub fn new(normalizer: FeatureNormalizer, model: Option<Arc<LoadedModel>>) -> Self {
        Self { normalizer, model }
    }

    pub fn normalizer(&self) -> &FeatureNormalizer {
        &self.normalizer
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_deref()
    }

    pub fn model_kind(&self) -> Option<ModelKind> {
        self.model.as_ref().map(|m| m.kind())
    }

    pub fn predict(&self, record: &ClinicalRecord) -> Result<PredictionResult, PredictionError> {
        let model = self.model.as_ref().ok_or(PredictionError::ModelUnavailable)?;

        let features = self.normalizer.normalize(record)?;
        let p = model.estimate_positive_probability(&features)?;

        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PredictionError::inference(format!(
                "{} returned probability {p} outside [0, 1]",
                model.kind()
            )));
        }

        let result = PredictionResult::from_probability(p);
        tracing::debug!(
            model_kind = %model.kind(),
            prediction = %result.prediction,
            probability = result.probability,
            "prediction computed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartcheck_core::{FEATURE_COUNT, FittedScaler, schema};
    use proptest::prelude::*;

    use crate::classifier::GenericClassifier;
    use crate::network::{Activation, DenseLayer, ProbabilisticNetwork};
    use crate::result::Diagnosis;

    fn identity_scaler() -> Arc<FittedScaler> {
        let columns = schema::feature_names().map(str::to_string).collect();
        Arc::new(FittedScaler::new(columns, vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap())
    }

    /// A network that ignores its input and outputs `p`.
    fn constant_network(p: f64) -> LoadedModel {
        let logit = (p / (1.0 - p)).ln();
        ProbabilisticNetwork::new(vec![DenseLayer {
            weights: vec![vec![0.0; FEATURE_COUNT]],
            bias: vec![logit],
            activation: Activation::Sigmoid,
        }])
        .unwrap()
        .into()
    }

    fn baseline_record() -> ClinicalRecord {
        let values = [
            45.0, 0.0, 0.0, 0.0, 100.0, 0.0, 170.0, 70.0, 0.0, 1.0, 1.0, 0.0, 68.0, 0.0, 115.0, 75.0,
            0.0, 0.0, 0.0, 0.0,
        ];
        schema::feature_names()
            .zip(values)
            .fold(ClinicalRecord::new(), |r, (name, v)| r.with(name, v))
    }

    fn dispatcher(model: LoadedModel) -> PredictionDispatcher {
        PredictionDispatcher::new(FeatureNormalizer::new(identity_scaler()), Some(Arc::new(model)))
    }

    #[test]
    fn low_risk_record_is_normal() {
        let result = dispatcher(constant_network(0.12)).predict(&baseline_record()).unwrap();
        assert_eq!(result.prediction, Diagnosis::Normal);
        assert_eq!(result.probability, 12.0);
        assert_eq!(result.confidence, 88.0);
    }

    #[test]
    fn high_probability_is_heart_disease() {
        let result = dispatcher(constant_network(0.73)).predict(&baseline_record()).unwrap();
        assert_eq!(result.prediction, Diagnosis::HeartDisease);
        assert_eq!(result.probability, 73.0);
        assert_eq!(result.confidence, 73.0);
    }

    #[test]
    fn missing_age_propagates_unchanged() {
        let err = dispatcher(constant_network(0.3))
            .predict(&baseline_record().without("age"))
            .unwrap_err();
        assert_eq!(err, PredictionError::MissingField(vec!["age".to_string()]));
    }

    #[test]
    fn no_model_is_unavailable() {
        let d = PredictionDispatcher::new(FeatureNormalizer::new(identity_scaler()), None);
        assert_eq!(d.predict(&baseline_record()).unwrap_err(), PredictionError::ModelUnavailable);
        assert_eq!(d.model_kind(), None);
    }

    #[test]
    fn model_is_checked_before_scaler() {
        let d = PredictionDispatcher::new(FeatureNormalizer::unavailable("no scaler"), None);
        assert_eq!(d.predict(&baseline_record()).unwrap_err(), PredictionError::ModelUnavailable);
    }

    #[test]
    fn scaler_error_propagates_unchanged() {
        let d = PredictionDispatcher::new(
            FeatureNormalizer::unavailable("no scaler"),
            Some(Arc::new(constant_network(0.3))),
        );
        assert_eq!(
            d.predict(&baseline_record()).unwrap_err(),
            PredictionError::ScalerUnavailable("no scaler".to_string())
        );
    }

    #[test]
    fn hard_label_classifier_reports_full_confidence() {
        let clf = GenericClassifier::new(vec![0.01; FEATURE_COUNT], 0.0, false).unwrap();
        let result = dispatcher(clf.into()).predict(&baseline_record()).unwrap();
        assert_eq!(result.prediction, Diagnosis::HeartDisease);
        assert_eq!(result.probability, 100.0);
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn probabilistic_classifier_uses_logistic_output() {
        let clf = GenericClassifier::new(vec![0.0; FEATURE_COUNT], -1.0, true).unwrap();
        let d = dispatcher(clf.into());
        let result = d.predict(&baseline_record()).unwrap();
        assert_eq!(result.prediction, Diagnosis::Normal);
        // sigmoid(-1) = 0.268941...
        assert_eq!(result.probability, 26.89);
        assert_eq!(result.confidence, 73.11);
        assert_eq!(d.model_kind(), Some(ModelKind::GenericClassifier));
    }

    #[test]
    fn non_finite_features_surface_as_inference_error() {
        let clf = GenericClassifier::new(vec![1.0; FEATURE_COUNT], 0.0, true).unwrap();
        let record = baseline_record().with("age", f64::INFINITY).with("height", f64::NEG_INFINITY);
        let err = dispatcher(clf.into()).predict(&record).unwrap_err();
        assert!(matches!(err, PredictionError::Inference(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: predicting twice on the same inputs is byte-identical.
        #[test]
        fn predict_is_idempotent(
            values in prop::collection::vec(-200.0f64..200.0, FEATURE_COUNT),
            weights in prop::collection::vec(-0.05f64..0.05, FEATURE_COUNT),
        ) {
            let record = schema::feature_names()
                .zip(&values)
                .fold(ClinicalRecord::new(), |r, (name, v)| r.with(name, *v));
            let clf = GenericClassifier::new(weights, 0.1, true).unwrap();
            let d = dispatcher(clf.into());

            let first = serde_json::to_vec(&d.predict(&record).unwrap()).unwrap();
            let second = serde_json::to_vec(&d.predict(&record).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
