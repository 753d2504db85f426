//! Feed-forward network with a single sigmoid output unit.

use serde::{Deserialize, Serialize};

use heartcheck_core::{FEATURE_COUNT, FeatureVector, PredictionError};

use crate::estimator::{PositiveClassEstimator, check_width, sigmoid};
use crate::loaded::{ModelError, ModelKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    Linear,
}

impl Activation {
    fn apply(self, z: f64) -> f64 {
        match self {
            Activation::Relu => z.max(0.0),
            Activation::Sigmoid => sigmoid(z),
            Activation::Linear => z,
        }
    }
}

/// Fully-connected layer: `activation(W·x + b)`.
///
/// `weights` is row-major with one row per output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    pub fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    pub fn outputs(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let z = row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b;
                self.activation.apply(z)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticNetwork {
    layers: Vec<DenseLayer>,
}

impl ProbabilisticNetwork {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, ModelError> {
        let net = Self { layers };
        net.validate()?;
        Ok(net)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Check layer shapes chain from the 20 inputs down to one output.
    pub fn validate(&self) -> Result<(), ModelError> {
        let Some(last) = self.layers.last() else {
            return Err(ModelError::invalid("network has no layers"));
        };

        let mut width = FEATURE_COUNT;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.len() != layer.outputs() {
                return Err(ModelError::invalid(format!(
                    "layer {i}: {} weight rows but {} biases",
                    layer.weights.len(),
                    layer.outputs()
                )));
            }
            if layer.outputs() == 0 {
                return Err(ModelError::invalid(format!("layer {i} has no units")));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != width) {
                return Err(ModelError::invalid(format!(
                    "layer {i}, unit {row}: expected {width} weights, got {}",
                    layer.weights[row].len()
                )));
            }
            let finite = layer.weights.iter().flatten().chain(&layer.bias).all(|v| v.is_finite());
            if !finite {
                return Err(ModelError::invalid(format!("layer {i} has non-finite parameters")));
            }
            width = layer.outputs();
        }

        if last.outputs() != 1 {
            return Err(ModelError::invalid(format!(
                "output layer must have 1 unit, got {}",
                last.outputs()
            )));
        }
        if last.activation != Activation::Sigmoid {
            return Err(ModelError::invalid("output layer must use sigmoid activation"));
        }
        Ok(())
    }
}

impl PositiveClassEstimator for ProbabilisticNetwork {
    fn kind(&self) -> ModelKind {
        ModelKind::ProbabilisticNetwork
    }

    fn estimate_positive_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        check_width(FEATURE_COUNT, features)?;

        let mut activations = features.as_slice().to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }

        activations
            .first()
            .copied()
            .ok_or_else(|| PredictionError::inference("network produced no output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(inputs: usize, outputs: usize, w: f64, b: f64, activation: Activation) -> DenseLayer {
        DenseLayer {
            weights: vec![vec![w; inputs]; outputs],
            bias: vec![b; outputs],
            activation,
        }
    }

    fn features(v: f64) -> FeatureVector {
        FeatureVector::new(vec![v; FEATURE_COUNT])
    }

    #[test]
    fn zero_weights_yield_sigmoid_of_output_bias() {
        let net = ProbabilisticNetwork::new(vec![
            layer(FEATURE_COUNT, 16, 0.0, 0.0, Activation::Relu),
            layer(16, 8, 0.0, 0.0, Activation::Relu),
            layer(8, 1, 0.0, 0.0, Activation::Sigmoid),
        ])
        .unwrap();
        let p = net.estimate_positive_probability(&features(3.0)).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn relu_clamps_negative_hidden_activations() {
        // hidden = relu(sum(x) * -1) = 0 for positive x, so output = sigmoid(bias)
        let net = ProbabilisticNetwork::new(vec![
            layer(FEATURE_COUNT, 4, -1.0, 0.0, Activation::Relu),
            layer(4, 1, 10.0, 2.0, Activation::Sigmoid),
        ])
        .unwrap();
        let p = net.estimate_positive_probability(&features(1.0)).unwrap();
        assert!((p - sigmoid(2.0)).abs() < 1e-12);
    }

    #[test]
    fn positive_evidence_raises_probability() {
        let net = ProbabilisticNetwork::new(vec![
            layer(FEATURE_COUNT, 2, 0.1, 0.0, Activation::Relu),
            layer(2, 1, 1.0, -1.0, Activation::Sigmoid),
        ])
        .unwrap();
        let low = net.estimate_positive_probability(&features(0.0)).unwrap();
        let high = net.estimate_positive_probability(&features(2.0)).unwrap();
        assert!(low < 0.5 && high > 0.5);
    }

    #[test]
    fn rejects_shape_errors() {
        let err = ProbabilisticNetwork::new(vec![layer(19, 1, 0.0, 0.0, Activation::Sigmoid)]).unwrap_err();
        assert!(err.to_string().contains("expected 20 weights"));

        let err = ProbabilisticNetwork::new(vec![layer(FEATURE_COUNT, 2, 0.0, 0.0, Activation::Sigmoid)])
            .unwrap_err();
        assert!(err.to_string().contains("1 unit"));

        let err = ProbabilisticNetwork::new(vec![layer(FEATURE_COUNT, 1, 0.0, 0.0, Activation::Linear)])
            .unwrap_err();
        assert!(err.to_string().contains("sigmoid"));

        assert!(ProbabilisticNetwork::new(Vec::new()).is_err());
    }

    #[test]
    fn wrong_input_width_is_an_inference_error() {
        let net = ProbabilisticNetwork::new(vec![layer(FEATURE_COUNT, 1, 0.0, 0.0, Activation::Sigmoid)]).unwrap();
        let err = net
            .estimate_positive_probability(&FeatureVector::new(vec![0.0; 3]))
            .unwrap_err();
        assert!(matches!(err, PredictionError::Inference(_)));
    }
}
