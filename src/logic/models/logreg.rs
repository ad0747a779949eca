//! Logistic Regression Pipeline
//!
//! The linear variant: one-hot encoding for categorical values, running
//! standardization for numeric values, then sparse SGD logistic regression
//! over string-keyed weights. Weights exist only for keys actually observed,
//! so the one-hot expansion never needs a vocabulary up front.

use std::collections::HashMap;

use crate::logic::dataset::Label;
use crate::logic::features::{partition, StandardScaler};

use super::OnlineClassifier;

const LEARNING_RATE: f64 = 0.01;

pub struct LogisticPipeline {
    weights: HashMap<String, f64>,
    bias: f64,
    lr: f64,
    scaler: StandardScaler,
    /// Encoding built during the last `predict_one`, reused by `learn_one`
    last_input: Option<Vec<(String, f64)>>,
}

impl LogisticPipeline {
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
            bias: 0.0,
            lr: LEARNING_RATE,
            scaler: StandardScaler::new(),
            last_input: None,
        }
    }

    /// Standardize numerics, one-hot categoricals as `"name=value"` keys
    fn encode(&mut self, features: &[(String, String)]) -> Vec<(String, f64)> {
        let (numeric, categorical) = partition(features);
        self.scaler.learn_one(&numeric);
        let mut encoded = self.scaler.transform_one(&numeric);
        encoded.reserve(categorical.len());
        for (name, value) in categorical {
            encoded.push((format!("{}={}", name, value), 1.0));
        }
        encoded
    }

    fn raw_score(&self, encoded: &[(String, f64)]) -> f64 {
        let dot: f64 = encoded
            .iter()
            .map(|(key, x)| self.weights.get(key).copied().unwrap_or(0.0) * x)
            .sum();
        dot + self.bias
    }

    pub fn weight(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(0.0)
    }
}

impl Default for LogisticPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl OnlineClassifier for LogisticPipeline {
    fn predict_one(&mut self, features: &[(String, String)]) -> Option<Label> {
        let encoded = self.encode(features);
        let p = sigmoid(self.raw_score(&encoded));
        self.last_input = Some(encoded);
        Some(if p > 0.5 { Label::Attack } else { Label::Normal })
    }

    fn learn_one(&mut self, features: &[(String, String)], label: Label) {
        let encoded = self
            .last_input
            .take()
            .unwrap_or_else(|| self.encode(features));

        let target = match label {
            Label::Attack => 1.0,
            Label::Normal => 0.0,
        };
        let gradient = sigmoid(self.raw_score(&encoded)) - target;

        for (key, x) in &encoded {
            *self.weights.entry(key.clone()).or_insert(0.0) -= self.lr * gradient * x;
        }
        self.bias -= self.lr * gradient;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(duration: &str, protocol: &str) -> Vec<(String, String)> {
        vec![
            ("0".to_string(), duration.to_string()),
            ("1".to_string(), protocol.to_string()),
        ]
    }

    #[test]
    fn test_untrained_pipeline_predicts_normal() {
        // zero weights, zero bias: p = 0.5, not strictly above the threshold
        let mut model = LogisticPipeline::new();
        assert_eq!(model.predict_one(&flow("0", "tcp")), Some(Label::Normal));
    }

    #[test]
    fn test_one_hot_weights_separate_protocols() {
        let mut model = LogisticPipeline::new();
        for i in 0..500 {
            let (x, y) = if i % 2 == 0 {
                (flow("0", "tcp"), Label::Attack)
            } else {
                (flow("0", "udp"), Label::Normal)
            };
            let _ = model.predict_one(&x);
            model.learn_one(&x, y);
        }
        assert_eq!(model.predict_one(&flow("0", "tcp")), Some(Label::Attack));
        assert_eq!(model.predict_one(&flow("0", "udp")), Some(Label::Normal));
        assert!(model.weight("1=tcp") > model.weight("1=udp"));
    }

    #[test]
    fn test_learn_without_predict_is_safe() {
        let mut model = LogisticPipeline::new();
        model.learn_one(&flow("3", "icmp"), Label::Attack);
        assert!(model.weight("1=icmp") > 0.0);
    }
}
