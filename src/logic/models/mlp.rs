//! Online Multilayer Perceptron
//!
//! Small dense network (40 -> 20 ReLU -> 1 sigmoid) trained one record at a
//! time with plain SGD on the log loss. The raw feature mapping is turned
//! into its fixed-length input by the hashing vectorizer, with numeric values
//! standardized by an incrementally-fit scaler first.
//!
//! The scaler advances during prediction (the vector has to be built to
//! predict at all), and the learning step reuses that same vector, so the
//! scaler sees each record exactly once per predict/learn cycle.

use ndarray::{Array1, Array2, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::logic::dataset::Label;
use crate::logic::features::{partition, HashingVectorizer, StandardScaler};

use super::OnlineClassifier;

const HIDDEN_UNITS: usize = 20;
const LEARNING_RATE: f64 = 0.01;

pub struct OnlineMlp {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array1<f64>,
    b2: f64,
    lr: f64,
    scaler: StandardScaler,
    vectorizer: HashingVectorizer,
    /// Input built during the last `predict_one`, consumed by `learn_one`
    last_input: Option<Array1<f64>>,
}

impl OnlineMlp {
    pub fn new(seed: u64) -> Self {
        Self::with_shape(HashingVectorizer::default(), HIDDEN_UNITS, seed)
    }

    pub fn with_shape(vectorizer: HashingVectorizer, hidden: usize, seed: u64) -> Self {
        let input_dim = vectorizer.dim();
        let mut rng = StdRng::seed_from_u64(seed);
        let bound1 = 1.0 / (input_dim as f64).sqrt();
        let bound2 = 1.0 / (hidden as f64).sqrt();

        Self {
            w1: Array2::from_shape_fn((hidden, input_dim), |_| rng.gen_range(-bound1..bound1)),
            b1: Array1::zeros(hidden),
            w2: Array1::from_shape_fn(hidden, |_| rng.gen_range(-bound2..bound2)),
            b2: 0.0,
            lr: LEARNING_RATE,
            scaler: StandardScaler::new(),
            vectorizer,
            last_input: None,
        }
    }

    /// Build the input vector, folding this record into the scaler
    fn vectorize(&mut self, features: &[(String, String)]) -> Array1<f64> {
        let (numeric, categorical) = partition(features);
        self.scaler.learn_one(&numeric);
        let scaled = self.scaler.transform_one(&numeric);
        self.vectorizer.vectorize(&scaled, &categorical)
    }

    fn forward(&self, input: &Array1<f64>) -> (Array1<f64>, Array1<f64>, f64) {
        let z1 = self.w1.dot(input) + &self.b1;
        let a1 = z1.mapv(|v| v.max(0.0));
        let z2 = self.w2.dot(&a1) + self.b2;
        (z1, a1, sigmoid(z2))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl OnlineClassifier for OnlineMlp {
    fn predict_one(&mut self, features: &[(String, String)]) -> Option<Label> {
        let input = self.vectorize(features);
        let (_, _, p) = self.forward(&input);
        self.last_input = Some(input);
        Some(if p > 0.5 { Label::Attack } else { Label::Normal })
    }

    fn learn_one(&mut self, features: &[(String, String)], label: Label) {
        let input = self
            .last_input
            .take()
            .unwrap_or_else(|| self.vectorize(features));

        let (z1, a1, p) = self.forward(&input);
        let target = match label {
            Label::Attack => 1.0,
            Label::Normal => 0.0,
        };

        // log loss + sigmoid collapse to (p - y) at the output
        let dz2 = p - target;
        let dw2 = &a1 * dz2;
        let da1 = &self.w2 * dz2;
        let dz1 = Zip::from(&da1)
            .and(&z1)
            .map_collect(|d, z| if *z > 0.0 { *d } else { 0.0 });
        let dw1 = Array2::from_shape_fn(self.w1.dim(), |(i, j)| dz1[i] * input[j]);

        self.w1.scaled_add(-self.lr, &dw1);
        self.b1.scaled_add(-self.lr, &dz1);
        self.w2.scaled_add(-self.lr, &dw2);
        self.b2 -= self.lr * dz2;
    }
}
