//! Running accuracy metric for prequential evaluation

use crate::logic::dataset::Label;

/// Running `correct / total`, updated once per record. Never reset mid-run.
#[derive(Debug, Default, Clone)]
pub struct Accuracy {
    correct: u64,
    total: u64,
}

impl Accuracy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the prediction made *before* the learning step to the truth.
    /// A model that produced no prediction yet counts as incorrect.
    pub fn update(&mut self, truth: Label, prediction: Option<Label>) {
        self.total += 1;
        if prediction == Some(truth) {
            self.correct += 1;
        }
    }

    /// Accuracy in [0, 1]; 0.0 before the first update
    pub fn value(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
