//! Models Module - Online Classifiers
//!
//! The runner drives every variant through the same capability: predict on
//! the current record, then learn from its true label. Prediction strictly
//! precedes learning for each record - that ordering is what makes the
//! reported accuracy prequential.
//!
//! - `drift.rs` - Error-rate drift detector (shared by tree and forest)
//! - `hoeffding.rs` - Hoeffding adaptive tree
//! - `forest.rs` - Adaptive random forest (online bagging + majority vote)
//! - `mlp.rs` - Online multilayer perceptron over hashed feature vectors
//! - `logreg.rs` - Logistic regression pipeline (one-hot + scaler + SGD)

pub mod drift;
pub mod forest;
pub mod hoeffding;
pub mod logreg;
pub mod mlp;

pub use forest::AdaptiveRandomForest;
pub use hoeffding::HoeffdingAdaptiveTree;
pub use logreg::LogisticPipeline;
pub use mlp::OnlineMlp;

use crate::logic::config::ModelKind;
use crate::logic::dataset::Label;

/// Online classifier capability: a predict-then-learn pair over raw feature
/// mappings.
///
/// `predict_one` takes `&mut self` because online preprocessing state (the
/// running scaler inside the MLP and logistic pipelines) legitimately advances
/// while preparing a prediction. `None` means the model has no basis for a
/// prediction yet (cold start); the metric counts it as a miss.
pub trait OnlineClassifier {
    fn predict_one(&mut self, features: &[(String, String)]) -> Option<Label>;
    fn learn_one(&mut self, features: &[(String, String)], label: Label);
}

/// Construct the variant selected for this run
pub fn build(kind: ModelKind, seed: u64) -> Box<dyn OnlineClassifier> {
    match kind {
        ModelKind::Tree => Box::new(HoeffdingAdaptiveTree::default()),
        ModelKind::Forest => Box::new(AdaptiveRandomForest::new(10, seed)),
        ModelKind::Mlp => Box::new(OnlineMlp::new(seed)),
        ModelKind::LogReg => Box::new(LogisticPipeline::new()),
    }
}

/// Majority class over binary counts indexed `[normal, attack]`.
/// Ties resolve to `Normal`; empty counts yield no prediction.
pub(crate) fn majority(counts: [u64; 2]) -> Option<Label> {
    if counts[0] == 0 && counts[1] == 0 {
        None
    } else if counts[1] > counts[0] {
        Some(Label::Attack)
    } else {
        Some(Label::Normal)
    }
}

/// Index into `[normal, attack]` count arrays
pub(crate) fn class_index(label: Label) -> usize {
    match label {
        Label::Normal => 0,
        Label::Attack => 1,
    }
}
