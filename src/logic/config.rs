//! Run Configuration
//!
//! Explicit configuration record passed into the runner at construction time.
//! No module-level mutable state - several runs can coexist without
//! cross-contamination.

use std::path::PathBuf;

use crate::constants;

/// The four classifier variants driven by the generic runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Hoeffding adaptive tree (the edge variant, logs CPU + battery)
    Tree,
    /// Adaptive random forest (10 members)
    Forest,
    /// Online multilayer perceptron
    Mlp,
    /// Logistic regression pipeline (one-hot + scaler + SGD)
    LogReg,
}

impl ModelKind {
    /// Parse a CLI tag. Accepts the common aliases.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "tree" | "ht" | "hoeffding" => Some(ModelKind::Tree),
            "forest" | "rf" | "arf" => Some(ModelKind::Forest),
            "mlp" | "neural" | "nn" => Some(ModelKind::Mlp),
            "logreg" | "linear" | "lr" => Some(ModelKind::LogReg),
            _ => None,
        }
    }

    /// Human-readable model name for logs and the run summary
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Tree => "Hoeffding Adaptive Tree",
            ModelKind::Forest => "Adaptive Random Forest",
            ModelKind::Mlp => "Online MLP",
            ModelKind::LogReg => "Logistic Regression",
        }
    }

    /// Per-variant default output file, matching the historical log names
    pub fn default_output(&self) -> &'static str {
        match self {
            ModelKind::Tree => "edge_experiment_log.csv",
            ModelKind::Forest => "rf_log.csv",
            ModelKind::Mlp => "mlp_log.csv",
            ModelKind::LogReg => "logreg_log.csv",
        }
    }

    /// The edge variant samples twice as often as the rest
    pub fn default_check_interval(&self) -> u64 {
        match self {
            ModelKind::Tree => constants::DEFAULT_EDGE_CHECK_INTERVAL,
            _ => constants::DEFAULT_CHECK_INTERVAL,
        }
    }
}

/// Configuration for exactly one benchmark run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub model: ModelKind,
    pub dataset: PathBuf,
    pub output: PathBuf,
    /// Telemetry cadence: a row is appended when `index % check_interval == 0`
    pub check_interval: u64,
    pub seed: u64,
}

impl RunConfig {
    /// Defaults for the given variant
    pub fn new(model: ModelKind, dataset: impl Into<PathBuf>) -> Self {
        Self {
            model,
            dataset: dataset.into(),
            output: PathBuf::from(model.default_output()),
            check_interval: model.default_check_interval(),
            seed: constants::DEFAULT_SEED,
        }
    }

    /// Defaults plus environment overrides (BENCH_DATASET, BENCH_LOG_FILE,
    /// BENCH_CHECK_INTERVAL, BENCH_SEED)
    pub fn from_env(model: ModelKind) -> Self {
        let mut config = Self::new(model, constants::get_dataset_path());
        if let Some(output) = constants::get_output_override() {
            config.output = PathBuf::from(output);
        }
        config.check_interval = constants::get_check_interval(model.default_check_interval());
        config.seed = constants::get_seed();
        config
    }
}
