//! Central Configuration Constants
//!
//! Single source of truth for all benchmark defaults.
//! Every default can be overridden via environment variable at launch.

/// Default dataset file (NSL-KDD training split, headerless)
pub const DEFAULT_DATASET_FILE: &str = "KDDTrain+.txt";

/// Telemetry check interval for the edge (tree) variant
pub const DEFAULT_EDGE_CHECK_INTERVAL: u64 = 500;

/// Telemetry check interval for the remaining variants
pub const DEFAULT_CHECK_INTERVAL: u64 = 1000;

/// Default RNG seed (forest bagging, MLP weight init)
pub const DEFAULT_SEED: u64 = 42;

/// Number of columns in the dataset (41 features + label + difficulty)
pub const COLUMN_COUNT: usize = 43;

/// Index of the label column
pub const LABEL_COLUMN: usize = 41;

/// Raw label value mapped to `Label::Normal`; everything else is an attack
pub const NORMAL_LABEL: &str = "normal";

/// Command queried for battery state (Termux-API on Android)
pub const BATTERY_STATUS_COMMAND: &str = "termux-battery-status";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Edge-Bench";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get dataset path from environment or use default
pub fn get_dataset_path() -> String {
    std::env::var("BENCH_DATASET").unwrap_or_else(|_| DEFAULT_DATASET_FILE.to_string())
}

/// Get output CSV path from environment, if set
pub fn get_output_override() -> Option<String> {
    std::env::var("BENCH_LOG_FILE").ok()
}

/// Get check interval from environment or use the given default
pub fn get_check_interval(default: u64) -> u64 {
    std::env::var("BENCH_CHECK_INTERVAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Get RNG seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("BENCH_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}
