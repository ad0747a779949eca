//! Incrementally-fit standardizing scaler
//!
//! Keeps a running mean/variance per feature key (Welford update) and
//! standardizes values to `(x - mean) / std`. The running statistics advance
//! with every `learn_one` call - this is online-learning state in its own
//! right, shared by the MLP and logistic-regression pipelines.

use std::collections::HashMap;

const VARIANCE_FLOOR: f64 = 1e-12;

#[derive(Debug, Clone, Default)]
struct RunningStat {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStat {
    fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }
}

/// Per-key running standardizer
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    stats: HashMap<String, RunningStat>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one numeric mapping into the running statistics
    pub fn learn_one(&mut self, values: &[(String, f64)]) {
        for (key, value) in values {
            self.stats.entry(key.clone()).or_default().update(*value);
        }
    }

    /// Standardize a numeric mapping against the current statistics.
    ///
    /// Keys with (near-)zero variance, including keys seen only once or never,
    /// standardize to 0.0.
    pub fn transform_one(&self, values: &[(String, f64)]) -> Vec<(String, f64)> {
        values
            .iter()
            .map(|(key, value)| {
                let scaled = match self.stats.get(key) {
                    Some(stat) if stat.variance() > VARIANCE_FLOOR => {
                        (value - stat.mean) / stat.variance().sqrt()
                    }
                    _ => 0.0,
                };
                (key.clone(), scaled)
            })
            .collect()
    }

    /// Number of samples folded in for the given key
    pub fn count(&self, key: &str) -> u64 {
        self.stats.get(key).map_or(0, |s| s.count)
    }
}
