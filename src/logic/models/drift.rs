//! Error-rate drift detector
//!
//! DDM-style monitor (Gama et al. 2004): track the running error rate `p` and
//! its deviation `s`; when `p + s` climbs three deviations above the best
//! `p_min + s_min` seen so far, the concept under this detector has drifted.

const DRIFT_LEVEL: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct DriftDetector {
    min_samples: u64,
    n_samples: u64,
    errors: u64,
    min_p: f64,
    min_s: f64,
}

impl DriftDetector {
    pub fn new(min_samples: u64) -> Self {
        Self {
            min_samples,
            n_samples: 0,
            errors: 0,
            min_p: f64::MAX,
            min_s: f64::MAX,
        }
    }

    /// Fold in one observation; returns true when drift is signalled.
    /// The caller is expected to reset (replace) whatever the detector guards.
    pub fn update(&mut self, error: bool) -> bool {
        self.n_samples += 1;
        if error {
            self.errors += 1;
        }

        if self.n_samples < self.min_samples {
            return false;
        }

        let p = self.errors as f64 / self.n_samples as f64;
        let s = (p * (1.0 - p) / self.n_samples as f64).sqrt();

        if p + s < self.min_p + self.min_s {
            self.min_p = p;
            self.min_s = s;
        }

        p + s > self.min_p + DRIFT_LEVEL * self.min_s
    }
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::new(30)
    }
}
