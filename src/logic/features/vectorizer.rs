//! Hashing-trick vectorizer
//!
//! Folds a mixed numeric/categorical mapping into a fixed-length dense vector:
//! a standardized numeric value lands in slot `crc32(key) mod D`, each
//! categorical value adds 1.0 to slot `crc32(value) mod D`. Keys colliding on
//! a slot sum their contributions - an accepted, lossy approximation.
//!
//! CRC32 keeps the mapping deterministic across processes and runs.

use ndarray::Array1;

/// Default output dimension, sized to the dataset's 42 feature columns
pub const DEFAULT_DIM: usize = 40;

#[derive(Debug, Clone)]
pub struct HashingVectorizer {
    dim: usize,
}

impl HashingVectorizer {
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "vectorizer dimension must be positive");
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn slot(&self, token: &str) -> usize {
        crc32fast::hash(token.as_bytes()) as usize % self.dim
    }

    /// Produce a dense vector of length `dim`. No normalization beyond the
    /// per-feature standardization the caller already applied.
    pub fn vectorize(
        &self,
        numeric: &[(String, f64)],
        categorical: &[(String, String)],
    ) -> Array1<f64> {
        let mut vector = Array1::zeros(self.dim);

        for (key, value) in numeric {
            vector[self.slot(key)] += value;
        }
        for (_, value) in categorical {
            vector[self.slot(value)] += 1.0;
        }

        vector
    }
}

impl Default for HashingVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}
