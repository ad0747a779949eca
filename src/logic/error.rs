//! Benchmark Error Type
//!
//! One crate-local error enum. The only fatal precondition is a missing
//! dataset; probe failures are absorbed inside the probe and never reach here.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum BenchError {
    /// Dataset file absent - the run must not start
    DatasetNotFound(PathBuf),
    /// Dataset stream error (malformed CSV framing, read failure)
    Dataset(csv::Error),
    /// Output table write failure
    Report(csv::Error),
    /// Run summary serialization failure
    Summary(serde_json::Error),
    /// Any other I/O failure
    Io(io::Error),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::DatasetNotFound(path) => {
                write!(f, "Dataset file not found: {}", path.display())
            }
            BenchError::Dataset(e) => write!(f, "Dataset stream error: {}", e),
            BenchError::Report(e) => write!(f, "Output table error: {}", e),
            BenchError::Summary(e) => write!(f, "Run summary error: {}", e),
            BenchError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::DatasetNotFound(_) => None,
            BenchError::Dataset(e) | BenchError::Report(e) => Some(e),
            BenchError::Summary(e) => Some(e),
            BenchError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for BenchError {
    fn from(e: io::Error) -> Self {
        BenchError::Io(e)
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(e: serde_json::Error) -> Self {
        BenchError::Summary(e)
    }
}
