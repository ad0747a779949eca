//! Run Summary Manifest
//!
//! One JSON document per run, written next to the telemetry CSV. Records
//! which model ran, on which host, over which exact dataset (path + SHA-256),
//! and the final prequential accuracy - enough to tie any result file back
//! to the run that produced it when comparing devices.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::error::BenchError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub model: String,
    pub host: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dataset: String,
    pub dataset_sha256: String,
    pub output: String,
    pub check_interval: u64,
    pub total_records: u64,
    pub rows_written: u64,
    pub final_accuracy: f64,
}

impl RunSummary {
    /// Manifest path for a given telemetry CSV (`rf_log.csv` ->
    /// `rf_log.summary.json`)
    pub fn sidecar_path(output: &Path) -> PathBuf {
        output.with_extension("summary.json")
    }

    pub fn write(&self, path: &Path) -> Result<(), BenchError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// SHA-256 of the dataset file, streamed in 64 KB chunks
pub fn dataset_checksum(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub fn host_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
