//! Telemetry CSV Writer
//!
//! Append-only output table: one fixed header row, one row per checkpoint.
//! The file is truncated on open - each run owns its output wholesale.
//! Two schemas exist because the edge variant logs CPU and battery next to
//! the common accuracy/latency/RAM columns, and historical column order is
//! preserved for the downstream plotting tool.

use std::fs::File;
use std::path::Path;

use crate::logic::config::ModelKind;
use crate::logic::error::BenchError;

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSchema {
    /// `Sample_Count, Accuracy, Latency_ms, RAM_MB`
    Core,
    /// `Sample_Count, Accuracy, CPU_Percent, RAM_MB, Battery_Percent, Latency_ms`
    EdgeFull,
}

impl ReportSchema {
    pub fn for_model(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Tree => ReportSchema::EdgeFull,
            _ => ReportSchema::Core,
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            ReportSchema::Core => &["Sample_Count", "Accuracy", "Latency_ms", "RAM_MB"],
            ReportSchema::EdgeFull => &[
                "Sample_Count",
                "Accuracy",
                "CPU_Percent",
                "RAM_MB",
                "Battery_Percent",
                "Latency_ms",
            ],
        }
    }

    /// Whether rows of this schema carry battery/CPU readings
    pub fn wants_host_telemetry(&self) -> bool {
        matches!(self, ReportSchema::EdgeFull)
    }
}

/// One sampled checkpoint. Optional fields are only written by the edge
/// schema; a `None` there records a neutral reading.
#[derive(Debug, Clone)]
pub struct TelemetryRow {
    pub sample_index: u64,
    pub accuracy: f64,
    pub latency_ms: f64,
    pub ram_mb: f64,
    pub cpu_percent: Option<f32>,
    pub battery_percent: Option<f64>,
}

// ============================================================================
// WRITER
// ============================================================================

pub struct ReportWriter {
    writer: csv::Writer<File>,
    schema: ReportSchema,
    rows: u64,
}

impl ReportWriter {
    /// Truncate-on-open: a rerun over the same path starts a fresh table
    pub fn create(path: &Path, schema: ReportSchema) -> Result<Self, BenchError> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(schema.header())
            .map_err(BenchError::Report)?;

        Ok(Self {
            writer,
            schema,
            rows: 0,
        })
    }

    pub fn append(&mut self, row: &TelemetryRow) -> Result<(), BenchError> {
        let fields: Vec<String> = match self.schema {
            ReportSchema::Core => vec![
                row.sample_index.to_string(),
                format!("{:.6}", row.accuracy),
                format!("{:.3}", row.latency_ms),
                format!("{:.2}", row.ram_mb),
            ],
            ReportSchema::EdgeFull => vec![
                row.sample_index.to_string(),
                format!("{:.6}", row.accuracy),
                format!("{:.2}", row.cpu_percent.unwrap_or(0.0)),
                format!("{:.2}", row.ram_mb),
                format!("{:.2}", row.battery_percent.unwrap_or(0.0)),
                format!("{:.3}", row.latency_ms),
            ],
        };

        self.writer.write_record(&fields).map_err(BenchError::Report)?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and hand back the number of data rows written
    pub fn finish(mut self) -> Result<u64, BenchError> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(index: u64) -> TelemetryRow {
        TelemetryRow {
            sample_index: index,
            accuracy: 0.75,
            latency_ms: 1.234,
            ram_mb: 42.5,
            cpu_percent: Some(12.0),
            battery_percent: Some(88.0),
        }
    }

    #[test]
    fn test_core_schema_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rf_log.csv");

        let mut writer = ReportWriter::create(&path, ReportSchema::Core).unwrap();
        writer.append(&row(0)).unwrap();
        writer.append(&row(500)).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Sample_Count,Accuracy,Latency_ms,RAM_MB");
        assert_eq!(lines[1], "0,0.750000,1.234,42.50");
        assert!(lines[2].starts_with("500,"));
    }

    #[test]
    fn test_edge_schema_orders_columns_like_the_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("edge_experiment_log.csv");

        let mut writer = ReportWriter::create(&path, ReportSchema::EdgeFull).unwrap();
        writer.append(&row(0)).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Sample_Count,Accuracy,CPU_Percent,RAM_MB,Battery_Percent,Latency_ms"
        );
        assert_eq!(lines[1], "0,0.750000,12.00,42.50,88.00,1.234");
    }

    #[test]
    fn test_missing_probe_values_write_neutral_zeros() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("edge.csv");

        let mut writer = ReportWriter::create(&path, ReportSchema::EdgeFull).unwrap();
        writer
            .append(&TelemetryRow {
                cpu_percent: None,
                battery_percent: None,
                ..row(0)
            })
            .unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(1).unwrap(), "0,0.750000,0.00,42.50,0.00,1.234");
    }

    #[test]
    fn test_truncate_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");

        let mut writer = ReportWriter::create(&path, ReportSchema::Core).unwrap();
        for i in 0..5 {
            writer.append(&row(i * 1000)).unwrap();
        }
        writer.finish().unwrap();

        // a second run over the same path owns the file wholesale
        let writer = ReportWriter::create(&path, ReportSchema::Core).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
