//! Report Module - Output Table & Run Manifest
//!
//! - `writer.rs` - Append-only telemetry CSV (truncate-on-open, fixed header)
//! - `summary.rs` - JSON manifest tying a result file to its input and host

pub mod summary;
pub mod writer;

pub use summary::RunSummary;
pub use writer::{ReportSchema, ReportWriter, TelemetryRow};
