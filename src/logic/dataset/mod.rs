//! Dataset Module - Streaming Record Source
//!
//! Reads the 43-column label-last intrusion dataset one row at a time.
//! - `record.rs` - Record / Label types and the binary label derivation
//! - `reader.rs` - Lazy single-pass CSV reader

pub mod reader;
pub mod record;

pub use reader::RecordSource;
pub use record::{Label, Record};
