//! Streaming CSV Record Source
//!
//! Lazy single pass over a headerless delimited file. The source is not
//! restartable - a second pass reopens the file. A missing file is the one
//! fatal precondition of the whole benchmark and is surfaced before any
//! output is created.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::constants::{COLUMN_COUNT, LABEL_COLUMN};
use crate::logic::error::BenchError;

use super::record::{Label, Record};

/// Lazy sequence of (feature mapping, label) pairs read from a dataset file
pub struct RecordSource {
    reader: csv::Reader<File>,
    path: PathBuf,
    skipped: u64,
}

impl RecordSource {
    /// Open the dataset for one end-to-end pass.
    ///
    /// Fails fast with `DatasetNotFound` when the file is absent.
    pub fn open(path: &Path) -> Result<Self, BenchError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                BenchError::DatasetNotFound(path.to_path_buf())
            } else {
                BenchError::Io(e)
            }
        })?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            path: path.to_path_buf(),
            skipped: 0,
        })
    }

    /// Rows dropped because they were too short to carry a label
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn parse_row(row: &StringRecord) -> Option<Record> {
        let raw_label = row.get(LABEL_COLUMN)?;
        let label = Label::derive(raw_label.trim());

        let mut features = Vec::with_capacity(COLUMN_COUNT - 1);
        for (index, field) in row.iter().enumerate() {
            if index == LABEL_COLUMN {
                continue;
            }
            features.push((index.to_string(), field.trim().to_string()));
        }

        Some(Record { features, label })
    }
}

impl Iterator for RecordSource {
    type Item = Result<Record, BenchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.records().next()? {
                Ok(row) => match Self::parse_row(&row) {
                    Some(record) => return Some(Ok(record)),
                    None => {
                        self.skipped += 1;
                        log::warn!(
                            "Skipping short row ({} columns) in {}",
                            row.len(),
                            self.path.display()
                        );
                    }
                },
                Err(e) => return Some(Err(BenchError::Dataset(e))),
            }
        }
    }
}
