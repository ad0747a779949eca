//! Record and Label types
//!
//! A record is the ordered feature mapping of one dataset row: column names
//! `"0"`..`"42"` paired with their raw string values, with the label column
//! (`"41"`) removed and collapsed to the binary {normal, attack} domain.

use std::fmt;

use crate::constants::NORMAL_LABEL;

/// Binary classification target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Normal,
    Attack,
}

impl Label {
    /// Collapse a raw label value to the binary domain.
    ///
    /// Pure and total: `"normal"` maps to `Normal`, every other value
    /// (including `"normal."`-style variants and attack names) to `Attack`.
    pub fn derive(raw: &str) -> Label {
        if raw == NORMAL_LABEL {
            Label::Normal
        } else {
            Label::Attack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Normal => "normal",
            Label::Attack => "attack",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dataset row: feature mapping + derived label
#[derive(Debug, Clone)]
pub struct Record {
    /// `(column name, raw value)` pairs in column order, label excluded.
    /// Values stay raw strings; numeric parsing is each consumer's business.
    pub features: Vec<(String, String)>,
    pub label: Label,
}
