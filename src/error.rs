//! Error and warning types shared across the crate
//!
//! Batch-level failures are returned as [`MapError`]. Row-level problems never
//! abort a batch; they are collected as [`ParseWarning`] values and handed back
//! to the caller next to whatever was successfully built.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that abort a whole load or rebuild
#[derive(Debug, Error)]
pub enum MapError {
    /// The measurement table lacks one or more required columns
    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The site mapping source has no usable `Site,Shot,Seq` header
    #[error("site mapping header is invalid: {0}")]
    MappingHeader(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;

/// What went wrong with a single row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// A cell that must be numeric could not be parsed
    MalformedNumber { column: String, value: String },
    /// A required cell was empty or absent
    MissingCell { column: String },
    /// The site id has no entry in the site registry
    UnresolvedSite { site: i64 },
    /// A parameter name other than the two offset axes
    UnrecognizedParam { name: String },
    /// A later mapping row replaced an earlier one for the same site
    DuplicateSite { site: i64 },
}

/// Non-fatal, per-row diagnostic. `row` is 1-based and counts data rows only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseWarning {
    pub row: usize,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl ParseWarning {
    pub fn new(row: usize, kind: WarningKind) -> Self {
        Self { row, kind }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::MalformedNumber { column, value } => {
                write!(f, "row {}: column {} is not a number: '{}'", self.row, column, value)
            }
            WarningKind::MissingCell { column } => {
                write!(f, "row {}: column {} is empty", self.row, column)
            }
            WarningKind::UnresolvedSite { site } => {
                write!(f, "row {}: site {} not found in site mapping", self.row, site)
            }
            WarningKind::UnrecognizedParam { name } => {
                write!(f, "row {}: parameter '{}' ignored", self.row, name)
            }
            WarningKind::DuplicateSite { site } => {
                write!(f, "row {}: site {} remapped (last mapping wins)", self.row, site)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_all() {
        let err = MapError::MissingColumns(vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(err.to_string(), "dataset is missing required columns: X, Y");
    }

    #[test]
    fn test_warning_serializes_flat() {
        let warning = ParseWarning::new(3, WarningKind::UnresolvedSite { site: 42 });
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["row"], 3);
        assert_eq!(json["kind"], "unresolved_site");
        assert_eq!(json["site"], 42);
    }
}
