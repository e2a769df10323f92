//! Measurement dataset intake
//!
//! Turns an already-split measurement table into typed records. Column
//! validation is batch-level (a missing column aborts), everything else is
//! per-row (the row is skipped or partially used and a warning is recorded).
//!
//! # Submodules
//! - `columns` - Column names and offset axis recognition
//! - `records` - Typed records and unit keys
//! - `table` - Raw table validation and row conversion

mod columns;
mod records;
mod table;

pub use columns::{OffsetAxis, REQUIRED_COLUMNS};
pub use records::{MeasurementRecord, ParamReading, UnitKey};
pub use table::{Dataset, MeasurementTable};
