//! Typed measurement records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one measured unit (panel/glass): `(glass_id, end_time)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitKey {
    pub glass_id: String,
    pub end_time: String,
}

impl UnitKey {
    pub fn new(glass_id: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            glass_id: glass_id.into(),
            end_time: end_time.into(),
        }
    }
}

/// Display form used for legends and hover text: `GLASS_ENDTIME`
impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.glass_id, self.end_time)
    }
}

/// A named parameter reading attached to a measurement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamReading {
    pub name: String,
    pub value: f64,
}

/// One accepted measurement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// 1-based data row number in the source table, used in warnings
    pub row: usize,
    pub unit: UnitKey,
    pub site: i64,
    /// Raw design coordinate of the site
    pub x: f64,
    pub y: f64,
    /// `None` when the row carries no parameter (it still contributes its coordinate)
    pub param: Option<ParamReading>,
}

impl MeasurementRecord {
    /// Convenience constructor for a row without a parameter reading
    pub fn coordinate(row: usize, unit: UnitKey, site: i64, x: f64, y: f64) -> Self {
        Self { row, unit, site, x, y, param: None }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.param = Some(ParamReading { name: name.into(), value });
        self
    }
}
