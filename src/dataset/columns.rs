//! Column names of the measurement export and the two recognized offset parameters

use serde::{Deserialize, Serialize};

pub const GLASS_ID: &str = "GLASS_ID";
pub const GLASS_END_TIME: &str = "GLASS_END_TIME";
pub const SITE_NAME: &str = "SITE_NAME";
pub const X: &str = "X";
pub const Y: &str = "Y";
pub const PARAM_NAME: &str = "PARAM_NAME";
pub const PARAM_VALUE: &str = "PARAM_VALUE";

/// Columns that must all be present for a batch to be accepted, in report order
pub const REQUIRED_COLUMNS: [&str; 7] = [
    GLASS_ID,
    GLASS_END_TIME,
    SITE_NAME,
    X,
    Y,
    PARAM_NAME,
    PARAM_VALUE,
];

/// Parameter name carrying the x-axis position offset
pub const POS_X_PARAM: &str = "POS_X1";
/// Parameter name carrying the y-axis position offset
pub const POS_Y_PARAM: &str = "POS_Y1";

/// Position axis an offset parameter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetAxis {
    X,
    Y,
}

impl OffsetAxis {
    /// Recognizes exactly the two offset parameter names; anything else is `None`
    pub fn from_param_name(name: &str) -> Option<Self> {
        match name {
            POS_X_PARAM => Some(Self::X),
            POS_Y_PARAM => Some(Self::Y),
            _ => None,
        }
    }
}
