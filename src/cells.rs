//! Cell-level parsing helpers shared by the mapping and dataset loaders

use crate::error::{ParseWarning, WarningKind};

/// Returns the trimmed cell text, or a `MissingCell` warning if it is empty
pub(crate) fn required<'a>(
    cell: Option<&'a str>,
    column: &str,
    row: usize,
) -> Result<&'a str, ParseWarning> {
    match cell.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ParseWarning::new(row, WarningKind::MissingCell { column: column.to_string() })),
    }
}

/// Parses an integer cell. Spreadsheet exports often render ids as `12.0`,
/// so integral floats are accepted as well, provided they fit in an `i64`.
pub(crate) fn parse_int(text: &str, column: &str, row: usize) -> Result<i64, ParseWarning> {
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    // 2^63 is exactly representable; anything at or beyond it would saturate
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    match text.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value) => Ok(value as i64),
        _ => Err(malformed(text, column, row)),
    }
}

pub(crate) fn parse_float(text: &str, column: &str, row: usize) -> Result<f64, ParseWarning> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(malformed(text, column, row)),
    }
}

/// `None` for blank cells, including the `NaN` placeholder pandas-style exports write
pub(crate) fn optional(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim)
        .filter(|text| !text.is_empty() && !text.eq_ignore_ascii_case("nan"))
}

fn malformed(text: &str, column: &str, row: usize) -> ParseWarning {
    ParseWarning::new(
        row,
        WarningKind::MalformedNumber {
            column: column.to_string(),
            value: text.to_string(),
        },
    )
}
