//! Raw measurement table validation and row conversion

use super::columns::*;
use super::records::{MeasurementRecord, ParamReading, UnitKey};
use crate::cells;
use crate::error::{MapError, ParseWarning, Result};
use serde::{Deserialize, Serialize};

/// A measurement export already split into header and string cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Accepted records of one batch plus the rows that were skipped or degraded
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<MeasurementRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Positions of the required columns within a table header
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    glass_id: usize,
    end_time: usize,
    site: usize,
    x: usize,
    y: usize,
    param_name: usize,
    param_value: usize,
}

impl MeasurementTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Names of required columns absent from the header, in [`REQUIRED_COLUMNS`] order
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|name| !self.columns.iter().any(|c| c.trim() == **name))
            .map(|name| name.to_string())
            .collect()
    }

    fn column_index(&self) -> Result<ColumnIndex> {
        let missing = self.missing_columns();
        if !missing.is_empty() {
            return Err(MapError::MissingColumns(missing));
        }
        let find = |name: &str| self.columns.iter().position(|c| c.trim() == name).unwrap_or(0);
        Ok(ColumnIndex {
            glass_id: find(GLASS_ID),
            end_time: find(GLASS_END_TIME),
            site: find(SITE_NAME),
            x: find(X),
            y: find(Y),
            param_name: find(PARAM_NAME),
            param_value: find(PARAM_VALUE),
        })
    }

    /// Validates the header and converts every row.
    ///
    /// Fails only when a required column is missing, in which case no records
    /// are produced. Rows with a missing or non-numeric `SITE_NAME`, `X` or `Y`
    /// are skipped with a warning. A malformed `PARAM_VALUE` keeps the row's
    /// coordinate but drops its parameter.
    pub fn to_dataset(&self) -> Result<Dataset> {
        let index = self.column_index()?;
        let mut dataset = Dataset::default();

        for (idx, cells) in self.rows.iter().enumerate() {
            let row = idx + 1;
            match convert_row(cells, &index, row) {
                Ok((record, param_warning)) => {
                    dataset.records.push(record);
                    dataset.warnings.extend(param_warning);
                }
                Err(warning) => {
                    log::warn!("Skipping measurement {}", warning);
                    dataset.warnings.push(warning);
                }
            }
        }

        log::debug!(
            "Converted {} of {} measurement rows ({} warnings)",
            dataset.records.len(),
            self.rows.len(),
            dataset.warnings.len()
        );
        Ok(dataset)
    }
}

fn convert_row(
    cells: &[String],
    index: &ColumnIndex,
    row: usize,
) -> std::result::Result<(MeasurementRecord, Option<ParseWarning>), ParseWarning> {
    let cell = |i: usize| cells.get(i).map(String::as_str);

    let site = cells::parse_int(cells::required(cell(index.site), SITE_NAME, row)?, SITE_NAME, row)?;
    let x = cells::parse_float(cells::required(cell(index.x), X, row)?, X, row)?;
    let y = cells::parse_float(cells::required(cell(index.y), Y, row)?, Y, row)?;
    let unit = UnitKey::new(
        cell(index.glass_id).unwrap_or("").trim(),
        cell(index.end_time).unwrap_or("").trim(),
    );

    let mut param_warning = None;
    let param = match (cells::optional(cell(index.param_name)), cells::optional(cell(index.param_value))) {
        (Some(name), Some(value)) => match cells::parse_float(value, PARAM_VALUE, row) {
            Ok(value) => Some(ParamReading { name: name.to_string(), value }),
            Err(warning) => {
                param_warning = Some(warning);
                None
            }
        },
        _ => None,
    };

    Ok((MeasurementRecord { row, unit, site, x, y, param }, param_warning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningKind;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn table(rows: &[&[&str]]) -> MeasurementTable {
        MeasurementTable::new(
            strings(&REQUIRED_COLUMNS),
            rows.iter().map(|r| strings(r)).collect(),
        )
    }

    #[test]
    fn test_missing_columns_abort_batch() {
        let mut t = table(&[&["G1", "T1", "1", "1000", "2000", "POS_X1", "0.5"]]);
        t.columns.retain(|c| c != "X" && c != "PARAM_VALUE");
        let err = t.to_dataset().unwrap_err();
        match err {
            MapError::MissingColumns(cols) => assert_eq!(cols, vec!["X", "PARAM_VALUE"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rows_converted_with_per_row_rejection() {
        let t = table(&[
            &["G1", "T1", "1", "1000", "2000", "POS_X1", "0.5"],
            &["G1", "T1", "2", "abc", "2000", "", ""],
            &["G1", "T1", "", "1000", "2000", "", ""],
            &["G1", "T1", "3", "3000", "4000", "nan", "nan"],
            &["G2", "T2", "4", "1", "1", "POS_Y1", "bad"],
        ]);
        let dataset = t.to_dataset().expect("all columns present");
        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.records[0].param.as_ref().map(|p| p.value), Some(0.5));
        assert_eq!(dataset.records[1].site, 3);
        assert!(dataset.records[1].param.is_none());
        assert!(dataset.records[2].param.is_none(), "malformed value drops the param only");

        let rows: Vec<usize> = dataset.warnings.iter().map(|w| w.row).collect();
        assert_eq!(rows, vec![2, 3, 5]);
        assert!(matches!(
            dataset.warnings[0].kind,
            WarningKind::MalformedNumber { ref column, .. } if column == "X"
        ));
    }

    #[test]
    fn test_columns_may_be_reordered() {
        let t = MeasurementTable::new(
            strings(&["X", "Y", "SITE_NAME", "PARAM_VALUE", "PARAM_NAME", "GLASS_END_TIME", "GLASS_ID"]),
            vec![strings(&["10", "20", "5", "1.5", "POS_Y1", "T9", "G9"])],
        );
        let dataset = t.to_dataset().expect("all columns present");
        let record = &dataset.records[0];
        assert_eq!(record.unit, UnitKey::new("G9", "T9"));
        assert_eq!((record.site, record.x, record.y), (5, 10.0, 20.0));
        assert_eq!(record.param.as_ref().map(|p| p.name.as_str()), Some("POS_Y1"));
    }
}
