//! Site registry loaded once from the external `Site,Shot,Seq` mapping

use crate::cells;
use crate::error::{MapError, ParseWarning, Result, WarningKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const SITE_COLUMN: &str = "Site";
pub const SHOT_COLUMN: &str = "Shot";
pub const SEQ_COLUMN: &str = "Seq";

/// Placement address of a site: which shot quadrant, and where in that shot's ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SiteAddress {
    pub shot: i32,
    pub seq: i32,
}

impl SiteAddress {
    pub const fn new(shot: i32, seq: i32) -> Self {
        Self { shot, seq }
    }
}

/// Static site id -> (shot, seq) mapping
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: HashMap<i64, SiteAddress>,
}

/// Outcome of loading a registry: the registry plus every skipped or remapped row
#[derive(Debug, Default)]
pub struct RegistryLoad {
    pub registry: SiteRegistry,
    pub warnings: Vec<ParseWarning>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `site` to `address`, returning the mapping it replaced.
    /// Duplicate ids are last-write-wins.
    pub fn insert(&mut self, site: i64, address: SiteAddress) -> Option<SiteAddress> {
        self.sites.insert(site, address)
    }

    pub fn lookup(&self, site: i64) -> Option<SiteAddress> {
        self.sites.get(&site).copied()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Builds a registry from already-split `(site, shot, seq)` cells.
    ///
    /// Rows that fail to parse are skipped with a warning; the load continues.
    pub fn from_rows<I, S>(rows: I) -> RegistryLoad
    where
        I: IntoIterator<Item = [S; 3]>,
        S: AsRef<str>,
    {
        let mut load = RegistryLoad::default();
        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 1;
            let [site, shot, seq] = row;
            match parse_mapping_row(site.as_ref(), shot.as_ref(), seq.as_ref(), row_number) {
                Ok((site, address)) => load.push(site, address, row_number),
                Err(warning) => {
                    log::warn!("Skipping site mapping {}", warning);
                    load.warnings.push(warning);
                }
            }
        }
        log::info!(
            "Loaded {} site mappings ({} warnings)",
            load.registry.len(),
            load.warnings.len()
        );
        load
    }

    /// Reads delimited text (comma or tab) whose header names `Site`, `Shot` and `Seq`
    /// in any order. Blank lines are ignored.
    pub fn load<R: BufRead>(reader: R) -> Result<RegistryLoad> {
        let mut lines = reader.lines();
        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(MapError::MappingHeader("mapping source is empty".to_string())),
            }
        };

        let columns: Vec<&str> = split_cells(&header).collect();
        let position = |name: &str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| MapError::MappingHeader(format!("no '{}' column in '{}'", name, header.trim())))
        };
        let site_idx = position(SITE_COLUMN)?;
        let shot_idx = position(SHOT_COLUMN)?;
        let seq_idx = position(SEQ_COLUMN)?;

        let mut rows = Vec::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = split_cells(&line).collect();
            let cell = |idx: usize| cells.get(idx).copied().unwrap_or("").to_string();
            rows.push([cell(site_idx), cell(shot_idx), cell(seq_idx)]);
        }
        Ok(Self::from_rows(rows))
    }

    pub fn load_text(text: &str) -> Result<RegistryLoad> {
        Self::load(text.as_bytes())
    }

    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<RegistryLoad> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }
}

impl RegistryLoad {
    fn push(&mut self, site: i64, address: SiteAddress, row: usize) {
        if let Some(previous) = self.registry.insert(site, address) {
            log::debug!(
                "Site {} remapped from {:?} to {:?} at row {}",
                site, previous, address, row
            );
            self.warnings.push(ParseWarning::new(row, WarningKind::DuplicateSite { site }));
        }
    }
}

/// Splits on commas or tabs; one pair of surrounding double quotes is stripped per cell
fn split_cells(line: &str) -> impl Iterator<Item = &str> {
    line.split([',', '\t']).map(|cell| {
        let cell = cell.trim();
        cell.strip_prefix('"')
            .and_then(|c| c.strip_suffix('"'))
            .map(str::trim)
            .unwrap_or(cell)
    })
}

fn parse_mapping_row(
    site: &str,
    shot: &str,
    seq: &str,
    row: usize,
) -> std::result::Result<(i64, SiteAddress), ParseWarning> {
    let site = cells::parse_int(cells::required(Some(site), SITE_COLUMN, row)?, SITE_COLUMN, row)?;
    let shot = cells::parse_int(cells::required(Some(shot), SHOT_COLUMN, row)?, SHOT_COLUMN, row)?;
    let seq = cells::parse_int(cells::required(Some(seq), SEQ_COLUMN, row)?, SEQ_COLUMN, row)?;
    let narrow = |value: i64, column: &str| {
        i32::try_from(value).map_err(|_| {
            ParseWarning::new(
                row,
                WarningKind::MalformedNumber {
                    column: column.to_string(),
                    value: value.to_string(),
                },
            )
        })
    };
    Ok((site, SiteAddress::new(narrow(shot, SHOT_COLUMN)?, narrow(seq, SEQ_COLUMN)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_text_any_column_order() {
        let text = "Seq,Site,Shot\n2,10,1\n\n1,11,3\n";
        let load = SiteRegistry::load_text(text).expect("valid header");
        assert!(load.warnings.is_empty());
        assert_eq!(load.registry.len(), 2);
        assert_eq!(load.registry.lookup(10), Some(SiteAddress::new(1, 2)));
        assert_eq!(load.registry.lookup(11), Some(SiteAddress::new(3, 1)));
        assert_eq!(load.registry.lookup(12), None);
    }

    #[test]
    fn test_load_text_quoted_cells() {
        let text = "\"Site\",\"Shot\",\"Seq\"\n\"1\",\"1\",\"1\"\n\"2\", \"4\" ,\"3\"\n";
        let load = SiteRegistry::load_text(text).expect("quoted header");
        assert!(load.warnings.is_empty());
        assert_eq!(load.registry.lookup(1), Some(SiteAddress::new(1, 1)));
        assert_eq!(load.registry.lookup(2), Some(SiteAddress::new(4, 3)));
    }

    #[test]
    fn test_huge_site_ids_are_not_merged() {
        let text = "Site,Shot,Seq\n1e20,1,1\n2e20,1,2\n";
        let load = SiteRegistry::load_text(text).expect("valid header");
        assert!(load.registry.is_empty());
        assert_eq!(load.warnings.len(), 2);
        assert!(load
            .warnings
            .iter()
            .all(|w| matches!(w.kind, WarningKind::MalformedNumber { .. })));
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let text = "Site\tShot\tSeq\n1\t1\t1\nabc\t1\t2\n3\t\t4\n5\t2\t6\n";
        let load = SiteRegistry::load_text(text).expect("valid header");
        assert_eq!(load.registry.len(), 2);
        assert_eq!(load.warnings.len(), 2);
        assert_eq!(load.warnings[0].row, 2);
        assert!(matches!(load.warnings[1].kind, WarningKind::MissingCell { ref column } if column == "Shot"));
    }

    #[test]
    fn test_duplicate_site_last_write_wins() {
        let load = SiteRegistry::from_rows([["7", "1", "1"], ["7", "2", "5"]]);
        assert_eq!(load.registry.lookup(7), Some(SiteAddress::new(2, 5)));
        assert_eq!(
            load.warnings,
            vec![ParseWarning::new(2, WarningKind::DuplicateSite { site: 7 })]
        );
    }

    #[test]
    fn test_missing_header_column_is_an_error() {
        let err = SiteRegistry::load_text("Site,Shot\n1,1\n").unwrap_err();
        assert!(matches!(err, MapError::MappingHeader(_)));
        assert!(SiteRegistry::load_text("\n\n").is_err());
    }
}
