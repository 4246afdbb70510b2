// RosterPress - core/model.rs
//
// Core data model. The roster schema is freeform — columns come entirely
// from the input file's header row — so rows are string maps rather than
// structs. Core layer: accepts Read trait objects, never touches the
// filesystem directly (the app layer opens files).

use crate::util::constants;
use crate::util::error::LoadError;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

// =============================================================================
// Row
// =============================================================================

/// One roster entry: a mapping from column name to string value.
///
/// Lookups never fail; a missing column reads as the empty string, which is
/// also how empty cells arrive. "Best available data, or omit the field" is
/// the contract every consumer builds on.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    /// Value of `column`, or `""` when the column is absent or empty.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// Build a row from explicit pairs. Primarily for tests; the loader
    /// builds rows by zipping the header record with each data record.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Roster
// =============================================================================

/// The full participant dataset: ordered column names plus rows in source
/// order. Row order is load-bearing — the published subset and the gallery
/// tie-break both preserve it.
#[derive(Debug, Clone)]
pub struct Roster {
    /// Column names in header order.
    pub columns: Vec<String>,

    /// All rows, in source order, published or not.
    pub rows: Vec<Row>,
}

impl Roster {
    /// Parse a roster from CSV content.
    ///
    /// `path` is used only for error context; the caller owns the open
    /// handle. Fails if the header cannot be read or lacks the publish-flag
    /// column. Ragged data rows are tolerated: short rows read as empty in
    /// the trailing columns, surplus cells are dropped.
    pub fn from_reader<R: Read>(rdr: R, path: &Path) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| LoadError::Csv {
                path: path.to_path_buf(),
                source: e,
            })?
            .iter()
            .map(str::to_string)
            .collect();

        if !columns.iter().any(|c| c == constants::COL_PUBLISH) {
            return Err(LoadError::MissingPublishColumn {
                column: constants::COL_PUBLISH,
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| LoadError::Csv {
                path: path.to_path_buf(),
                source: e,
            })?;
            let values = columns
                .iter()
                .enumerate()
                .map(|(i, col)| (col.clone(), record.get(i).unwrap_or("").to_string()))
                .collect();
            rows.push(Row { values });
        }

        Ok(Self { columns, rows })
    }
}

// =============================================================================
// Job summaries
// =============================================================================

/// Counts reported by the publisher after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Rows that passed the publish filter and appear in all three outputs.
    pub published: usize,

    /// Total rows read from the input.
    pub total: usize,
}

/// Counts reported by the icon fetcher.
///
/// `success` covers cache hits and fresh downloads alike; `failed` counts
/// only rows with no derivable identity on any platform. Rows whose
/// candidates all failed are logged but land in neither tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub success: usize,
    pub failed: usize,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn load(content: &str) -> Result<Roster, LoadError> {
        Roster::from_reader(content.as_bytes(), &PathBuf::from("test.csv"))
    }

    #[test]
    fn test_parses_header_order_and_rows() {
        let roster = load("公開可否,ハンドルネーム,お住まい\ntrue,ひので,高知\n").unwrap();
        assert_eq!(roster.columns, vec!["公開可否", "ハンドルネーム", "お住まい"]);
        assert_eq!(roster.rows.len(), 1);
        assert_eq!(roster.rows[0].get("ハンドルネーム"), "ひので");
    }

    #[test]
    fn test_missing_publish_column_is_fatal() {
        let err = load("ハンドルネーム,お住まい\nひので,高知\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingPublishColumn { .. }));
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let roster = load("公開可否,ハンドルネーム,お住まい\ntrue,ひので\n").unwrap();
        assert_eq!(roster.rows[0].get("お住まい"), "");
    }

    #[test]
    fn test_surplus_cells_are_dropped() {
        let roster = load("公開可否,ハンドルネーム\ntrue,ひので,extra\n").unwrap();
        assert_eq!(roster.rows[0].get("ハンドルネーム"), "ひので");
    }

    #[test]
    fn test_missing_column_lookup_is_empty() {
        let row = Row::from_pairs([("a", "1")]);
        assert_eq!(row.get("nope"), "");
    }

    #[test]
    fn test_row_order_is_preserved() {
        let roster = load("公開可否,名\ntrue,A\nfalse,B\n公開,C\n").unwrap();
        let names: Vec<_> = roster.rows.iter().map(|r| r.get("名")).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
