// RosterPress - core/export.rs
//
// CSV and Markdown serialization of the published row subset.
// Core layer: writes to any Write trait object; the caller owns the
// destination path and passes it in only for error context.

use std::io::Write;
use std::path::Path;

use crate::core::model::Row;
use crate::util::constants::{COL_PUBLISH, OFFICIAL_URL};
use crate::util::error::ExportError;

// ============================================================================
// CSV
// ============================================================================

/// Writes the published rows as CSV in the original column order.
///
/// The header row is always written, even for an empty subset. Returns the
/// number of data rows written.
pub fn write_csv<W: Write>(
    columns: &[String],
    rows: &[&Row],
    writer: W,
    out_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(columns)
        .map_err(|e| ExportError::Csv {
            path: out_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for row in rows {
        csv_writer
            .write_record(columns.iter().map(|column| row.get(column)))
            .map_err(|e| ExportError::Csv {
                path: out_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: out_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

// ============================================================================
// Markdown
// ============================================================================

/// Writes the published rows as a Markdown pipe table.
///
/// The publish-flag column is excluded; every other column appears in source
/// order. Cell values have embedded newlines replaced with single spaces so
/// the table structure survives. Returns the number of data rows written.
pub fn write_markdown<W: Write>(
    columns: &[String],
    rows: &[&Row],
    mut writer: W,
    out_path: &Path,
) -> Result<usize, ExportError> {
    let table_columns: Vec<&str> = columns
        .iter()
        .map(String::as_str)
        .filter(|column| *column != COL_PUBLISH)
        .collect();

    let mut doc = String::new();
    doc.push_str("# バイブコーディングキャンプ 参加者名簿\n\n");
    doc.push_str("（注）Discordで自己紹介いただいた方のみ表示しています。\n\n");
    doc.push_str(&format!("公式サイト: {OFFICIAL_URL}\n\n"));

    doc.push_str(&format!("| {} |\n", table_columns.join(" | ")));
    doc.push_str(&format!("|{}|\n", vec!["---"; table_columns.len()].join("|")));

    let mut count = 0;
    for row in rows {
        let cells: Vec<String> = table_columns
            .iter()
            .map(|column| flatten_cell(row.get(column)))
            .collect();
        doc.push_str(&format!("| {} |\n", cells.join(" | ")));
        count += 1;
    }

    writer.write_all(doc.as_bytes()).map_err(|e| ExportError::Io {
        path: out_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Collapses every newline form (`\r\n`, `\n`, `\r`) to a single space.
fn flatten_cell(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

// ============================================================================
// Tests
// ============================================================================
