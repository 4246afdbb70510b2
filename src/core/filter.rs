// RosterPress - core/filter.rs
//
// The publish filter: which rows are allowed into the public artifacts.
// Core layer: pure logic, no I/O.

use crate::core::model::Row;
use crate::util::constants;

/// Returns true when a publish-flag value counts as "published".
///
/// Normalisation is trim + lowercase, then membership in the fixed token
/// set. Empty and unrecognised values are not published.
pub fn is_truthy(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    constants::TRUTHY_TOKENS.contains(&v.as_str())
}

/// Publish predicate over a whole row.
pub fn is_published(row: &Row) -> bool {
    is_truthy(row.get(constants::COL_PUBLISH))
}

/// The published subset, in source order.
pub fn published_rows(rows: &[Row]) -> Vec<&Row> {
    rows.iter().filter(|r| is_published(r)).collect()
}
