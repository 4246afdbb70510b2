// RosterPress - app/roster.rs
//
// Roster file loading. Both jobs start here: open the CSV, hand the reader
// to the core parser, surface the two fatal conditions (file absent, publish
// column missing) as typed errors.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::core::model::Roster;
use crate::util::error::LoadError;

/// Opens and parses the roster CSV at `path`.
pub fn load(path: &Path) -> Result<Roster, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let roster = Roster::from_reader(BufReader::new(file), path)?;
    tracing::debug!(
        path = %path.display(),
        columns = roster.columns.len(),
        rows = roster.rows.len(),
        "Roster loaded"
    );
    Ok(roster)
}
