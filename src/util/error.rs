// RosterPress - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Only two tiers exist in this tool: fatal errors (defined here, abort the
// run with a message) and silent degradation (bad URLs, missing icon files,
// failed downloads — handled inline by yielding empty values, never here).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for both pipelines.
#[derive(Debug)]
pub enum RosterError {
    /// Roster loading or validation failed.
    Load(LoadError),

    /// Writing one of the public artifacts failed.
    Export(ExportError),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors raised while loading the roster CSV. All of these are fatal:
/// without a readable input carrying the publish column there is nothing
/// meaningful either job can do.
#[derive(Debug)]
pub enum LoadError {
    /// The input file does not exist.
    NotFound { path: PathBuf },

    /// The header row lacks the publish-flag column.
    MissingPublishColumn { column: &'static str },

    /// The CSV could not be parsed (encoding, malformed quoting, ...).
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error reading the input.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::MissingPublishColumn { column } => {
                write!(f, "CSV has no '{column}' column")
            }
            Self::Csv { path, source } => {
                write!(f, "failed to parse '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for RosterError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors raised while writing the CSV, Markdown, or HTML artifacts.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing an output file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for RosterError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for RosterPress results.
pub type Result<T> = std::result::Result<T, RosterError>;
