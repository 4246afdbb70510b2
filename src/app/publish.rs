// RosterPress - app/publish.rs
//
// Publisher pipeline: load roster, filter to the published subset, write the
// public CSV, the Markdown table, and the HTML gallery. Avatar sources are
// resolved here because staging icons into the docs asset directory touches
// the filesystem, which the core renderer must not do.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::app::roster;
use crate::core::export;
use crate::core::filter;
use crate::core::gallery::{self, Card};
use crate::core::handle::{extract_handle, extract_instagram_handle};
use crate::core::model::{ExportSummary, Row};
use crate::util::constants::{
    COL_ICON, COL_SNS_LINKS, COL_X_URL, DOCS_ASSETS_DIR, DOCS_ASSETS_PREFIX, ICON_CACHE_DIR,
    IN_CSV, MAX_AVATAR_SOURCES, OUT_CSV, OUT_HTML, OUT_MD, UNAVATAR_BASE, X_WEB_BASE,
};
use crate::util::error::{ExportError, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Filesystem layout for one publisher run.
///
/// Defaults to the repository's fixed paths; tests point every field at a
/// temporary directory instead.
#[derive(Debug, Clone)]
pub struct PublishPaths {
    /// Input roster CSV.
    pub input: PathBuf,

    /// Filtered CSV output.
    pub out_csv: PathBuf,

    /// Markdown table output.
    pub out_md: PathBuf,

    /// HTML gallery output.
    pub out_html: PathBuf,

    /// Directory the gallery serves icons from; local icons are copied here.
    pub docs_assets_dir: PathBuf,

    /// Icon-fetcher cache consulted for per-handle avatar files.
    pub icon_cache_dir: PathBuf,
}

impl Default for PublishPaths {
    fn default() -> Self {
        Self {
            input: PathBuf::from(IN_CSV),
            out_csv: PathBuf::from(OUT_CSV),
            out_md: PathBuf::from(OUT_MD),
            out_html: PathBuf::from(OUT_HTML),
            docs_assets_dir: PathBuf::from(DOCS_ASSETS_DIR),
            icon_cache_dir: PathBuf::from(ICON_CACHE_DIR),
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Runs the full publisher pipeline and returns the row counts.
pub fn run(paths: &PublishPaths) -> Result<ExportSummary> {
    let roster = roster::load(&paths.input)?;
    let published = filter::published_rows(&roster.rows);
    tracing::info!(
        total = roster.rows.len(),
        published = published.len(),
        "Roster filtered"
    );

    create_parent(&paths.out_csv)?;
    let csv_file = File::create(&paths.out_csv).map_err(|e| ExportError::Io {
        path: paths.out_csv.clone(),
        source: e,
    })?;
    let csv_rows = export::write_csv(
        &roster.columns,
        &published,
        BufWriter::new(csv_file),
        &paths.out_csv,
    )?;
    tracing::info!(rows = csv_rows, path = %paths.out_csv.display(), "CSV written");

    create_parent(&paths.out_md)?;
    let md_file = File::create(&paths.out_md).map_err(|e| ExportError::Io {
        path: paths.out_md.clone(),
        source: e,
    })?;
    let md_rows = export::write_markdown(
        &roster.columns,
        &published,
        BufWriter::new(md_file),
        &paths.out_md,
    )?;
    tracing::info!(rows = md_rows, path = %paths.out_md.display(), "Markdown written");

    let ordered = gallery::order_for_display(&published);
    let cards: Vec<Card<'_>> = ordered
        .into_iter()
        .map(|row| Card {
            row,
            avatar_sources: resolve_avatar_sources(row, paths),
        })
        .collect();
    let page = gallery::render_gallery(&cards);
    create_parent(&paths.out_html)?;
    fs::write(&paths.out_html, page).map_err(|e| ExportError::Io {
        path: paths.out_html.clone(),
        source: e,
    })?;
    tracing::info!(cards = cards.len(), path = %paths.out_html.display(), "Gallery written");

    Ok(ExportSummary {
        published: published.len(),
        total: roster.rows.len(),
    })
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ExportError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    Ok(())
}

// =============================================================================
// Avatar resolution
// =============================================================================

/// Collects avatar source URLs for one row, best first.
///
/// Priority: explicit icon column, then a fetcher cache hit, then the avatar
/// mirror, then the live platform image. The list is capped at
/// [`MAX_AVATAR_SOURCES`] because the rendered fallback chain can only step
/// through that many.
fn resolve_avatar_sources(row: &Row, paths: &PublishPaths) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();

    let explicit = row.get(COL_ICON).trim();
    if explicit.starts_with("http://") || explicit.starts_with("https://") {
        push_unique(&mut sources, explicit.to_string());
    } else if !explicit.is_empty() {
        if let Some(staged) = stage_icon(Path::new(explicit), &paths.docs_assets_dir) {
            push_unique(&mut sources, staged);
        }
    }

    let x_handle = extract_handle(row.get(COL_X_URL));
    let ig_handle = extract_instagram_handle(row.get(COL_SNS_LINKS));

    let cache_handle = if x_handle.is_empty() {
        ig_handle.as_deref()
    } else {
        Some(x_handle.as_str())
    };
    if let Some(handle) = cache_handle {
        let cached = paths.icon_cache_dir.join(format!("{handle}.jpg"));
        if cached.is_file() {
            if let Some(staged) = stage_icon(&cached, &paths.docs_assets_dir) {
                push_unique(&mut sources, staged);
            }
        }
    }

    if !x_handle.is_empty() {
        push_unique(&mut sources, format!("{UNAVATAR_BASE}/x/{x_handle}"));
    } else if let Some(ig) = &ig_handle {
        push_unique(&mut sources, format!("{UNAVATAR_BASE}/instagram/{ig}"));
    }

    if !x_handle.is_empty() {
        push_unique(
            &mut sources,
            format!("{X_WEB_BASE}/{x_handle}/profile_image?size=original"),
        );
    }

    sources.truncate(MAX_AVATAR_SOURCES);
    sources
}

fn push_unique(sources: &mut Vec<String>, candidate: String) {
    if !sources.contains(&candidate) {
        sources.push(candidate);
    }
}

/// Copies a local icon into the gallery asset directory and returns the
/// `src` value to embed: the asset-relative path plus a cache-busting query
/// parameter derived from the source file's modification time. Returns
/// `None` when the source file is missing or unreadable; the row then simply
/// falls through to the next avatar candidate.
fn stage_icon(source: &Path, assets_dir: &Path) -> Option<String> {
    let meta = fs::metadata(source).ok()?;
    let name = source.file_name()?.to_string_lossy().into_owned();

    if let Err(err) = fs::create_dir_all(assets_dir) {
        tracing::debug!(dir = %assets_dir.display(), error = %err, "Asset dir creation failed");
        return None;
    }
    if let Err(err) = fs::copy(source, assets_dir.join(&name)) {
        tracing::debug!(source = %source.display(), error = %err, "Icon copy failed");
        return None;
    }

    let mtime = meta
        .modified()
        .ok()?
        .duration_since(UNIX_EPOCH)
        .ok()?
        .as_secs();
    Some(format!("{DOCS_ASSETS_PREFIX}/{name}?v={mtime}"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::{COL_NAME, COL_PUBLISH};

    fn temp_paths(dir: &Path) -> PublishPaths {
        PublishPaths {
            input: dir.join("roster.csv"),
            out_csv: dir.join("public/out.csv"),
            out_md: dir.join("docs/out.md"),
            out_html: dir.join("docs/index.html"),
            docs_assets_dir: dir.join("docs/assets/icons"),
            icon_cache_dir: dir.join("cache"),
        }
    }

    fn row(pairs: &[(&str, &str)]) -> Row {
        Row::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_remote_explicit_icon_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let paths = temp_paths(dir.path());
        let row = row(&[(COL_ICON, "https://cdn.example/pic.png")]);

        let sources = resolve_avatar_sources(&row, &paths);
        assert_eq!(sources, ["https://cdn.example/pic.png"]);
    }

    #[test]
    fn test_missing_local_icon_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = temp_paths(dir.path());
        let row = row(&[(COL_ICON, "no/such/file.jpg")]);

        assert!(resolve_avatar_sources(&row, &paths).is_empty());
    }

    #[test]
    fn test_local_icon_staged_with_cache_buster() {
        let dir = tempfile::tempdir().unwrap();
        let paths = temp_paths(dir.path());
        let icon = dir.path().join("me.jpg");
        fs::write(&icon, b"jpeg bytes").unwrap();

        let row = row(&[(COL_ICON, icon.to_str().unwrap())]);
        let sources = resolve_avatar_sources(&row, &paths);
        assert_eq!(sources.len(), 1);
        assert!(sources[0].starts_with("assets/icons/me.jpg?v="));
        assert!(paths.docs_assets_dir.join("me.jpg").is_file());
    }

    #[test]
    fn test_cache_hit_ranks_before_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let paths = temp_paths(dir.path());
        fs::create_dir_all(&paths.icon_cache_dir).unwrap();
        fs::write(paths.icon_cache_dir.join("alice.jpg"), b"cached").unwrap();

        let row = row(&[(COL_X_URL, "https://x.com/alice")]);
        let sources = resolve_avatar_sources(&row, &paths);
        assert_eq!(sources.len(), 3);
        assert!(sources[0].starts_with("assets/icons/alice.jpg?v="));
        assert_eq!(sources[1], "https://unavatar.io/x/alice");
        assert_eq!(sources[2], "https://x.com/alice/profile_image?size=original");
    }

    #[test]
    fn test_instagram_fallback_when_no_x_handle() {
        let dir = tempfile::tempdir().unwrap();
        let paths = temp_paths(dir.path());
        let row = row(&[(COL_SNS_LINKS, "https://instagram.com/gram_gram")]);

        let sources = resolve_avatar_sources(&row, &paths);
        assert_eq!(sources, ["https://unavatar.io/instagram/gram_gram"]);
    }

    #[test]
    fn test_sources_capped_at_three() {
        let dir = tempfile::tempdir().unwrap();
        let paths = temp_paths(dir.path());
        fs::create_dir_all(&paths.icon_cache_dir).unwrap();
        fs::write(paths.icon_cache_dir.join("alice.jpg"), b"cached").unwrap();

        let row = row(&[
            (COL_ICON, "https://cdn.example/explicit.png"),
            (COL_X_URL, "@alice"),
        ]);
        let sources = resolve_avatar_sources(&row, &paths);
        assert_eq!(sources.len(), MAX_AVATAR_SOURCES);
        assert_eq!(sources[0], "https://cdn.example/explicit.png");
        assert!(sources[1].starts_with("assets/icons/alice.jpg?v="));
        assert_eq!(sources[2], "https://unavatar.io/x/alice");
    }

    #[test]
    fn test_run_writes_all_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = temp_paths(dir.path());
        fs::write(
            &paths.input,
            format!("{COL_PUBLISH},{COL_NAME}\ntrue,alice\nno,bob\n"),
        )
        .unwrap();

        let summary = run(&paths).unwrap();
        assert_eq!(summary.published, 1);
        assert_eq!(summary.total, 2);
        assert!(paths.out_csv.is_file());
        assert!(paths.out_md.is_file());
        assert!(paths.out_html.is_file());
    }
}
