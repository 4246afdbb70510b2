// RosterPress - app/icons.rs
//
// Icon fetcher pipeline: for every roster row, derive one social identity,
// then download its avatar into the local cache unless a cached file already
// exists. Download failures are logged and skipped; only rows with no
// derivable identity at all count as failed.

use std::path::PathBuf;

use crate::app::roster;
use crate::core::handle::{extract_handle, extract_instagram_handle, extract_youtube_handle};
use crate::core::model::{FetchSummary, Row};
use crate::net::avatar::AvatarClient;
use crate::util::constants::{COL_SNS_LINKS, COL_X_URL, ICON_CACHE_DIR, IN_CSV};
use crate::util::error::Result;

// =============================================================================
// Configuration
// =============================================================================

/// Settings for one fetcher run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Input roster CSV.
    pub input: PathBuf,

    /// Directory cached icons are written to, one `<handle>.jpg` per row.
    pub cache_dir: PathBuf,

    /// Refetch even when a cached file exists.
    pub force: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(IN_CSV),
            cache_dir: PathBuf::from(ICON_CACHE_DIR),
            force: false,
        }
    }
}

// =============================================================================
// Identity
// =============================================================================

/// The one social identity chosen for a row, in platform priority order:
/// X first, then Instagram, then YouTube.
enum Identity {
    X(String),
    Instagram(String),
    YouTube(String),
}

impl Identity {
    fn handle(&self) -> &str {
        match self {
            Identity::X(h) | Identity::Instagram(h) | Identity::YouTube(h) => h,
        }
    }

    fn platform(&self) -> &'static str {
        match self {
            Identity::X(_) => "x",
            Identity::Instagram(_) => "instagram",
            Identity::YouTube(_) => "youtube",
        }
    }

    fn candidates(&self, client: &AvatarClient) -> Vec<String> {
        match self {
            Identity::X(h) => client.x_candidates(h),
            Identity::Instagram(h) => client.instagram_candidates(h),
            Identity::YouTube(h) => client.youtube_candidates(h),
        }
    }
}

fn derive_identity(row: &Row) -> Option<Identity> {
    let x_handle = extract_handle(row.get(COL_X_URL));
    if !x_handle.is_empty() {
        return Some(Identity::X(x_handle));
    }

    let sns = row.get(COL_SNS_LINKS).trim();
    if let Some(ig) = extract_instagram_handle(sns) {
        return Some(Identity::Instagram(ig));
    }
    if let Some(yt) = extract_youtube_handle(sns) {
        return Some(Identity::YouTube(yt));
    }
    None
}

// =============================================================================
// Pipeline
// =============================================================================

/// Runs the fetcher over every roster row and returns the tallies.
///
/// `success` counts cache hits and fresh downloads; `failed` counts rows
/// with no derivable identity. Rows whose every candidate failed are logged
/// at warn level and land in neither count.
pub fn run(config: &FetchConfig, client: &AvatarClient) -> Result<FetchSummary> {
    let roster = roster::load(&config.input)?;
    let mut summary = FetchSummary::default();

    for row in &roster.rows {
        let Some(identity) = derive_identity(row) else {
            summary.failed += 1;
            continue;
        };

        let cache_path = config.cache_dir.join(format!("{}.jpg", identity.handle()));
        if cache_path.exists() && !config.force {
            tracing::debug!(handle = identity.handle(), "Already cached, skipping");
            summary.success += 1;
            continue;
        }

        if client.download_first(&identity.candidates(client), &cache_path) {
            tracing::info!(
                platform = identity.platform(),
                handle = identity.handle(),
                path = %cache_path.display(),
                "Icon fetched"
            );
            summary.success += 1;
        } else {
            tracing::warn!(
                platform = identity.platform(),
                handle = identity.handle(),
                "Every candidate failed"
            );
        }
    }

    Ok(summary)
}

// =============================================================================
// Tests
// =============================================================================
