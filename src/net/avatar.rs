// RosterPress - net/avatar.rs
//
// Avatar downloads via the unavatar mirror service, falling back to the
// origin platform where one exists. Everything is blocking and best-effort:
// a candidate that times out, errors, or returns non-image content is
// skipped and the next one is tried.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::util::constants::{FETCH_TIMEOUT_SECS, UNAVATAR_BASE, USER_AGENT, X_ORIGIN_BASE};

/// HTTP client plus the endpoint bases candidate URLs are built from.
///
/// The bases are injectable so tests can point the client at a local mock
/// server; production code uses [`AvatarClient::new`].
pub struct AvatarClient {
    http: reqwest::blocking::Client,
    mirror_base: String,
    origin_base: String,
}

impl AvatarClient {
    pub fn new() -> Self {
        Self::with_bases(UNAVATAR_BASE, X_ORIGIN_BASE)
    }

    pub fn with_bases(mirror_base: &str, origin_base: &str) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            mirror_base: mirror_base.trim_end_matches('/').to_string(),
            origin_base: origin_base.trim_end_matches('/').to_string(),
        }
    }

    // ========================================================================
    // Candidate URL lists
    // ========================================================================

    /// Mirror variants first, then the origin redirect endpoint.
    pub fn x_candidates(&self, handle: &str) -> Vec<String> {
        vec![
            format!("{}/x/{handle}", self.mirror_base),
            format!("{}/twitter/{handle}", self.mirror_base),
            format!("{}/https://twitter.com/{handle}", self.mirror_base),
            format!("{}/{handle}/profile_image?size=original", self.origin_base),
        ]
    }

    pub fn instagram_candidates(&self, handle: &str) -> Vec<String> {
        vec![
            format!("{}/instagram/{handle}", self.mirror_base),
            format!("{}/https://instagram.com/{handle}", self.mirror_base),
        ]
    }

    pub fn youtube_candidates(&self, handle: &str) -> Vec<String> {
        vec![
            format!("{}/youtube/{handle}", self.mirror_base),
            format!("{}/youtube/@{handle}", self.mirror_base),
            format!("{}/https://www.youtube.com/@{handle}", self.mirror_base),
        ]
    }

    // ========================================================================
    // Download
    // ========================================================================

    /// Tries each candidate in order and writes the first image response to
    /// `dest`. Returns true on success, false when every candidate failed.
    pub fn download_first(&self, candidates: &[String], dest: &Path) -> bool {
        for url in candidates {
            let body = match self.fetch_image(url) {
                Ok(Some(body)) => body,
                Ok(None) => {
                    tracing::debug!(%url, "Not an image response, trying next candidate");
                    continue;
                }
                Err(err) => {
                    tracing::debug!(%url, error = %err, "Fetch failed, trying next candidate");
                    continue;
                }
            };

            if let Some(parent) = dest.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(err) = fs::create_dir_all(parent) {
                        tracing::warn!(dir = %parent.display(), error = %err, "Cache dir creation failed");
                        return false;
                    }
                }
            }
            match fs::write(dest, &body) {
                Ok(()) => {
                    tracing::debug!(%url, dest = %dest.display(), bytes = body.len(), "Icon saved");
                    return true;
                }
                Err(err) => {
                    tracing::warn!(dest = %dest.display(), error = %err, "Icon write failed");
                    return false;
                }
            }
        }
        false
    }

    /// GET one candidate. `Ok(None)` means the response was usable HTTP but
    /// not a non-empty image; the caller moves on to the next candidate.
    fn fetch_image(&self, url: &str) -> reqwest::Result<Option<Vec<u8>>> {
        let response = self.http.get(url).send()?.error_for_status()?;

        let is_image = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Ok(None);
        }

        let body = response.bytes()?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(body.to_vec()))
    }
}
