// RosterPress - core/handle.rs
// Account-handle extraction from the free-form link columns. Roster rows
// carry X profile URLs, bare handles with or without a leading `@`, and a
// comma-separated SNS column that may mention Instagram or YouTube; this
// module normalizes all of them down to plain handle strings.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

// ============================================================================
// X / Twitter handles
// ============================================================================

/// Extracts an X (Twitter) handle from a cell value.
///
/// Accepts three shapes:
/// - `@handle` — the `@` prefix is stripped.
/// - A profile URL (`https://x.com/handle`, with or without trailing path
///   segments or a query string) — the first path segment is taken.
/// - A bare token — any characters outside `[A-Za-z0-9_]` are stripped.
///
/// Returns an empty string for empty input or a URL that does not parse.
pub fn extract_handle(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    if let Some(rest) = value.strip_prefix('@') {
        return rest.to_string();
    }

    if value.starts_with("http") {
        let Ok(parsed) = Url::parse(value) else {
            return String::new();
        };
        let first_segment = parsed
            .path()
            .trim_matches('/')
            .split('/')
            .next()
            .unwrap_or("");
        // Query strings are split off by the URL parser, but some rows paste
        // the `?` straight into the handle text, so strip defensively.
        return first_segment
            .split('?')
            .next()
            .unwrap_or("")
            .to_string();
    }

    bare_token_chars()
        .replace_all(value, "")
        .into_owned()
}

// ============================================================================
// Instagram / YouTube handles
// ============================================================================

/// Finds the first Instagram username mentioned anywhere in `text`.
///
/// The SNS column is free-form (often several URLs joined by commas), so
/// this scans for an `instagram.com/<name>` fragment rather than parsing
/// the cell as a single URL.
pub fn extract_instagram_handle(text: &str) -> Option<String> {
    instagram_locator()
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Finds the first YouTube channel handle (`youtube.com/@name`) in `text`.
pub fn extract_youtube_handle(text: &str) -> Option<String> {
    youtube_locator()
        .captures(text)
        .map(|caps| caps[1].to_string())
}

// ============================================================================
// Compiled patterns
// ============================================================================

// Patterns are exercised by the unit tests below, so a bad pattern shows up
// as a failing test rather than a runtime panic.

fn bare_token_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").expect("bare_token_chars: invalid regex"))
}

fn instagram_locator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"instagram\.com/([^/?#\s,]+)").expect("instagram_locator: invalid regex")
    })
}

fn youtube_locator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"youtube\.com/@([A-Za-z0-9_\-.]+)").expect("youtube_locator: invalid regex")
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_prefix_is_stripped() {
        assert_eq!(extract_handle("@kochi_vibe"), "kochi_vibe");
    }

    #[test]
    fn test_profile_url_yields_first_path_segment() {
        assert_eq!(extract_handle("https://x.com/kochi_vibe"), "kochi_vibe");
        assert_eq!(extract_handle("https://twitter.com/kochi_vibe/"), "kochi_vibe");
    }

    #[test]
    fn test_status_url_yields_account_not_status_id() {
        assert_eq!(
            extract_handle("https://x.com/kochi_vibe/status/1234567890"),
            "kochi_vibe"
        );
    }

    #[test]
    fn test_query_string_is_dropped() {
        assert_eq!(extract_handle("https://x.com/kochi_vibe?s=21"), "kochi_vibe");
    }

    #[test]
    fn test_bare_handle_passes_through() {
        assert_eq!(extract_handle("kochi_vibe"), "kochi_vibe");
    }

    #[test]
    fn test_bare_token_strips_punctuation() {
        assert_eq!(extract_handle("kochi-vibe!"), "kochivibe");
        assert_eq!(extract_handle("  spaced out  "), "spacedout");
    }

    #[test]
    fn test_empty_and_malformed_yield_empty() {
        assert_eq!(extract_handle(""), "");
        assert_eq!(extract_handle("   "), "");
        assert_eq!(extract_handle("http://"), "");
    }

    #[test]
    fn test_instagram_url_in_free_text() {
        let cell = "https://lit.link/someone, https://www.instagram.com/vibe_gram/";
        assert_eq!(
            extract_instagram_handle(cell),
            Some("vibe_gram".to_string())
        );
        assert_eq!(extract_instagram_handle("no socials here"), None);
    }

    #[test]
    fn test_youtube_handle_requires_at_sign() {
        assert_eq!(
            extract_youtube_handle("https://www.youtube.com/@vibe.tube"),
            Some("vibe.tube".to_string())
        );
        // Channel-id style URLs carry no handle.
        assert_eq!(
            extract_youtube_handle("https://www.youtube.com/channel/UCabc123"),
            None
        );
    }
}
