// RosterPress - util/constants.rs
//
// Single source of truth for all named constants: file paths, roster column
// names, the publish-flag token set, and avatar endpoints. Both binaries and
// the test suite reference these rather than repeating string literals.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "RosterPress";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-agent sent with avatar requests. unavatar and the origin platforms
/// both refuse requests with an empty or default library UA.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; RosterPress/0.2)";

// =============================================================================
// File layout
// =============================================================================

/// Default roster input file (UTF-8 CSV, first row = headers).
pub const IN_CSV: &str = "data/participants_template.csv";

/// Filtered CSV output path.
pub const OUT_CSV: &str = "data/public/participants_public.csv";

/// Markdown roster output path.
pub const OUT_MD: &str = "docs/名簿_公開版.md";

/// HTML gallery output path (served as-is by the hosting platform).
pub const OUT_HTML: &str = "docs/index.html";

/// Directory under docs/ where gallery avatar files are staged.
pub const DOCS_ASSETS_DIR: &str = "docs/assets/icons";

/// Path prefix used in HTML `src` attributes for staged avatars,
/// relative to the docs root.
pub const DOCS_ASSETS_PREFIX: &str = "assets/icons";

/// Icon cache directory written by the fetch_icons job and read back by
/// the publisher's avatar resolution.
pub const ICON_CACHE_DIR: &str = "assets/icons";

// =============================================================================
// Roster columns
// =============================================================================

/// Publish flag. The one column that must exist; its absence is fatal.
pub const COL_PUBLISH: &str = "公開可否";

/// Display name shown on cards and checked against the deny-list.
pub const COL_NAME: &str = "ハンドルネーム";

/// Short feature tag shown under the name.
pub const COL_FEATURE: &str = "特徴（ひとことで）";

/// Location, shown in the card meta line.
pub const COL_LOCATION: &str = "お住まい";

/// Occupation, shown in the card meta line.
pub const COL_OCCUPATION: &str = "お仕事";

/// Free-text description (primary).
pub const COL_DESCRIPTION: &str = "リアル人物の特徴説明";

/// Free-text description (fallback when the primary is empty).
pub const COL_COMMENT: &str = "ひとこと";

/// X/Twitter profile URL (or a raw `@handle`).
pub const COL_X_URL: &str = "XアカウントURL";

/// Comma-separated list of additional social links.
pub const COL_SNS_LINKS: &str = "SNSリンク";

/// Explicit icon path or URL, overriding every derived avatar source.
pub const COL_ICON: &str = "アイコンURL";

// =============================================================================
// Publish filter
// =============================================================================

/// Flag values (after trim + lowercase) that mark a row as published.
pub const TRUTHY_TOKENS: &[&str] = &["true", "1", "yes", "y", "公開", "ok"];

// =============================================================================
// Gallery
// =============================================================================

/// Official event site, linked from the Markdown roster and the HTML header.
pub const OFFICIAL_URL: &str = "https://kochi-vibecording-camp.netlify.app/";

/// Display names always sorted to the end of the gallery: the template's
/// sample row and the organizer placeholder.
pub const SORT_LAST_NAMES: &[&str] = &["サンプル太郎", "運営"];

/// Link-aggregator domain that gets a fixed label and the `promo` CSS class
/// instead of the generic stripped-scheme label.
pub const PROMO_DOMAIN: &str = "lit.link";

/// Maximum outbound links rendered per card.
pub const MAX_CARD_LINKS: usize = 4;

/// Maximum characters of a link label before truncation.
pub const MAX_LINK_LABEL: usize = 28;

/// Maximum avatar sources embedded per card (one `src` + onerror fallbacks).
pub const MAX_AVATAR_SOURCES: usize = 3;

// =============================================================================
// Avatar endpoints
// =============================================================================

/// Avatar mirror base. unavatar re-serves platform profile images without
/// authentication.
pub const UNAVATAR_BASE: &str = "https://unavatar.io";

/// Origin base for the X/Twitter live profile-image endpoint used as the
/// fetcher's last-resort candidate.
pub const X_ORIGIN_BASE: &str = "https://twitter.com";

/// Current X web origin, used for the gallery's live profile-image fallback.
pub const X_WEB_BASE: &str = "https://x.com";

/// Per-request timeout in seconds. There is no retry; a timed-out candidate
/// simply yields to the next one in the list.
pub const FETCH_TIMEOUT_SECS: u64 = 20;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG nor --debug is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
