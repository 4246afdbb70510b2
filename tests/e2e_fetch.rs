// RosterPress - tests/e2e_fetch.rs
//
// End-to-end tests for the icon fetcher against a local mock HTTP server.
// The fetcher's client is blocking by design, so each run happens on a
// spawn_blocking thread while the async test body drives wiremock.

use std::fs;
use std::path::{Path, PathBuf};

use rosterpress::app::icons::{self, FetchConfig};
use rosterpress::core::model::FetchSummary;
use rosterpress::net::avatar::AvatarClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

fn write_roster(dir: &Path, body: &str) -> PathBuf {
    let input = dir.join("roster.csv");
    fs::write(&input, body).unwrap();
    input
}

/// Runs the fetcher with both endpoint bases pointed at the mock server.
async fn run_fetch(config: FetchConfig, base: String) -> FetchSummary {
    tokio::task::spawn_blocking(move || {
        let client = AvatarClient::with_bases(&base, &base);
        icons::run(&config, &client).unwrap()
    })
    .await
    .unwrap()
}

fn image_response(body: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_vec(), "image/png")
}

// =============================================================================
// Downloads
// =============================================================================

/// The first mirror candidate answering with an image wins.
#[tokio::test]
async fn e2e_fetch_downloads_first_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/alice"))
        .respond_with(image_response(b"png-bytes"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_roster(
        dir.path(),
        "公開可否,ハンドルネーム,XアカウントURL\ntrue,alice,@alice\n",
    );
    let config = FetchConfig {
        input,
        cache_dir: dir.path().join("cache"),
        force: false,
    };

    let summary = run_fetch(config.clone(), server.uri()).await;
    assert_eq!(summary.success, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        fs::read(config.cache_dir.join("alice.jpg")).unwrap(),
        b"png-bytes"
    );
}

/// Non-image responses, HTTP errors, and empty bodies are all skipped in
/// sequence; the origin endpoint at the end of the list still saves the row.
#[tokio::test]
async fn e2e_fetch_steps_through_failing_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not an image"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/twitter/ghost"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/https://twitter.com/ghost"))
        .respond_with(image_response(b""))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ghost/profile_image"))
        .and(query_param("size", "original"))
        .respond_with(image_response(b"origin-jpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_roster(
        dir.path(),
        "公開可否,ハンドルネーム,XアカウントURL\ntrue,ghost,@ghost\n",
    );
    let config = FetchConfig {
        input,
        cache_dir: dir.path().join("cache"),
        force: false,
    };

    let summary = run_fetch(config.clone(), server.uri()).await;
    assert_eq!(summary.success, 1);
    assert_eq!(
        fs::read(config.cache_dir.join("ghost.jpg")).unwrap(),
        b"origin-jpeg"
    );
}

/// Instagram and YouTube identities use their platform candidate lists.
#[tokio::test]
async fn e2e_fetch_instagram_and_youtube_identities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instagram/gram_gram"))
        .respond_with(image_response(b"ig"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/tubey"))
        .respond_with(image_response(b"yt"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_roster(
        dir.path(),
        "公開可否,ハンドルネーム,XアカウントURL,SNSリンク\n\
         true,gram,,https://www.instagram.com/gram_gram/\n\
         true,tube,,https://www.youtube.com/@tubey\n",
    );
    let config = FetchConfig {
        input,
        cache_dir: dir.path().join("cache"),
        force: false,
    };

    let summary = run_fetch(config.clone(), server.uri()).await;
    assert_eq!(summary.success, 2);
    assert!(config.cache_dir.join("gram_gram.jpg").is_file());
    assert!(config.cache_dir.join("tubey.jpg").is_file());
}

// =============================================================================
// Cache behavior
// =============================================================================

/// Second run with a warm cache performs zero requests: the single mounted
/// expectation covers both runs.
#[tokio::test]
async fn e2e_fetch_second_run_hits_cache_with_zero_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/alice"))
        .respond_with(image_response(b"png-bytes"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_roster(
        dir.path(),
        "公開可否,ハンドルネーム,XアカウントURL\ntrue,alice,@alice\n",
    );
    let config = FetchConfig {
        input,
        cache_dir: dir.path().join("cache"),
        force: false,
    };

    let first = run_fetch(config.clone(), server.uri()).await;
    assert_eq!(first.success, 1);

    let second = run_fetch(config.clone(), server.uri()).await;
    assert_eq!(second.success, 1, "cache hit still counts as success");

    server.verify().await;
}

/// --force bypasses the cache and overwrites the stale file.
#[tokio::test]
async fn e2e_fetch_force_refetches_cached_icon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/alice"))
        .respond_with(image_response(b"fresh"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("cache");
    fs::create_dir_all(&cache_dir).unwrap();
    fs::write(cache_dir.join("alice.jpg"), b"stale").unwrap();

    let input = write_roster(
        dir.path(),
        "公開可否,ハンドルネーム,XアカウントURL\ntrue,alice,@alice\n",
    );
    let config = FetchConfig {
        input,
        cache_dir: cache_dir.clone(),
        force: true,
    };

    let summary = run_fetch(config, server.uri()).await;
    assert_eq!(summary.success, 1);
    assert_eq!(fs::read(cache_dir.join("alice.jpg")).unwrap(), b"fresh");
}

// =============================================================================
// Tallies
// =============================================================================

/// Rows with no derivable identity count as failed; no requests are made
/// for them.
#[tokio::test]
async fn e2e_fetch_no_identity_counts_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/linked"))
        .respond_with(image_response(b"png"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_roster(
        dir.path(),
        "公開可否,ハンドルネーム,XアカウントURL,SNSリンク\n\
         true,nobody,,\n\
         true,linked,@linked,\n",
    );
    let config = FetchConfig {
        input,
        cache_dir: dir.path().join("cache"),
        force: false,
    };

    let summary = run_fetch(config, server.uri()).await;
    assert_eq!(summary.success, 1);
    assert_eq!(summary.failed, 1);
    server.verify().await;
}

/// A row whose every candidate fails lands in neither tally.
#[tokio::test]
async fn e2e_fetch_total_failure_counts_neither() {
    // No mocks mounted: every candidate gets a 404.
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_roster(
        dir.path(),
        "公開可否,ハンドルネーム,XアカウントURL\ntrue,ghost,@ghost\n",
    );
    let config = FetchConfig {
        input,
        cache_dir: dir.path().join("cache"),
        force: false,
    };

    let summary = run_fetch(config.clone(), server.uri()).await;
    assert_eq!(summary.success, 0);
    assert_eq!(summary.failed, 0);
    assert!(!config.cache_dir.join("ghost.jpg").exists());
}
