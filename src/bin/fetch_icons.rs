// RosterPress - bin/fetch_icons.rs
//
// Icon fetcher entry point: walk the roster, derive each row's social
// identity, and download avatars into the local cache. Safe to re-run;
// cached icons are skipped unless --force is given.

use std::path::PathBuf;

use clap::Parser;

use rosterpress::app::icons::{self, FetchConfig};
use rosterpress::net::avatar::AvatarClient;
use rosterpress::util;

/// Fetch participant avatar icons into the local cache.
#[derive(Parser, Debug)]
#[command(name = "fetch_icons", version, about)]
struct Cli {
    /// Roster CSV to read (defaults to the repository data file).
    input: Option<PathBuf>,

    /// Refetch icons even when a cached file already exists.
    #[arg(long = "force")]
    force: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    util::logging::init(cli.debug);

    tracing::info!(
        version = util::constants::APP_VERSION,
        force = cli.force,
        "fetch_icons starting"
    );

    let mut config = FetchConfig::default();
    if let Some(input) = cli.input {
        config.input = input;
    }
    config.force = cli.force;

    let client = AvatarClient::new();
    match icons::run(&config, &client) {
        Ok(summary) => {
            println!("done. success={}, failed={}", summary.success, summary.failed);
        }
        Err(err) => {
            tracing::error!(error = %err, "Fetch failed");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
