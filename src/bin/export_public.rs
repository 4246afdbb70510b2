// RosterPress - bin/export_public.rs
//
// Publisher entry point: filter the roster by the publish flag and
// regenerate the public CSV, the Markdown table, and the HTML gallery.

use clap::Parser;

use rosterpress::app::publish::{self, PublishPaths};
use rosterpress::util;
use rosterpress::util::constants::{OUT_CSV, OUT_HTML, OUT_MD};

/// Export the public roster artifacts: CSV, Markdown table, HTML gallery.
#[derive(Parser, Debug)]
#[command(name = "export_public", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    util::logging::init(cli.debug);

    tracing::info!(
        version = util::constants::APP_VERSION,
        "export_public starting"
    );

    let paths = PublishPaths::default();
    match publish::run(&paths) {
        Ok(summary) => {
            println!(
                "exported: {} rows -> {OUT_CSV}, {OUT_MD}, {OUT_HTML}",
                summary.published
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "Export failed");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
