//! # ctrctl - Container CLI
//!
//! The main binary for ctrctl.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     apps/ctrctl (THE BINARY)                 │
//! │                                                              │
//! │  ┌─────────────┐    ┌──────────────┐    ┌────────────────┐   │
//! │  │    CLI      │    │ Report       │    │ Probe Gateway  │   │
//! │  │   (clap)    │───▶│ Builder      │───▶│ (HTTP + host)  │   │
//! │  └──────┬──────┘    └──────┬───────┘    └────────────────┘   │
//! │         │                  │                                 │
//! │         └──────────────────┤                                 │
//! │                            ▼                                 │
//! │                    ┌───────────────┐                         │
//! │                    │  ctrctl-core  │                         │
//! │                    │  (THE LOGIC)  │                         │
//! │                    └───────────────┘                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! ctrctl info
//! ctrctl --json-mode info
//! ctrctl plugins
//! ctrctl caps resolve --cap-add=all --cap-drop=net_raw
//! ctrctl caps check --expect a80425fb --pid 1
//! ```

mod cli;

use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments; raw matches keep the order of --cap-add/--cap-drop.
    let matches = cli::Cli::command().get_matches();
    let cli = match cli::Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_tracing(cli.debug);

    if let Err(e) = cli::execute(cli, &matches).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `CTRCTL_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing(debug: bool) {
    let log_format = std::env::var("CTRCTL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if debug { "ctrctl=debug" } else { "ctrctl=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
