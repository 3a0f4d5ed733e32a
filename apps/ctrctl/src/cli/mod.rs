//! # ctrctl CLI Module
//!
//! ## Available Commands
//!
//! - `info` - Show system-wide daemon and host information (default)
//! - `plugins` - List daemon plugins and their load status
//! - `caps resolve` - Compute the effective capability mask for add/drop flags
//! - `caps show` - Show the capability sets and seccomp mode of a process
//! - `caps check` - Compare a process's effective capabilities and seccomp
//!   mode to expected values

mod commands;

use clap::{ArgAction, ArgMatches, Parser, Subcommand};
use ctrctl::config::{Config, Overrides};
use ctrctl_core::{CapAction, CtrError, SeccompMode};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// ctrctl - Docker-compatible container CLI
///
/// Inspects the container daemon and resolves container capability sets.
#[derive(Parser, Debug)]
#[command(name = "ctrctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show capability names alongside masks
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Daemon API address
    #[arg(short = 'H', long, global = true)]
    pub address: Option<String>,

    /// Daemon namespace
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Snapshotter reported as the storage driver
    #[arg(long, global = true)]
    pub snapshotter: Option<String>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Deadline for each daemon probe, in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display system-wide information
    Info,

    /// List daemon plugins and their load status
    Plugins,

    /// Capability tooling
    Caps {
        #[command(subcommand)]
        action: CapsCommand,
    },
}

/// `caps` subcommands.
#[derive(Subcommand, Debug)]
pub enum CapsCommand {
    /// Resolve --cap-add/--cap-drop flags, applied in command-line order
    Resolve {
        /// Base mask in hex (default: the container default set)
        #[arg(long)]
        base: Option<String>,

        /// Host capability mask in hex (default: CapEff of --all-from)
        #[arg(long, conflicts_with = "all_from")]
        all: Option<String>,

        /// Status file to read the host mask from
        #[arg(long, default_value = "/proc/1/status")]
        all_from: PathBuf,

        /// Capability to add, or "all"
        #[arg(long = "cap-add", action = ArgAction::Append)]
        cap_add: Vec<String>,

        /// Capability to drop, or "all"
        #[arg(long = "cap-drop", action = ArgAction::Append)]
        cap_drop: Vec<String>,
    },

    /// Show the capability sets of a process
    Show {
        /// Process ID
        #[arg(short, long, default_value = "1")]
        pid: u32,

        /// Read this status file instead of /proc/<pid>/status
        #[arg(long)]
        status_file: Option<PathBuf>,
    },

    /// Check a process's effective capabilities and seccomp mode
    Check {
        /// Expected effective mask in hex
        #[arg(short, long, required_unless_present = "expect_seccomp")]
        expect: Option<String>,

        /// Expected seccomp mode: 0/disabled, 1/strict or 2/filter
        #[arg(long, value_name = "MODE")]
        expect_seccomp: Option<SeccompMode>,

        /// Process ID
        #[arg(short, long, default_value = "1")]
        pid: u32,

        /// Read this status file instead of /proc/<pid>/status
        #[arg(long)]
        status_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Command-line layer of the configuration.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            address: self.address.clone(),
            namespace: self.namespace.clone(),
            snapshotter: self.snapshotter.clone(),
            debug: self.debug,
            timeout_ms: self.timeout_ms,
        }
    }
}

// =============================================================================
// DIRECTIVE ORDERING
// =============================================================================

/// Recover the interleaved order of `--cap-add` and `--cap-drop` flags.
///
/// The derived struct keeps the two lists apart, so the original positions
/// come from the raw matches.
pub fn ordered_directives(matches: &ArgMatches) -> Vec<(CapAction, String)> {
    let Some(resolve) = matches
        .subcommand_matches("caps")
        .and_then(|caps| caps.subcommand_matches("resolve"))
    else {
        return Vec::new();
    };

    let mut indexed: Vec<(usize, CapAction, String)> = Vec::new();
    for (id, action) in [("cap_add", CapAction::Add), ("cap_drop", CapAction::Drop)] {
        if let (Some(values), Some(indices)) =
            (resolve.get_many::<String>(id), resolve.indices_of(id))
        {
            indexed.extend(
                indices
                    .zip(values)
                    .map(|(index, value)| (index, action, value.clone())),
            );
        }
    }

    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, action, value)| (action, value))
        .collect()
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli, matches: &ArgMatches) -> Result<(), CtrError> {
    let json_mode = cli.json_mode;
    let verbose = cli.verbose;

    match cli.command {
        None | Some(Commands::Info) => {
            let config = Config::load(&cli.overrides())?;
            cmd_info(&config, json_mode).await
        }
        Some(Commands::Plugins) => {
            let config = Config::load(&cli.overrides())?;
            cmd_plugins(&config, json_mode).await
        }
        Some(Commands::Caps { action }) => match action {
            CapsCommand::Resolve {
                base, all, all_from, ..
            } => cmd_caps_resolve(
                base.as_deref(),
                all.as_deref(),
                &all_from,
                &ordered_directives(matches),
                verbose,
                json_mode,
            ),
            CapsCommand::Show { pid, status_file } => {
                cmd_caps_show(&status_path(pid, status_file), verbose, json_mode)
            }
            CapsCommand::Check {
                expect,
                expect_seccomp,
                pid,
                status_file,
            } => cmd_caps_check(
                expect.as_deref(),
                expect_seccomp,
                &status_path(pid, status_file),
                json_mode,
            ),
        },
    }
}

fn status_path(pid: u32, status_file: Option<PathBuf>) -> PathBuf {
    status_file.unwrap_or_else(|| PathBuf::from(format!("/proc/{}/status", pid)))
}

// =============================================================================
// TESTS
// =============================================================================
