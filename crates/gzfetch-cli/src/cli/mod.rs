//! CLI for the gzfetch transfer utilities.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gzfetch_core::config;
use std::path::PathBuf;

use commands::{run_copy, run_expand_home, run_fetch, run_ping, run_unix_path, FetchArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gzfetch")]
#[command(about = "gzfetch: gzip-aware download staging and path helpers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a gzip-compressed resource into a destination file.
    Fetch {
        /// HTTP/HTTPS URL of the gzip resource.
        url: String,
        /// Destination file (`~/` is expanded).
        destination: String,
        /// Treat a missing or unreachable resource as a normal outcome.
        #[arg(long)]
        if_available: bool,
        /// Directory for the temp file (default: config, then platform temp dir).
        #[arg(long, value_name = "DIR")]
        temp_dir: Option<PathBuf>,
        /// Re-encode decoded bytes verbatim instead of line by line.
        #[arg(long)]
        bytes: bool,
    },

    /// Check whether a URL answers a HEAD request with 2xx/3xx.
    Ping {
        /// HTTP/HTTPS URL to probe.
        url: String,
        /// Timeout in milliseconds for connect and response each (default from config).
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,
    },

    /// Copy a file byte for byte.
    Copy {
        /// Source file.
        source: PathBuf,
        /// Destination file (created or overwritten).
        destination: PathBuf,
    },

    /// Print a path in Unix convention with a trailing slash.
    UnixPath {
        path: String,
    },

    /// Print a path with a leading `~/` expanded to the home directory.
    ExpandHome {
        path: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.command.run()
    }

    fn run(self) -> Result<()> {
        match self {
            CliCommand::Fetch {
                url,
                destination,
                if_available,
                temp_dir,
                bytes,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(
                    &cfg,
                    FetchArgs {
                        url,
                        destination,
                        if_available,
                        temp_dir,
                        bytes,
                    },
                )?
            }
            CliCommand::Ping { url, timeout_ms } => {
                let cfg = config::load_or_init()?;
                run_ping(&cfg, &url, timeout_ms)
            }
            CliCommand::Copy {
                source,
                destination,
            } => run_copy(&source, &destination)?,
            CliCommand::UnixPath { path } => run_unix_path(&path),
            CliCommand::ExpandHome { path } => run_expand_home(&path),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
