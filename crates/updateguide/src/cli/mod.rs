//! Command-line interface for updateguide.
//!
//! This module provides the CLI structure for the `upguide` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CatalogCommand, ConfigCommand, OsArg, OutputFormat, ResolveCommand, SearchCommand,
    VersionsCommand,
};

/// upguide - Firmware update instructions per board
///
/// Looks up boards in the update page catalog and prints the instructions,
/// firmware file, and version choices the page would show.
#[derive(Debug, Parser)]
#[command(name = "upguide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the catalog JSON (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a board to its instructions and firmware
    Resolve(ResolveCommand),

    /// Suggest boards matching a search text
    Search(SearchCommand),

    /// List the firmware versions of a board
    Versions(VersionsCommand),

    /// Inspect the board catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
