//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::platform::Os;

/// Resolve command arguments.
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Board name (exact, case-sensitive)
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    pub name: Option<String>,

    /// Take the board from this page URL's query string instead
    #[arg(short, long)]
    pub url: Option<String>,

    /// Show this firmware version instead of the first one
    #[arg(long = "fw-version", value_name = "LABEL")]
    pub fw_version: Option<String>,

    /// Browser user agent used to pick the default tab
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Open this tab first (overrides --user-agent)
    #[arg(long, value_enum)]
    pub tab: Option<OsArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Text to look for in board names
    pub query: String,

    /// Maximum number of results (defaults to the configured limit)
    #[arg(short, long)]
    pub limit: Option<NonZeroUsize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Versions command arguments.
#[derive(Debug, Args)]
pub struct VersionsCommand {
    /// Board name (exact, case-sensitive)
    pub name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Catalog commands.
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Validate the catalog and report every malformed record
    Check,

    /// List boards in catalog order
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Operating system argument for tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OsArg {
    /// Windows tab
    Windows,
    /// Linux tab
    Linux,
    /// macOS tab
    Osx,
}

impl From<OsArg> for Os {
    fn from(arg: OsArg) -> Self {
        match arg {
            OsArg::Windows => Self::Windows,
            OsArg::Linux => Self::Linux,
            OsArg::Osx => Self::Osx,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
    /// Page region HTML
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_arg_conversion() {
        assert_eq!(Os::from(OsArg::Windows), Os::Windows);
        assert_eq!(Os::from(OsArg::Linux), Os::Linux);
        assert_eq!(Os::from(OsArg::Osx), Os::Osx);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_resolve_command_debug() {
        let cmd = ResolveCommand {
            name: Some("FRDM-K64F".to_string()),
            url: None,
            fw_version: None,
            user_agent: None,
            tab: Some(OsArg::Linux),
            format: OutputFormat::Html,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("FRDM-K64F"));
        assert!(debug_str.contains("Linux"));
    }

    #[test]
    fn test_catalog_command_debug() {
        let cmd = CatalogCommand::List {
            format: OutputFormat::Json,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("List"));
    }
}
