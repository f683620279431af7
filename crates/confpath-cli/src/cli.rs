//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use confpath_core::Dialect;

/// confpath - Flatten, search and edit indentation-structured configurations
#[derive(Parser, Debug)]
#[command(name = "confpath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options that build the session settings.
///
/// Applied in order: built-in default, settings file, dialect, single flags.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsArgs {
    /// Settings file (TOML)
    #[arg(long = "settings", global = true, env = "CONFPATH_SETTINGS", value_name = "FILE")]
    pub settings_file: Option<PathBuf>,

    /// Dialect preset (nokia-sros or cisco-ios)
    #[arg(long, global = true)]
    pub dialect: Option<Dialect>,

    /// Spaces per indentation level
    #[arg(long, global = true)]
    pub step_space: Option<usize>,

    /// Comment prefix, repeatable; replaces the preset's prefixes
    #[arg(long = "comment", global = true, value_name = "PREFIX")]
    pub comment_prefixes: Vec<String>,

    /// Separator between path segments in CwP-text
    #[arg(long, global = true)]
    pub separator: Option<String>,

    /// Attach over-indented lines to their nearest ancestor instead of failing
    #[arg(long, global = true)]
    pub lenient: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print a configuration as CwP-text, one line per entry
    Flatten {
        /// Configuration file
        file: PathBuf,
    },

    /// List entries whose path and value match
    ///
    /// Examples:
    ///   confpath search router.cfg --value "no shutdown"
    ///   confpath search router.cfg --path 'configure,card \d' --regex --json
    Search {
        /// Configuration file
        file: PathBuf,

        /// Pattern for the separator-joined path
        #[arg(short, long, default_value = "")]
        path: String,

        /// Pattern for the line value
        #[arg(long, default_value = "")]
        value: String,

        /// Treat patterns as regular expressions
        #[arg(short, long)]
        regex: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print whether a CwP-text block occurs in the configuration
    Check {
        /// Configuration file
        file: PathBuf,

        /// CwP-text block, one entry per line
        #[arg(short, long)]
        block: String,

        /// Treat the block as regular expressions
        #[arg(short, long)]
        regex: bool,
    },

    /// Apply an edit script to a configuration
    Apply {
        /// Configuration file
        file: PathBuf,

        /// Edit script (TOML)
        #[arg(short, long)]
        script: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
