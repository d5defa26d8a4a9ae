//! CLI argument definitions using clap derive

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(author, version, about = "Bill-of-materials inventory manager")]
#[command(
    long_about = "Reads inventory requests one per line from FILE (or stdin), tracks parts and \
assemblies, and reports the raw parts needed to fill orders and stock bins."
)]
pub struct Cli {
    /// Request file (default: read from stdin)
    pub file: Option<PathBuf>,

    /// Report format [default: plain]
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Do not echo requests back before running them
    #[arg(long)]
    pub no_echo: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Config file (default: config.yaml in the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width text reports
    #[default]
    Plain,
    /// Boxed tables
    Table,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
}

impl OutputFormat {
    /// Parse a format name from configuration, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name.trim(), true).ok()
    }
}
