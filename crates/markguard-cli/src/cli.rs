//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Markguard CLI - Extract trademark records from search reports and assess conflicts.
#[derive(Debug, Parser)]
#[command(name = "markguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MARKGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (application numbers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract trademark records from a report
    Extract(ExtractArgs),

    /// Extract records and assess each one for conflict with the target
    Assess(AssessArgs),

    /// Show or reset the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Report to read (.pdf or plain text)
    pub file: PathBuf,

    /// SQLite database to upsert the records into
    #[arg(short, long)]
    pub store: Option<PathBuf>,
}

/// Arguments for the assess command.
#[derive(Debug, Parser)]
pub struct AssessArgs {
    /// Report to read (.pdf or plain text)
    pub file: PathBuf,

    /// Maximum concurrent assessment requests
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Use a built-in assessor preset instead of the configured settings
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// SQLite database to upsert the records and verdicts into
    #[arg(short, long)]
    pub store: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Print the active configuration, not just the file location
    #[arg(long, conflicts_with = "reset")]
    pub show: bool,

    /// Overwrite the configuration file with defaults
    #[arg(long)]
    pub reset: bool,
}

/// Assessor preset argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// More parallelism, shorter waits
    Aggressive,
    /// Fewer parallel requests, longer waits
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for markguard_assessor::AssessorConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => markguard_assessor::AssessorConfig::default(),
            PresetArg::Aggressive => markguard_assessor::AssessorConfig::aggressive(),
            PresetArg::Lenient => markguard_assessor::AssessorConfig::lenient(),
        }
    }
}
