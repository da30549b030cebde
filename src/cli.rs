use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Browse and filter anomaly-ranked HTTP exchanges
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "ANOMALY_RANK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to color output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the rows that match a query
    Filter {
        /// Ranked results file (JSON array or JSON Lines)
        file: PathBuf,

        /// Query, e.g. "method:POST AND status:>=500"
        #[arg(short, long)]
        filter: Option<String>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the output to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write rows to a CSV file
    Export {
        /// Ranked results file (JSON array or JSON Lines)
        file: PathBuf,

        /// Destination CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Query used with --visible-only
        #[arg(short, long)]
        filter: Option<String>,

        /// Export only rows matching the query instead of every row
        #[arg(long)]
        visible_only: bool,
    },
    /// Filter rows interactively, one query change per line
    Interactive {
        /// Ranked results file (JSON array or JSON Lines)
        file: PathBuf,

        /// Query to start from
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// List the quick-filter menu
    Menu,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
