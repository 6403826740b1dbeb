//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vitals_store::DEFAULT_HISTORY_LIMIT;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "vitals")]
#[command(author, version, about = "Record and review patient vital signs", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the data file, or use VITALS_DATA_PATH env var
    #[arg(long, global = true, env = "VITALS_DATA_PATH")]
    pub data_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or repair the data file and print its location
    Init,

    /// Append one reading
    Record {
        /// Patient identifier
        #[arg(short, long)]
        patient: String,

        /// Sensor tag (ECG, BP_SYS, BP_DIA, SpO2, Temp)
        #[arg(short, long)]
        sensor: Option<String>,

        /// Reading value
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Timestamp stored as given (defaults to now)
        #[arg(short, long)]
        timestamp: Option<String>,
    },

    /// Show a patient's most recent readings
    ///
    /// The data file is opened first. Opening creates it when missing and
    /// repairs or replaces a malformed one.
    History {
        /// Patient identifier
        #[arg(short, long)]
        patient: String,

        /// Only show readings with this sensor tag
        #[arg(short, long)]
        sensor: Option<String>,

        /// Number of most recent readings to show
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List patients with stored readings
    ///
    /// The data file is opened first. Opening creates it when missing and
    /// repairs or replaces a malformed one.
    Patients,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
