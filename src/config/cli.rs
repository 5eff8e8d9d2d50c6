use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-config")]
#[command(about = "Load, normalize and query course selection configuration")]
pub struct CliConfig {
    /// Path to the configuration file (.yaml, .yml, .toml or .json); searched in the working directory when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the normalized configuration as JSON
    Show,
    /// Load and validate the configuration
    Check,
    /// Report, per user, whether a course is included or excluded
    Match {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        id: String,
    },
}
