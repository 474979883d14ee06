use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "infra-audit",
    version,
    about = "Aggregates heterogeneous infrastructure audit reports into one health view",
    long_about = "infra-audit normalizes JSON reports from independent infrastructure scanners \
                  into a single issue model, scores overall health, and tracks how it moves \
                  across runs."
)]
pub struct Cli {
    /// Tool report files to aggregate (JSON)
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Compare the aggregated run against a stored baseline run (JSON)
    #[arg(long)]
    pub diff: Option<PathBuf>,

    /// Directory holding historical runs
    #[arg(long)]
    pub history_dir: Option<PathBuf>,

    /// Analyze the trend over the last N runs in the history directory
    /// instead of aggregating report files
    #[arg(long, value_name = "N")]
    pub trend: Option<usize>,

    /// Store the aggregated run into the history directory
    #[arg(long)]
    pub save: bool,

    /// Limit displayed recommendations
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Verbose output (lists every issue)
    #[arg(short, long)]
    pub verbose: bool,
}
