use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-guard",
    about = "Flag dependency licenses that are risky for commercial use and suggest safer ones",
    version
)]
pub struct Cli {
    /// Manifest files to analyze (package.json, package-lock.json, or any text file)
    #[arg(required_unless_present = "license")]
    pub files: Vec<PathBuf>,

    /// Classify a single license identifier instead of reading files
    #[arg(short, long, value_name = "ID", conflicts_with = "files")]
    pub license: Option<String>,

    /// Trained model artifact (JSON); overrides [model] path from the config
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Config file [default: ./.license-guard/config.toml, fallback ~/.config/license-guard/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line per file
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
