use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "classban",
    version,
    about = "Audits resolved JVM dependency archives for banned class references"
)]
pub struct Args {
    /// Path to the TOML rule configuration
    #[arg(long, default_value = "classban.toml")]
    pub config: PathBuf,

    /// Path to the resolver's JSON artifact manifest
    #[arg(long)]
    pub manifest: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,

    /// Log skipped-entry diagnostics and debug detail to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Silent on success, violation report on failure
    Text,
    /// Full machine report on every outcome
    Json,
}
