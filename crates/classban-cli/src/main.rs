use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use classban_core::artifact::Manifest;
use classban_core::config::AuditConfig;
use classban_core::diag::{Diagnostic, DiagnosticSink};
use classban_core::report::{model::ToolInfo, render};
use classban_core::rules::RuleSet;
use classban_core::scan;

mod args;

fn main() {
    let args = args::Args::parse();
    init_logging(args.verbose);

    // Exit codes: 0 clean, 1 violations, 2 fatal (unreadable archive,
    // bad configuration or manifest).
    match run(&args) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            error!("{err:#}");
            process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &args::Args) -> Result<i32> {
    let config = AuditConfig::from_file(&args.config).context("loading rule configuration")?;
    let rules = RuleSet::compile(&config).context("compiling rule patterns")?;
    let manifest = Manifest::from_file(&args.manifest).context("loading artifact manifest")?;

    let tool = ToolInfo {
        name: classban_core::TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: args.commit.clone(),
    };

    let mut sink = LogSink;
    let report = scan::run(
        &manifest.artifacts,
        &rules,
        config.scopes.as_ref(),
        tool,
        &mut sink,
    )?;

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report),
    };
    match &args.out {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => {
            // A clean text run prints nothing.
            if !output.is_empty() {
                print!("{output}");
            }
        }
    }

    Ok(report.exit_code)
}

/// Forwards core diagnostics to the logger: skipped entries are worth a
/// warning, the rest is debug detail.
struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::EntrySkipped { .. } => warn!("{diagnostic}"),
            _ => debug!("{diagnostic}"),
        }
    }
}
