//! `license-guard` — classify dependency licenses as safe or risky for commercial use.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`license_guard::config::load_config`]) and the trained model, if any.
//! 3. Manual mode (`--license`): classify the single identifier.
//!    File mode: read every file and analyze them in parallel.
//! 4. Render the requested report.
//! 5. Exit `0`, or `1` when a risky license was found and `fail_on_risky` is on.

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use license_guard::config::load_config;
use license_guard::pipeline::PROVENANCE_MANUAL;
use license_guard::report::terminal;
use license_guard::{Analysis, Classifier, LicenseModel, LogisticModel, NoModel, Pipeline, ResultRow};

/// Outcome for one input, in input order.
#[derive(Serialize)]
struct SourceReport {
    source: String,
    provenance: String,
    summary: String,
    has_risky: bool,
    /// Set when nothing could be found; reported as a warning.
    warning: Option<String>,
    rows: Vec<ResultRow>,
}

impl SourceReport {
    fn analyzed(source: String, analysis: Analysis) -> Self {
        Self {
            source,
            summary: analysis.summary(),
            provenance: analysis.provenance,
            has_risky: analysis.has_risky,
            warning: None,
            rows: analysis.rows,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let model: Arc<dyn LicenseModel> = match cli.model.as_ref().or(config.model.path.as_ref()) {
        Some(path) => {
            let model = LogisticModel::load(path)
                .with_context(|| format!("Failed to load model {}", path.display()))?;
            info!(path = %path.display(), "loaded model");
            Arc::new(model)
        }
        None => {
            warn!("no model configured, classifying with keyword rules only");
            Arc::new(NoModel)
        }
    };
    let pipeline = Pipeline::new(Classifier::new(model));

    let reports = match &cli.license {
        Some(identifier) => {
            let rows = pipeline.analyze_manual(identifier);
            let analysis = Analysis::new(PROVENANCE_MANUAL, rows);
            vec![SourceReport::analyzed(PROVENANCE_MANUAL.to_string(), analysis)]
        }
        None => cli
            .files
            .par_iter()
            .map(|path| analyze_path(&pipeline, path))
            .collect::<Result<Vec<_>>>()?,
    };

    match cli.report {
        ReportFormat::Terminal => {
            for report in &reports {
                match &report.warning {
                    Some(_) => terminal::render_nothing_found(&report.source, &report.provenance),
                    None => terminal::render(&report.source, &report.rows, cli.quiet),
                }
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    let has_risky = reports.iter().any(|r| r.has_risky);
    if has_risky && config.report.fail_on_risky {
        std::process::exit(1);
    }

    Ok(())
}

fn analyze_path(pipeline: &Pipeline, path: &Path) -> Result<SourceReport> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let source = path.display().to_string();

    let report = match pipeline.analyze_file(&source, &bytes) {
        Ok(analysis) => SourceReport::analyzed(source, analysis),
        Err(nothing) => SourceReport {
            source,
            summary: "No licenses found".to_string(),
            warning: Some(nothing.to_string()),
            provenance: nothing.provenance,
            has_risky: false,
            rows: Vec::new(),
        },
    };

    Ok(report)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
