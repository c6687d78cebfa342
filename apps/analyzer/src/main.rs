use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_analyzer::config::Config;
use resume_analyzer::skills::SkillCatalog;
use resume_analyzer::{Analyzer, Fidelity};

/// Analyze a resume PDF and print the report as JSON.
#[derive(Debug, Parser)]
#[command(name = "resume-analyzer", version, about)]
struct Cli {
    /// Resume file to analyze.
    path: PathBuf,

    /// Skip context snippets, per-skill years, sentence counts and interview questions.
    #[arg(long)]
    fast: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on an invalid ANALYZER_FIDELITY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_analyzer={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    let fidelity = if cli.fast { Fidelity::Fast } else { config.fidelity };
    let catalog = Arc::new(SkillCatalog::new().context("failed to compile skill catalog")?);
    info!("Skill catalog compiled ({} skills)", catalog.skills().len());

    let analyzer = Analyzer::new(catalog, fidelity);
    let report = match analyzer.analyze_path(&cli.path) {
        Ok(report) => report,
        Err(e) => {
            error!(code = e.code(), "Analysis failed: {e}");
            return Err(e).with_context(|| format!("failed to analyze {}", cli.path.display()));
        }
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize report")?;
    println!("{json}");

    Ok(())
}
