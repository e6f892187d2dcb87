//! Metaharvest main entry point
//!
//! Command-line interface: extracts dataset metadata for one URL and prints
//! (and by default saves) a JSON report.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use metaharvest::analyzer::{ChatClient, ChatSettings, RetryingAnalyzer};
use metaharvest::config::{load_config_with_hash, resolve_api_key, Config};
use metaharvest::orchestrator::Orchestrator;
use metaharvest::output::{default_report_path, write_report, Report};
use metaharvest::research::{ResearchMode, SiteResearcher};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Metaharvest: dataset metadata discovery
///
/// Crawls a dataset's website, asks a text-analysis service for its license,
/// geographic coverage and temporal coverage, and scores what was found.
#[derive(Parser, Debug)]
#[command(name = "metaharvest")]
#[command(version)]
#[command(about = "Dataset license, place and temporal metadata discovery", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Dataset or website URL to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Extraction mode
    #[arg(long, value_enum, default_value_t = Mode::Pipeline)]
    mode: Mode,

    /// Write the report to this file instead of the default location
    #[arg(short, long, value_name = "FILE", conflicts_with = "no_save")]
    output: Option<PathBuf>,

    /// Print the report without saving it
    #[arg(long)]
    no_save: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Crawl pages and run the three extractors with quality scoring
    Pipeline,
    /// One research query for all metadata
    All,
    /// Research query for license information
    License,
    /// Research query for geographic coverage
    Place,
    /// Research query for temporal coverage
    Temporal,
}

impl Mode {
    fn as_str(&self) -> &'static str {
        match self {
            Mode::Pipeline => "pipeline",
            Mode::All => "all",
            Mode::License => "license",
            Mode::Place => "place",
            Mode::Temporal => "temporal",
        }
    }

    fn research_mode(&self) -> Option<ResearchMode> {
        match self {
            Mode::Pipeline => None,
            Mode::All => Some(ResearchMode::All),
            Mode::License => Some(ResearchMode::License),
            Mode::Place => Some(ResearchMode::Place),
            Mode::Temporal => Some(ResearchMode::Temporal),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let api_key = resolve_api_key(&config)?;
    let client = ChatClient::new(api_key, &config.analyzer)
        .context("Failed to build analyzer client")?;
    let analyzer = RetryingAnalyzer::new(
        client,
        ChatSettings::from(&config.analyzer),
        config.analyzer.max_retries,
    );

    match cli.mode.research_mode() {
        None => {
            let orchestrator = Orchestrator::from_config(&config, Arc::new(analyzer))
                .context("Failed to build page fetcher")?;
            let result = orchestrator.extract_metadata(&cli.url).await;
            emit(&cli, &config, &config_hash, result)?;
        }
        Some(mode) => {
            let researcher = SiteResearcher::new(analyzer);
            let outcome = researcher.research(&cli.url, mode).await;
            if !outcome.success {
                tracing::warn!("Research failed: {}", outcome.errors.join("; "));
            }
            emit(&cli, &config, &config_hash, outcome)?;
        }
    }

    Ok(())
}

/// Prints the report and saves it unless `--no-save` was given
fn emit<T: Serialize>(
    cli: &Cli,
    config: &Config,
    config_hash: &str,
    result: T,
) -> anyhow::Result<()> {
    let report = Report::new(&cli.url, cli.mode.as_str(), config_hash, result);
    println!("{}", report.to_json()?);

    if cli.no_save {
        return Ok(());
    }

    let path = match &cli.output {
        Some(path) => path.clone(),
        None => default_report_path(
            Path::new(&config.output.directory),
            &cli.url,
            report.timestamp,
        ),
    };
    write_report(&report, &path)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("metaharvest=info,warn"),
            1 => EnvFilter::new("metaharvest=debug,info"),
            2 => EnvFilter::new("metaharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
