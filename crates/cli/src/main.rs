//! rankeval CLI - ranking quality evaluation
//!
//! This binary scores ranked search results against relevance judgments.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rankeval::{render_json, render_text, MetricOverrides};
use rankeval_core::config::Config;
use rankeval_evaluator::{RankEvalSpec, RankEvaluator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "rankeval")]
#[command(about = "Ranking quality evaluation against relevance judgments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate rated requests from a JSON spec
    Evaluate {
        /// Evaluation spec (JSON)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Metric kind: recall or mean_average_precision
        #[arg(long)]
        metric: Option<String>,

        /// Window size; only the top k hits of each request are scored
        #[arg(long)]
        k: Option<i64>,

        /// Ratings at or above this value count as relevant
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        /// Skip hits without a judgment instead of counting them as false
        /// positives; pass `--ignore-unlabeled false` to turn it off
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        ignore_unlabeled: Option<bool>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    match cli.command {
        Some(Commands::Evaluate {
            input,
            metric,
            k,
            threshold,
            ignore_unlabeled,
            format,
        }) => {
            let overrides = MetricOverrides {
                kind: metric,
                k,
                relevant_rating_threshold: threshold,
                ignore_unlabeled,
            };
            evaluate(cli.config.as_deref(), &input, &overrides, format).await
        }
        Some(Commands::Config) => show_config(cli.config.as_deref()),
        None => {
            println!("Run 'rankeval evaluate --input <FILE>' to score a spec, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "rankeval={level},rankeval_core={level},rankeval_evaluator={level}"
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Evaluate a spec file and print the report
async fn evaluate(
    config_path: Option<&Path>,
    input: &Path,
    overrides: &MetricOverrides,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate()?;

    let mut spec = RankEvalSpec::from_path(input)
        .with_context(|| format!("Failed to load evaluation spec {}", input.display()))?;

    if let Some(metric) = overrides
        .resolve(&config.metric, spec.metric.as_ref())
        .context("Invalid metric flags")?
    {
        info!(metric = metric.name(), k = metric.k(), "Applying metric flags");
        spec.metric = Some(metric);
    }

    let evaluator = RankEvaluator::new(&config)?;
    debug!(default_metric = ?evaluator.default_metric(), "Evaluator ready");

    let response = evaluator.evaluate(spec).await?;

    let output = match format {
        OutputFormat::Text => render_text(&response),
        OutputFormat::Json => render_json(&response)?,
    };
    println!("{output}");

    Ok(())
}

/// Print the configuration after defaults, file, and environment are merged
fn show_config(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate()?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
