//! Insurance Cost Predictor - Main Entry Point
//!
//! Loads both models once, then prices applicants read from a file or stdin
//! and prints the predictions or the models' feature-importance rankings.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use insurance_cost_predictor::{
    config::{AppConfig, LoggingConfig},
    metrics::PredictionMetrics,
    models::registry,
    report, Applicant, InferenceEngine,
};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "insurance-cost-predictor",
    version,
    about = "Predict insurance cost from health and lifestyle attributes"
)]
struct Cli {
    /// Configuration file [default: config/config.toml]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict the insurance cost of one or more applicants
    Predict {
        /// JSON file with an applicant, an array of applicants, or one
        /// applicant per line; reads stdin when omitted or "-"
        input: Option<PathBuf>,
    },
    /// Show each model's feature importances, highest first
    Importance,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    init_tracing(&config.logging, cli.verbose)?;
    debug!(config = ?cli.config, "Configuration loaded");

    let engine = registry::init(&config)?;

    match &cli.command {
        Command::Predict { input } => run_predict(engine, &config, input.as_ref(), cli.format),
        Command::Importance => run_importance(engine, cli.format),
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("insurance_cost_predictor={}", level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn run_predict(
    engine: &InferenceEngine,
    config: &AppConfig,
    input: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let raw = read_input(input)?;
    let applicants = parse_applicants(&raw)?;
    info!(count = applicants.len(), "Pricing applicants");

    let metrics = PredictionMetrics::new();
    let mut quotes = Vec::with_capacity(applicants.len());

    for (index, applicant) in applicants.iter().enumerate() {
        if let Err(e) = applicant.validate() {
            metrics.record_failure();
            warn!(applicant = index, error = %e, "Applicant rejected");
            metrics.print_summary();
            bail!("applicant {} is out of range: {}", index, e);
        }

        let start = Instant::now();
        let prediction = match engine.predict_applicant(applicant) {
            Ok(prediction) => prediction,
            Err(e) => {
                metrics.record_failure();
                error!(applicant = index, error = %e, "Prediction failed");
                metrics.print_summary();
                return Err(e.into());
            }
        };
        metrics.record_prediction(start.elapsed(), &prediction);

        match format {
            OutputFormat::Text => {
                if applicants.len() > 1 {
                    println!("Applicant {}", index + 1);
                }
                print!(
                    "{}",
                    report::render_prediction(
                        &prediction,
                        engine.random_forest_label(),
                        engine.gradient_boosting_label(),
                        config.display.decimals,
                    )
                );
            }
            OutputFormat::Json => quotes.push(prediction.to_quote(applicant)),
        }
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
    }

    metrics.print_summary();
    Ok(())
}

fn run_importance(engine: &InferenceEngine, format: OutputFormat) -> Result<()> {
    let rankings = engine.importance_rankings()?;

    match format {
        OutputFormat::Text => {
            for (i, importance) in rankings.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", report::render_importance(importance));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rankings)?),
    }
    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read applicants from {:?}", path)),
        _ => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read applicants from stdin")?;
            Ok(raw)
        }
    }
}

/// Accept a single object, an array, or a stream of objects
fn parse_applicants(raw: &str) -> Result<Vec<Applicant>> {
    let trimmed = raw.trim_start();
    let applicants = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<Applicant>>(trimmed).context("Invalid applicant array")?
    } else {
        serde_json::Deserializer::from_str(trimmed)
            .into_iter::<Applicant>()
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid applicant record")?
    };

    if applicants.is_empty() {
        bail!("no applicants in input");
    }
    Ok(applicants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_object() {
        let applicants = parse_applicants(r#"{"age": 30, "bmi": 25.0}"#).unwrap();
        assert_eq!(applicants, vec![Applicant::default()]);
    }

    #[test]
    fn test_parse_array_and_lines() {
        let array = parse_applicants(
            r#"[{"age": 30, "bmi": 25.0}, {"age": 40, "diabetes": "Yes", "bmi": 30.0}]"#,
        )
        .unwrap();
        assert_eq!(array.len(), 2);
        assert!(array[1].diabetes.is_yes());

        let lines = parse_applicants(
            "{\"age\": 30, \"bmi\": 25.0}\n{\"age\": 50, \"bmi\": 22.5}\n",
        )
        .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].age, 50);
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed_input() {
        assert!(parse_applicants("   ").is_err());
        assert!(parse_applicants("[]").is_err());
        assert!(parse_applicants(r#"{"age": "old"}"#).is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "insurance-cost-predictor",
            "--format",
            "json",
            "predict",
            "applicants.json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Command::Predict { input: Some(ref p) } if p == &PathBuf::from("applicants.json")
        ));

        let cli = Cli::try_parse_from(["insurance-cost-predictor", "importance", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, None);

        let cli = Cli::try_parse_from([
            "insurance-cost-predictor",
            "--config",
            "/etc/insurance.toml",
            "importance",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/insurance.toml")));
    }
}
