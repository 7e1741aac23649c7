// ABOUTME: Command-line entry point for CO2 classification, outfit suggestions and sensor monitoring
// ABOUTME: Reads configuration from the environment; logs go to stderr, results to stdout
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Usage:
//! ```bash
//! # Classify a CO2 series under EN 16798-1
//! ieq-advisor classify --standard EN --indoor 400,900,1600,3000 --outdoor 400
//!
//! # Suggest today's outfits
//! IEQ_OUTFIT_MAX_ITERATIONS=60 ieq-advisor suggest --population b
//!
//! # Evaluate sensor frames from a serial device
//! ieq-advisor monitor --input /dev/ttyACM0 --max-iterations 60
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ieq_advisor::{
    cache::SystemClock,
    config::AdvisorConfig,
    display::format_outfit_suggestion,
    intelligence::{classify, IaqStandard, OutdoorCo2, PopulationType, StandardComfortModel},
    logging::LoggingConfig,
    monitor::EnvironmentMonitor,
    providers::{
        ConsoleDisplay, DisplaySink, LineSensorSource, OpenMeteoProvider, SensorSource,
        WeatherProvider,
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "ieq-advisor",
    about = "Indoor environmental quality advisor",
    long_about = "Classifies CO2 against regional standards, evaluates thermal comfort and suggests what to wear today."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Classify indoor CO2 concentrations
    Classify {
        /// Standard: EN, LEHB, SS, HK, UBA or DOSH
        #[arg(long)]
        standard: String,

        /// Indoor CO2 samples in ppm, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        indoor: Vec<f64>,

        /// Outdoor CO2 in ppm: one value for all samples or one per sample
        #[arg(long, value_delimiter = ',')]
        outdoor: Vec<f64>,
    },

    /// Suggest indoor and outdoor outfits for today's weather
    Suggest {
        /// Indoor catalog: A (trousers) or B (skirts and dresses)
        #[arg(long)]
        population: Option<PopulationType>,

        /// Bound on the outfit search, overriding IEQ_OUTFIT_MAX_ITERATIONS
        #[arg(long)]
        max_iterations: Option<u32>,
    },

    /// Evaluate sensor frames and print a report per frame
    Monitor {
        /// Frame source: a device or file path, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Bound on the outfit search, overriding IEQ_OUTFIT_MAX_ITERATIONS
        #[arg(long)]
        max_iterations: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::from_env().verbose(cli.verbose).init()?;

    match cli.command {
        Command::Classify {
            standard,
            indoor,
            outdoor,
        } => run_classify(&standard, &indoor, outdoor),
        Command::Suggest {
            population,
            max_iterations,
        } => run_suggest(population, max_iterations).await,
        Command::Monitor {
            input,
            max_iterations,
        } => run_monitor(&input, max_iterations).await,
    }
}

fn run_classify(standard: &str, indoor: &[f64], outdoor: Vec<f64>) -> Result<()> {
    let standard: IaqStandard = standard.parse()?;
    let outdoor = match outdoor.as_slice() {
        [] => OutdoorCo2::default(),
        [constant] => OutdoorCo2::Constant(*constant),
        _ => OutdoorCo2::Series(outdoor),
    };

    let report = classify(standard, indoor, &outdoor)?;
    let labels = report.labels()?;
    let output = json!({
        "standard": report.standard,
        "reference": standard.reference(),
        "indices": report.indices,
        "labels": labels,
        "co2_indoor": report.co2_indoor,
        "co2_outdoor": report.co2_outdoor,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn build_monitor(config: &AdvisorConfig) -> EnvironmentMonitor {
    let weather: Arc<dyn WeatherProvider> =
        Arc::new(OpenMeteoProvider::new(config.weather.clone()));
    EnvironmentMonitor::from_config(
        config,
        weather,
        Arc::new(StandardComfortModel),
        Arc::new(SystemClock),
    )
}

async fn run_suggest(population: Option<PopulationType>, max_iterations: Option<u32>) -> Result<()> {
    let mut config = AdvisorConfig::from_env_with_max_iterations(max_iterations)?;
    if let Some(population) = population {
        config.evaluation.population = population;
    }

    let monitor = build_monitor(&config);
    let suggestion = monitor.suggest_outfits().await?;
    ConsoleDisplay::stdout()
        .send_text(&format_outfit_suggestion(&suggestion))
        .await?;
    Ok(())
}

async fn run_monitor(input: &str, max_iterations: Option<u32>) -> Result<()> {
    let config = AdvisorConfig::from_env_with_max_iterations(max_iterations)?;
    let monitor = build_monitor(&config);
    let display = ConsoleDisplay::stdout();

    match monitor.suggest_outfits().await {
        Ok(suggestion) => {
            if let Err(e) = display
                .send_text(&format_outfit_suggestion(&suggestion))
                .await
            {
                warn!(error = %e, "Failed to deliver outfit suggestion to display");
            }
        }
        Err(e) => warn!(error = %e, "No outfit suggestion available"),
    }

    let mut source: Box<dyn SensorSource> = if input == "-" {
        Box::new(LineSensorSource::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .with_context(|| format!("failed to open sensor input {input}"))?;
        Box::new(LineSensorSource::new(file))
    };
    info!(input, "Monitoring sensor frames");

    let summary = monitor.run(source.as_mut(), &display).await;
    if summary.reports == 0 && summary.failures > 0 {
        return Err(anyhow!(
            "no frame could be evaluated ({} failed cycles)",
            summary.failures
        ));
    }
    Ok(())
}
