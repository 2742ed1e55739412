//! Command implementations for the telemetry processor CLI
//!
//! This module contains the command execution logic: configuration layering,
//! logging setup, session orchestration and report output.

use crate::app::services::air_quality::IntervalSpec;
use crate::app::services::session::{ActiveDataset, TelemetrySession};
use crate::app::services::telemetry_csv_parser::write_dataset;
use crate::cli::args::{
    AirQualityArgs, Args, CleanArgs, Commands, InputArgs, ReportArgs, SeriesArgs, StatsArgs,
};
use crate::cli::report::{
    FullReport, render_air_quality, render_cleaning, render_full_report, render_series,
    render_stats,
};
use crate::config::{Config, LoggingConfig, OutputFormat};
use crate::{Error, Result};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main command runner for the telemetry processor
///
/// This function orchestrates one invocation:
/// 1. Validate arguments and load layered configuration
/// 2. Set up logging
/// 3. Load the telemetry file into a session
/// 4. Run the selected command and print its report
pub async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    args.validate()?;

    let config_path = resolve_config_path(&args);
    let config = load_configuration(&args, config_path.as_deref())?;

    setup_logging(&config.logging);

    info!("Starting telemetry processor");
    debug!("Command line arguments: {:?}", args);
    match &config_path {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = &args.command else {
        return Ok(());
    };

    let format = config.output.format;
    let interval = config.air_quality.altitude_interval;
    let mut session = TelemetrySession::new(config.cleaning.clone());

    match command {
        Commands::Clean(clean_args) => run_clean(&mut session, clean_args, format).await?,
        Commands::Stats(stats_args) => run_stats(&mut session, stats_args, format).await?,
        Commands::AirQuality(aq_args) => {
            run_air_quality(&mut session, aq_args, interval, format).await?
        }
        Commands::Report(report_args) => {
            run_report(&mut session, report_args, interval, format).await?
        }
        Commands::Series(series_args) => run_series(&mut session, series_args, format).await?,
    }

    info!("Completed in {:.2?}", start_time.elapsed());
    Ok(())
}

/// Pick the config file: explicit `-c`, else the default location if it exists
fn resolve_config_path(args: &Args) -> Option<PathBuf> {
    match &args.config_file {
        Some(path) => Some(path.clone()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    }
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &Args, config_file: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_layered(config_file)?;

    // Apply CLI argument overrides
    apply_cli_overrides(&mut config, args)?;

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(base_altitude) = args.input().and_then(|input| input.base_altitude) {
        config.cleaning.base_altitude = base_altitude;
    }

    let interval = match &args.command {
        Some(Commands::AirQuality(aq_args)) => aq_args.interval,
        Some(Commands::Report(report_args)) => report_args.interval,
        _ => None,
    };
    if let Some(interval) = interval {
        config.air_quality.altitude_interval = interval;
    }

    if let Some(format) = args.output_format {
        config.output.format = format;
    }

    // Override logging settings
    if let Some(level) = args.get_log_level() {
        config.logging.level = level.to_string();
    }
    if args.quiet {
        config.logging.structured = false;
        config.cleaning.show_progress = false;
    }

    // Progress bars would interleave with machine-readable stdout
    if config.output.format != OutputFormat::Human {
        config.cleaning.show_progress = false;
    }

    Ok(())
}

/// Set up structured logging from the resolved logging configuration
fn setup_logging(logging: &LoggingConfig) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("telemetry_processor={}", logging.level)));

    // A subscriber may already be installed when running inside tests
    let installed = if logging.structured {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", logging.level);
    }
}

/// Load the input file into the session
async fn load_input(session: &mut TelemetrySession, input: &InputArgs) -> Result<()> {
    let stats = session.load(&input.file).await?;
    info!(
        "Parsed {} rows ({:.1}% of records, {} warnings)",
        stats.rows_parsed,
        stats.success_rate(),
        stats.warnings.len()
    );
    Ok(())
}

/// Make the requested snapshot current, cleaning first when needed
fn select_dataset(session: &mut TelemetrySession, dataset: ActiveDataset) -> Result<()> {
    if dataset == ActiveDataset::Cleaned && session.cleaned().is_none() {
        session.clean_default()?;
    }
    session.select(dataset)
}

/// Downgrade non-fatal pipeline errors to a warning
fn skip_non_fatal<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if !error.is_fatal() => {
            warn!("{}", error);
            eprintln!("{} {}", "Skipped:".bright_yellow().bold(), error);
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

async fn run_clean(
    session: &mut TelemetrySession,
    args: &CleanArgs,
    format: OutputFormat,
) -> Result<()> {
    load_input(session, &args.input).await?;

    let report = session.clean_default()?;
    info!("{}", report.summary());
    println!("{}", render_cleaning(report, format)?);

    if let Some(export_path) = &args.export {
        let cleaned = session
            .cleaned()
            .ok_or_else(|| Error::input_missing("export", "cleaning produced no dataset"))?;
        let written = write_dataset(cleaned, export_path)?;
        if format == OutputFormat::Human {
            println!(
                "{} {} rows to {}",
                "Exported".bright_green().bold(),
                written,
                export_path.display()
            );
        }
    }

    Ok(())
}

async fn run_stats(
    session: &mut TelemetrySession,
    args: &StatsArgs,
    format: OutputFormat,
) -> Result<()> {
    load_input(session, &args.input).await?;
    select_dataset(session, args.dataset)?;

    let summaries = session.describe()?;
    println!("{}", render_stats(&summaries, args.dataset, format)?);
    Ok(())
}

async fn run_air_quality(
    session: &mut TelemetrySession,
    args: &AirQualityArgs,
    interval: IntervalSpec,
    format: OutputFormat,
) -> Result<()> {
    load_input(session, &args.input).await?;
    select_dataset(session, args.dataset)?;

    if let Some(assessment) = skip_non_fatal(session.classify(interval))? {
        println!("{}", render_air_quality(&assessment, format)?);
    }
    Ok(())
}

async fn run_report(
    session: &mut TelemetrySession,
    args: &ReportArgs,
    interval: IntervalSpec,
    format: OutputFormat,
) -> Result<()> {
    load_input(session, &args.input).await?;

    let cleaning = session.clean_default()?.clone();
    let stats = session.describe()?;
    let air_quality = skip_non_fatal(session.classify(interval))?;

    let report = FullReport {
        source: args.input.file.display().to_string(),
        headers: session.headers()?,
        parse_stats: session.parse_stats(),
        cleaning: &cleaning,
        stats: &stats,
        air_quality: air_quality.as_ref(),
    };
    println!("{}", render_full_report(&report, format)?);
    Ok(())
}

async fn run_series(
    session: &mut TelemetrySession,
    args: &SeriesArgs,
    format: OutputFormat,
) -> Result<()> {
    load_input(session, &args.input).await?;
    select_dataset(session, args.dataset)?;

    let points = session.series(&args.x_column, &args.y_column)?;
    debug!(
        "Extracted {} points for {} vs {}",
        points.len(),
        args.y_column,
        args.x_column
    );
    println!(
        "{}",
        render_series(&points, &args.x_column, &args.y_column, args.chart, format)?
    );
    Ok(())
}
