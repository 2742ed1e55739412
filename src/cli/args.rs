//! Command-line argument definitions for the telemetry processor
//!
//! This module defines the complete CLI interface using clap derive API.
//! Global flags (config file, verbosity, output format) apply to every
//! subcommand.

use crate::app::services::air_quality::IntervalSpec;
use crate::app::services::session::ActiveDataset;
use crate::app::services::statistics::ChartType;
use crate::config::OutputFormat;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the flight telemetry processor
///
/// Cleans probe telemetry CSV files, computes per-column statistics and
/// classifies air quality from gas-sensor resistance.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "telemetry-processor",
    version,
    about = "Clean and analyse CSV flight telemetry from atmospheric probes",
    long_about = "Processes CSV flight telemetry (temperature, pressure, humidity, gas resistance, \
                  inertial axes, attitude and altitude). Removes duplicate timestamps and physically \
                  impossible readings, corrects altitude against a ground baseline, computes \
                  descriptive statistics and classifies air quality from gas-sensor resistance."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/telemetry-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results; falls back to the configured format
    #[arg(
        long = "output-format",
        value_enum,
        global = true,
        help = "Output format for results"
    )]
    pub output_format: Option<OutputFormat>,
}

/// Available subcommands for the telemetry processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Clean a telemetry file and print the cleaning report
    Clean(CleanArgs),
    /// Descriptive statistics for every numeric column
    Stats(StatsArgs),
    /// Air-quality classification and altitude profile
    AirQuality(AirQualityArgs),
    /// Cleaning report, statistics and air quality in one pass
    Report(ReportArgs),
    /// Numeric (x, y) pairs for an ad-hoc chart
    Series(SeriesArgs),
}

/// Input file and baseline shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    /// Telemetry CSV file with a header row
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Ground-level altitude subtracted during cleaning (metres)
    #[arg(
        short = 'b',
        long = "base-altitude",
        value_name = "METRES",
        allow_negative_numbers = true,
        help = "Baseline altitude in metres (default from config, 571)"
    )]
    pub base_altitude: Option<f64>,
}

/// Arguments for the clean command
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the cleaned dataset to a CSV file
    #[arg(
        short = 'o',
        long = "export",
        value_name = "FILE",
        help = "Write the cleaned dataset as CSV"
    )]
    pub export: Option<PathBuf>,
}

/// Arguments for the stats command
#[derive(Debug, Clone, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Dataset snapshot to describe
    #[arg(
        short = 'd',
        long = "dataset",
        value_enum,
        default_value_t = ActiveDataset::Original,
        help = "Dataset to analyse"
    )]
    pub dataset: ActiveDataset,
}

/// Arguments for the air-quality command
#[derive(Debug, Clone, Parser)]
pub struct AirQualityArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Dataset snapshot to classify
    #[arg(
        short = 'd',
        long = "dataset",
        value_enum,
        default_value_t = ActiveDataset::Cleaned,
        help = "Dataset to analyse"
    )]
    pub dataset: ActiveDataset,

    /// Altitude aggregation: `all` or a band width in metres
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "all|METRES",
        help = "Altitude aggregation interval ('all' or band width in metres)"
    )]
    pub interval: Option<IntervalSpec>,
}

/// Arguments for the report command
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Altitude aggregation: `all` or a band width in metres
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "all|METRES",
        help = "Altitude aggregation interval ('all' or band width in metres)"
    )]
    pub interval: Option<IntervalSpec>,
}

/// Arguments for the series command
#[derive(Debug, Clone, Parser)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column for the horizontal axis
    #[arg(short = 'x', long = "x", value_name = "COLUMN")]
    pub x_column: String,

    /// Column for the vertical axis
    #[arg(short = 'y', long = "y", value_name = "COLUMN")]
    pub y_column: String,

    /// Chart type passed through to the renderer
    #[arg(long = "chart", value_enum, default_value_t = ChartType::Line)]
    pub chart: ChartType,

    /// Dataset snapshot to read
    #[arg(
        short = 'd',
        long = "dataset",
        value_enum,
        default_value_t = ActiveDataset::Cleaned,
        help = "Dataset to read"
    )]
    pub dataset: ActiveDataset,
}

impl Args {
    /// Log level implied by the verbosity flags, if any were given
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }

    /// Input arguments of the selected subcommand
    pub fn input(&self) -> Option<&InputArgs> {
        self.command.as_ref().map(|command| match command {
            Commands::Clean(args) => &args.input,
            Commands::Stats(args) => &args.input,
            Commands::AirQuality(args) => &args.input,
            Commands::Report(args) => &args.input,
            Commands::Series(args) => &args.input,
        })
    }

    /// Validate arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(base_altitude) = self.input().and_then(|input| input.base_altitude) {
            if !base_altitude.is_finite() {
                return Err(Error::configuration(format!(
                    "Base altitude must be a finite number, got {}",
                    base_altitude
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let args = parse(&["telemetry-processor"]);
        assert!(args.command.is_none());
        assert!(args.input().is_none());
    }

    #[test]
    fn test_clean_arguments() {
        let args = parse(&[
            "telemetry-processor",
            "clean",
            "flight.csv",
            "--base-altitude",
            "-12.5",
            "--export",
            "out.csv",
        ]);

        let Some(Commands::Clean(clean)) = &args.command else {
            panic!("expected clean command");
        };
        assert_eq!(clean.input.file, PathBuf::from("flight.csv"));
        assert_eq!(clean.input.base_altitude, Some(-12.5));
        assert_eq!(clean.export, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_air_quality_interval_parsing() {
        let args = parse(&["telemetry-processor", "air-quality", "f.csv", "--interval", "50"]);
        let Some(Commands::AirQuality(aq)) = &args.command else {
            panic!("expected air-quality command");
        };
        assert_eq!(aq.interval, Some(IntervalSpec::Width(50.0)));
        assert_eq!(aq.dataset, ActiveDataset::Cleaned);

        let args = parse(&["telemetry-processor", "air-quality", "f.csv", "-i", "all"]);
        let Some(Commands::AirQuality(aq)) = &args.command else {
            panic!("expected air-quality command");
        };
        assert_eq!(aq.interval, Some(IntervalSpec::All));

        let zero_width =
            Args::try_parse_from(["telemetry-processor", "air-quality", "f.csv", "-i", "0"]);
        assert!(zero_width.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&[
            "telemetry-processor",
            "stats",
            "f.csv",
            "--dataset",
            "cleaned",
            "--output-format",
            "json",
            "-vv",
        ]);

        assert_eq!(args.output_format, Some(OutputFormat::Json));
        assert_eq!(args.get_log_level(), Some("debug"));
        let Some(Commands::Stats(stats)) = &args.command else {
            panic!("expected stats command");
        };
        assert_eq!(stats.dataset, ActiveDataset::Cleaned);
    }

    #[test]
    fn test_series_arguments() {
        let args = parse(&[
            "telemetry-processor",
            "series",
            "f.csv",
            "--x",
            "Tiempo_ms",
            "--y",
            "Altitud_m",
            "--chart",
            "scatter",
        ]);
        let Some(Commands::Series(series)) = &args.command else {
            panic!("expected series command");
        };
        assert_eq!(series.x_column, "Tiempo_ms");
        assert_eq!(series.y_column, "Altitud_m");
        assert_eq!(series.chart, ChartType::Scatter);
    }

    #[test]
    fn test_log_level() {
        let mut args = parse(&["telemetry-processor"]);
        assert_eq!(args.get_log_level(), None);

        args.verbose = 1;
        assert_eq!(args.get_log_level(), Some("info"));

        args.verbose = 3;
        assert_eq!(args.get_log_level(), Some("trace"));

        args.quiet = true;
        assert_eq!(args.get_log_level(), Some("error"));
    }

    #[test]
    fn test_validate_rejects_missing_config_file() {
        let args = parse(&[
            "telemetry-processor",
            "-c",
            "/nonexistent/config.toml",
            "stats",
            "f.csv",
        ]);
        assert!(matches!(args.validate(), Err(Error::Configuration { .. })));

        let args = parse(&["telemetry-processor", "stats", "f.csv"]);
        assert!(args.validate().is_ok());
    }
}
