use clap::Parser;
use std::process;
use telemetry_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime; file ingestion is the only async stage
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Telemetry Processor - CSV flight telemetry cleaning and analysis");
    println!("=================================================================");
    println!();
    println!("Clean probe telemetry CSV files, compute per-column statistics and");
    println!("classify air quality from gas-sensor resistance.");
    println!();
    println!("USAGE:");
    println!("    telemetry-processor [OPTIONS] <COMMAND> <FILE>");
    println!();
    println!("COMMANDS:");
    println!("    clean        Remove duplicates and outliers, correct altitude");
    println!("    stats        Descriptive statistics per numeric column");
    println!("    air-quality  Air-quality tiers and altitude profile");
    println!("    report       Cleaning, statistics and air quality together");
    println!("    series       Numeric (x, y) pairs for a chart");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>             Configuration file (TOML)");
    println!("    -v, --verbose                   Increase logging verbosity");
    println!("    -q, --quiet                     Only log errors");
    println!("        --output-format <FORMAT>    human, json or csv");
    println!("    -h, --help                      Show help information");
    println!("    -V, --version                   Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Clean a flight log and save the result:");
    println!("    telemetry-processor clean flight.csv --export flight_clean.csv");
    println!();
    println!("    # Air quality in 50 m altitude bands, as JSON:");
    println!("    telemetry-processor --output-format json air-quality flight.csv --interval 50");
    println!();
    println!("    # Temperature against altitude for a scatter chart:");
    println!("    telemetry-processor series flight.csv --x Altitud_m --y Temperatura_C --chart scatter");
    println!();
    println!("For detailed help on any command, use:");
    println!("    telemetry-processor <COMMAND> --help");
}
