mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assess::AssessArgs;
use commands::concentration::ConcentrationArgs;
use commands::policy::PolicyArgs;
use commands::scoring::{CompositeArgs, RatingArgs};

/// Bankability scoring for bioenergy feedstock supply projects
#[derive(Parser)]
#[command(
    name = "abfi",
    version,
    about = "Bankability scoring for bioenergy feedstock supply projects",
    long_about = "Scores the bankability of a bioenergy project from its supply agreements, \
                  counterparties, supplier positions and operational readiness. Produces five \
                  category sub-scores, a weighted composite and a rating band."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter when RUST_LOG is unset (e.g. "info", "abfi=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full bankability assessment
    Assess(AssessArgs),
    /// Supplier shares and Herfindahl-Hirschman Index
    Concentration(ConcentrationArgs),
    /// Weighted composite from five category sub-scores
    Composite(CompositeArgs),
    /// Rating band for a composite score
    Rating(RatingArgs),
    /// List the rating ladder
    RatingBands,
    /// Print or check a scoring policy
    Policy(PolicyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args),
        Commands::Concentration(args) => commands::concentration::run_concentration(args),
        Commands::Composite(args) => commands::scoring::run_composite(args),
        Commands::Rating(args) => commands::scoring::run_rating(args),
        Commands::RatingBands => commands::scoring::run_rating_bands(),
        Commands::Policy(args) => commands::policy::run_policy(args),
        Commands::Version => {
            println!("abfi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
