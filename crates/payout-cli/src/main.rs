mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::catalog::{CurrenciesArgs, TiersArgs};
use commands::rates::ShowRatesArgs;

/// Compare cross-border payouts under processor and pass-through fee models
#[derive(Parser)]
#[command(
    name = "payout",
    version,
    about = "Compare cross-border payouts under processor and pass-through fee models",
    long_about = "Prices a payment received in a foreign currency the way the processor \
                  settles it (tiered percentage + fixed fee, marked-up conversion) and the \
                  way a pass-through provider settles it (flat fee + tax at spot rate), \
                  with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a payment under both payout models
    Calculate(CalculateArgs),
    /// List supported currencies and their fixed fees
    Currencies(CurrenciesArgs),
    /// List the fee tiers of one currency
    Tiers(TiersArgs),
    /// Show the assembled exchange rate table
    Rates(ShowRatesArgs),
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
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Currencies(args) => commands::catalog::run_currencies(args),
        Commands::Tiers(args) => commands::catalog::run_tiers(args),
        Commands::Rates(args) => commands::rates::run_rates(args),
        Commands::Version => {
            println!("payout {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
