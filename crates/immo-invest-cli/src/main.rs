mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::process;
use tracing_subscriber::EnvFilter;

use commands::financing::{InvestmentArgs, LoanArgs};
use commands::projection::CashflowArgs;
use commands::property::PropertyMetricsArgs;
use commands::tax::AfterTaxArgs;

/// Real-estate investment projections
#[derive(Parser)]
#[command(
    name = "immo",
    version,
    about = "Real-estate investment projections",
    long_about = "A CLI for the property investment calculators with decimal precision. \
                  Supports listing key metrics, annuity loans, monthly cashflow and \
                  break-even, multi-year cashflow projections and after-tax projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price per m², gross rental yield and commission of a listing
    PropertyMetrics(PropertyMetricsArgs),
    /// Annuity loan: monthly payment, total interest, total repayment
    Loan(LoanArgs),
    /// Investment calculator: loan, monthly cashflow, equity yield, break-even
    Investment(InvestmentArgs),
    /// Year-by-year rent, cost, cashflow and value projection
    Cashflow(CashflowArgs),
    /// Projection of rental income after simplified income tax
    AfterTax(AfterTaxArgs),
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

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::PropertyMetrics(args) => commands::property::run_property_metrics(args),
        Commands::Loan(args) => commands::financing::run_loan(args),
        Commands::Investment(args) => commands::financing::run_investment(args),
        Commands::Cashflow(args) => commands::projection::run_cashflow(args),
        Commands::AfterTax(args) => commands::tax::run_after_tax(args),
        Commands::Version => {
            println!("immo {}", env!("CARGO_PKG_VERSION"));
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
            output::print_error(e.as_ref());
            process::exit(1);
        }
    }
}
