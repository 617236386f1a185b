mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::annuity::{RdArgs, SipArgs};
use commands::currency::ConvertArgs;
use commands::deposits::{FdArgs, PpfArgs};
use commands::loan::{CompareLoansArgs, EmiArgs};
use commands::tax::GstArgs;

/// Personal-finance calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Indian personal-finance calculations with decimal precision",
    long_about = "A CLI for everyday Indian personal-finance calculations with decimal \
                  precision. Supports loan EMIs, loan comparison, fixed deposits, PPF, \
                  SIP and RD projections, GST splits, and currency conversion."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the equated monthly instalment for a loan
    Emi(EmiArgs),
    /// Compare two loan offers by total cost
    CompareLoans(CompareLoansArgs),
    /// Fixed deposit maturity and effective yield
    Fd(FdArgs),
    /// Public Provident Fund projection
    Ppf(PpfArgs),
    /// Systematic investment plan future value
    Sip(SipArgs),
    /// Recurring deposit maturity value
    Rd(RdArgs),
    /// Split an amount into base and GST components
    Gst(GstArgs),
    /// Convert between currencies
    Convert(ConvertArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::CompareLoans(args) => commands::loan::run_compare_loans(args),
        Commands::Fd(args) => commands::deposits::run_fd(args),
        Commands::Ppf(args) => commands::deposits::run_ppf(args),
        Commands::Sip(args) => commands::annuity::run_sip(args),
        Commands::Rd(args) => commands::annuity::run_rd(args),
        Commands::Gst(args) => commands::tax::run_gst(args),
        Commands::Convert(args) => commands::currency::run_convert(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
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
