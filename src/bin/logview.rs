//! Formatted viewer for the gateway's request trace log.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use llm_gateway::logview::group::{group_transactions, Transaction};
use llm_gateway::logview::parse::parse_line;
use llm_gateway::logview::render::render_transaction;

/// View and analyze API request logs.
#[derive(Parser)]
#[command(name = "logview")]
#[command(about = "View and analyze API request logs")]
struct Cli {
    /// Log file to analyze
    #[arg(short, long, default_value = "api_requests.log")]
    file: PathBuf,

    /// Show verbose output including headers
    #[arg(short, long)]
    verbose: bool,

    /// Number of most recent requests to show
    #[arg(short, long)]
    num: Option<usize>,

    /// Show only requests with errors
    #[arg(short, long)]
    errors: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.file.exists() {
        eprintln!(
            "{}",
            style(format!("Error: Log file '{}' not found.", cli.file.display())).red()
        );
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", style(format!("Error: {err:#}")).red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let raw = fs::read_to_string(&cli.file)
        .with_context(|| format!("reading log file '{}'", cli.file.display()))?;

    let transactions = select(
        group_transactions(raw.lines().filter_map(parse_line)),
        cli.errors,
        cli.num,
    );

    if transactions.is_empty() {
        println!(
            "{}",
            style("No matching requests found in the log file.").yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        style(format!("Found {} requests in log file", transactions.len())).bold()
    );
    for transaction in &transactions {
        print!("{}", render_transaction(transaction, cli.verbose));
    }
    Ok(())
}

/// Apply the error filter, then keep only the most recent `num`.
fn select(
    mut transactions: Vec<Transaction>,
    errors_only: bool,
    num: Option<usize>,
) -> Vec<Transaction> {
    if errors_only {
        transactions.retain(Transaction::has_error);
    }
    if let Some(num) = num {
        if num > 0 && transactions.len() > num {
            transactions = transactions.split_off(transactions.len() - num);
        }
    }
    transactions
}
