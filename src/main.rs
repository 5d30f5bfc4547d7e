//! Debt Planner CLI
//!
//! Loads a debt snapshot, runs a payoff plan and prints the schedule

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use debt_planner::{
    debt::{load_debts, Strategy},
    plan::{write_schedule_csv, PaymentPlanner, PlanConfig, DEFAULT_MAX_MONTHS},
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "debt_planner", version, about = "Plan debt payoff with snowball or avalanche")]
struct Cli {
    /// Debt snapshot (.csv or .json)
    #[arg(short = 'd', long = "debts")]
    debts: PathBuf,

    /// Payoff strategy
    #[arg(short = 's', long = "strategy", default_value = "snowball", value_parser = parse_strategy)]
    strategy: Strategy,

    /// Extra amount paid each month on top of all minimums
    #[arg(short = 'e', long = "extra", default_value_t = 0.0)]
    extra: f64,

    /// Stop simulating after this many months
    #[arg(long = "max-months", default_value_t = DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Schedule output file (default stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Schedule output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "table")]
    format: OutputFormat,
}

fn parse_strategy(s: &str) -> std::result::Result<Strategy, String> {
    s.parse().map_err(|e: debt_planner::PlanError| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let debts = load_debts(&cli.debts)
        .with_context(|| format!("failed to load debts from {}", cli.debts.display()))?;

    let config = PlanConfig {
        strategy: cli.strategy,
        extra_payment: cli.extra,
        max_months: cli.max_months,
        ..Default::default()
    };
    let planner = PaymentPlanner::new(config);
    let result = planner.try_plan(&debts)?;
    let summary = result.summary_with_tolerance(planner.config().payoff_tolerance);

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match cli.format {
        OutputFormat::Csv => write_schedule_csv(&result, &mut writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &result)?;
            writeln!(writer)?;
        }
        OutputFormat::Table => {
            writeln!(
                writer,
                "{:>5} {:>12} {:>12} {:>12} {:>14}",
                "Month", "Paid", "Interest", "Principal", "Remaining"
            )?;
            writeln!(writer, "{}", "-".repeat(59))?;
            for entry in &result.monthly_plan {
                writeln!(
                    writer,
                    "{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                    entry.month,
                    entry.total_paid,
                    entry.interest_paid,
                    entry.principal_paid,
                    entry.remaining_balance
                )?;
            }
        }
    }
    writer.flush()?;

    // Summary goes to stderr
    eprintln!("\nSummary ({} strategy, extra ${:.2}/month):", cli.strategy, cli.extra);
    eprintln!("  Debts: {}", debts.len());
    eprintln!("  Total Paid: ${:.2}", summary.total_paid);
    eprintln!("  Total Interest: ${:.2}", summary.total_interest);
    match result.horizon() {
        Some(horizon) => eprintln!("  Debt free in: {}", horizon),
        None if summary.capped => eprintln!(
            "  Not paid off within {} months (remaining ${:.2})",
            cli.max_months, summary.final_balance
        ),
        None => eprintln!("  Nothing to pay off"),
    }

    eprintln!("\nPayoff order:");
    for payoff in &summary.debts {
        match payoff.payoff_month {
            Some(month) => eprintln!(
                "  {:<24} month {:>3}  interest ${:.2}",
                payoff.debt_name, month, payoff.interest_paid
            ),
            None => eprintln!(
                "  {:<24} open       interest ${:.2}",
                payoff.debt_name, payoff.interest_paid
            ),
        }
    }

    Ok(())
}
