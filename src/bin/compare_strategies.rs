//! Compare snowball and avalanche across a range of extra payments
//!
//! Usage: cargo run --bin compare_strategies -- debts.csv [max_extra] [step]

use anyhow::{bail, Context, Result};
use debt_planner::{debt::load_debts, ScenarioRunner};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        bail!("usage: compare_strategies <debts.csv|debts.json> [max_extra] [step]");
    };
    let max_extra: f64 = match args.get(2) {
        Some(v) => v.parse().context("max_extra must be a number")?,
        None => 1000.0,
    };
    let step: f64 = match args.get(3) {
        Some(v) => v.parse().context("step must be a number")?,
        None => 50.0,
    };
    if !step.is_finite() || step <= 0.0 || !max_extra.is_finite() || max_extra < 0.0 {
        bail!("step must be positive and max_extra non-negative");
    }

    let start = Instant::now();
    let debts = load_debts(path).with_context(|| format!("failed to load debts from {}", path))?;
    println!("Loaded {} debts in {:?}", debts.len(), start.elapsed());

    let extras: Vec<f64> = (0..)
        .map(|i| i as f64 * step)
        .take_while(|&e| e <= max_extra + 1e-9)
        .collect();

    let runner = ScenarioRunner::new(debts);
    let comparisons = runner.compare_strategies(&extras);

    let output_path = "strategy_comparison.csv";
    let mut file = File::create(output_path).context("failed to create output file")?;

    writeln!(
        file,
        "Extra,SnowballMonths,SnowballInterest,AvalancheMonths,AvalancheInterest,InterestSaved,Cheaper"
    )?;
    for c in &comparisons {
        writeln!(
            file,
            "{:.2},{},{:.2},{},{:.2},{:.2},{}",
            c.extra_payment,
            c.snowball.months_until_debt_free,
            c.snowball.total_interest,
            c.avalanche.months_until_debt_free,
            c.avalanche.total_interest,
            c.interest_saved_by_avalanche(),
            c.cheaper(),
        )?;
    }

    println!("Output written to {}", output_path);

    println!("\n{:>10} {:>10} {:>12} {:>10} {:>12}", "Extra", "Snow mo", "Snow int", "Aval mo", "Aval int");
    for c in comparisons.iter().step_by((comparisons.len() / 10).max(1)) {
        println!(
            "{:>10.2} {:>10} {:>12.2} {:>10} {:>12.2}",
            c.extra_payment,
            c.snowball.months_until_debt_free,
            c.snowball.total_interest,
            c.avalanche.months_until_debt_free,
            c.avalanche.total_interest,
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
