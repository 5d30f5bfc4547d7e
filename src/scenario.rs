//! Scenario runner for comparing payoff plans
//!
//! Holds one debt snapshot and runs the planner for many configurations
//! (both strategies, a range of extra payments) in parallel.

use crate::debt::{Debt, Strategy};
use crate::error::Result;
use crate::plan::{PaymentPlanResult, PaymentPlanner, PlanConfig, PlanSummary};
use rayon::prelude::*;
use serde::Serialize;

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(load_debts("debts.csv")?);
///
/// for extra in [0.0, 100.0, 250.0] {
///     let result = runner.run(PlanConfig::new(Strategy::Avalanche, extra));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    debts: Vec<Debt>,
}

/// Snowball and avalanche outcomes for one extra-payment level
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub extra_payment: f64,
    pub snowball: PlanSummary,
    pub avalanche: PlanSummary,
}

impl StrategyComparison {
    /// Interest avalanche saves over snowball (negative if it costs more)
    pub fn interest_saved_by_avalanche(&self) -> f64 {
        self.snowball.total_interest - self.avalanche.total_interest
    }

    /// Strategy with the lower total interest; snowball wins ties.
    /// A plan that reaches the month cap always loses to one that pays off.
    pub fn cheaper(&self) -> Strategy {
        match (self.snowball.capped, self.avalanche.capped) {
            (true, false) => Strategy::Avalanche,
            (false, true) => Strategy::Snowball,
            _ if self.avalanche.total_interest < self.snowball.total_interest => {
                Strategy::Avalanche
            }
            _ => Strategy::Snowball,
        }
    }
}

impl ScenarioRunner {
    pub fn new(debts: Vec<Debt>) -> Self {
        Self { debts }
    }

    /// Create a runner after rejecting malformed debts
    pub fn validated(debts: Vec<Debt>) -> Result<Self> {
        for debt in &debts {
            debt.validate()?;
        }
        Ok(Self::new(debts))
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    /// Run a single plan with the given config
    pub fn run(&self, config: PlanConfig) -> PaymentPlanResult {
        PaymentPlanner::new(config).plan(&self.debts)
    }

    /// Run several configs in parallel; results keep the order of `configs`
    pub fn run_scenarios(&self, configs: &[PlanConfig]) -> Vec<PaymentPlanResult> {
        configs
            .par_iter()
            .map(|config| PaymentPlanner::new(config.clone()).plan(&self.debts))
            .collect()
    }

    /// Run one strategy across a range of extra payments
    pub fn sweep_extra_payments(
        &self,
        strategy: Strategy,
        extra_payments: &[f64],
    ) -> Vec<(f64, PaymentPlanResult)> {
        extra_payments
            .par_iter()
            .map(|&extra| (extra, self.run(PlanConfig::new(strategy, extra))))
            .collect()
    }

    /// Compare both strategies at each extra-payment level
    pub fn compare_strategies(&self, extra_payments: &[f64]) -> Vec<StrategyComparison> {
        extra_payments
            .par_iter()
            .map(|&extra| StrategyComparison {
                extra_payment: extra,
                snowball: self.run(PlanConfig::new(Strategy::Snowball, extra)).summary(),
                avalanche: self.run(PlanConfig::new(Strategy::Avalanche, extra)).summary(),
            })
            .collect()
    }
}
