//! Core amortization engine for month-by-month debt payoff plans

use crate::debt::{Debt, Strategy};
use crate::error::{PlanError, Result};
use super::schedule::{MonthlyPlanEntry, PaymentPlanResult};
use super::state::OpenDebt;
use log::{debug, trace, warn};
use std::cmp::Ordering;

/// Safety cap on simulated months (25 years)
pub const DEFAULT_MAX_MONTHS: u32 = 300;

/// Balances at or below this are treated as paid off
pub const PAYOFF_TOLERANCE: f64 = 0.01;

/// Configuration for a planning run
#[derive(Debug, Clone, PartialEq)]
pub struct PlanConfig {
    /// Which debt is targeted with the extra payment
    pub strategy: Strategy,

    /// Amount paid each month on top of all minimums
    pub extra_payment: f64,

    /// Stop after this many months even if debt remains
    pub max_months: u32,

    /// Balance below which a debt drops out of the plan
    pub payoff_tolerance: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Snowball,
            extra_payment: 0.0,
            max_months: DEFAULT_MAX_MONTHS,
            payoff_tolerance: PAYOFF_TOLERANCE,
        }
    }
}

impl PlanConfig {
    pub fn new(strategy: Strategy, extra_payment: f64) -> Self {
        Self {
            strategy,
            extra_payment,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.extra_payment.is_finite() || self.extra_payment < 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "extra payment must be a non-negative number ({})",
                self.extra_payment
            )));
        }
        if !self.payoff_tolerance.is_finite() || self.payoff_tolerance < 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "payoff tolerance must be a non-negative number ({})",
                self.payoff_tolerance
            )));
        }
        Ok(())
    }
}

/// Main planning engine
#[derive(Debug, Clone, Default)]
pub struct PaymentPlanner {
    config: PlanConfig,
}

impl PaymentPlanner {
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Working copies of the debts in the fixed target order.
    /// The sort is stable so ties keep their input order.
    pub fn order_debts(&self, debts: &[Debt]) -> Vec<OpenDebt> {
        let mut open: Vec<OpenDebt> = debts.iter().map(OpenDebt::from_debt).collect();

        match self.config.strategy {
            Strategy::Snowball => open.sort_by(|a, b| {
                a.balance.partial_cmp(&b.balance).unwrap_or(Ordering::Equal)
            }),
            Strategy::Avalanche => open.sort_by(|a, b| {
                b.interest_rate
                    .partial_cmp(&a.interest_rate)
                    .unwrap_or(Ordering::Equal)
            }),
        }

        open
    }

    /// Validate inputs, then plan
    pub fn try_plan(&self, debts: &[Debt]) -> Result<PaymentPlanResult> {
        self.config.validate()?;
        for debt in debts {
            debt.validate()?;
        }
        Ok(self.plan(debts))
    }

    /// Run the month-by-month simulation. Never fails; reaching the month cap
    /// leaves `months_until_debt_free` at 0.
    pub fn plan(&self, debts: &[Debt]) -> PaymentPlanResult {
        let mut result = PaymentPlanResult::new();
        let mut open = self.order_debts(debts);

        debug!(
            "planning {} debts with {} strategy, extra payment {:.2}",
            open.len(),
            self.config.strategy,
            self.config.extra_payment
        );

        for debt in debts.iter().filter(|d| !d.is_amortizing()) {
            warn!(
                "minimum payment for debt {} ({}) does not cover its interest",
                debt.id, debt.name
            );
        }

        let mut month = 0;
        while month < self.config.max_months && open.iter().any(|d| d.balance > 0.0) {
            month += 1;

            let entry = self.simulate_month(month, &mut open);
            trace!(
                "month {}: paid {:.2}, interest {:.2}, remaining {:.2}, open debts {}",
                month,
                entry.total_paid,
                entry.interest_paid,
                entry.remaining_balance,
                open.len()
            );
            result.add_month(entry);

            if open.is_empty() {
                result.months_until_debt_free = month;
                break;
            }
        }

        if result.is_debt_free() {
            debug!("debt free after {} months", result.months_until_debt_free);
        } else if !result.monthly_plan.is_empty() {
            warn!(
                "debts not paid off within {} months under {} strategy",
                self.config.max_months, self.config.strategy
            );
        }

        result
    }

    /// Apply one month of payments to every open debt, then drop the ones
    /// that are paid off.
    fn simulate_month(&self, month: u32, open: &mut Vec<OpenDebt>) -> MonthlyPlanEntry {
        let mut entry = MonthlyPlanEntry::new(month);

        // The whole extra budget goes to the first open debt; any part of it
        // beyond that debt's balance is not carried to the next one.
        for (position, debt) in open.iter_mut().enumerate() {
            let extra_budget = if position == 0 {
                self.config.extra_payment
            } else {
                0.0
            };
            entry.add_payment(debt.apply_month(extra_budget));
        }

        let tolerance = self.config.payoff_tolerance;
        open.retain(|d| !d.is_paid_off(tolerance));

        entry.remaining_balance = open.iter().map(|d| d.balance).sum();
        entry
    }
}

/// Plan payoff of `debts` with the default month cap and tolerance.
///
/// The caller's debts are read only. Inputs are not validated; use
/// [`PaymentPlanner::try_plan`] to reject negative or non-finite figures.
pub fn compute_payment_plan(
    debts: &[Debt],
    strategy: Strategy,
    extra_payment: f64,
) -> PaymentPlanResult {
    PaymentPlanner::new(PlanConfig::new(strategy, extra_payment)).plan(debts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::DebtId;
    use approx::assert_relative_eq;

    fn balances(open: &[OpenDebt]) -> Vec<f64> {
        open.iter().map(|d| d.balance).collect()
    }

    #[test]
    fn test_empty_input() {
        let result = compute_payment_plan(&[], Strategy::Snowball, 100.0);
        assert!(result.monthly_plan.is_empty());
        assert_eq!(result.months_until_debt_free, 0);
    }

    #[test]
    fn test_snowball_order() {
        let debts = vec![
            Debt::new(1, "Mid", 500.0, 10.0, 25.0),
            Debt::new(2, "Big", 1500.0, 5.0, 40.0),
            Debt::new(3, "Small", 300.0, 20.0, 15.0),
        ];
        let planner = PaymentPlanner::new(PlanConfig::new(Strategy::Snowball, 100.0));
        assert_eq!(balances(&planner.order_debts(&debts)), vec![300.0, 500.0, 1500.0]);

        let result = planner.plan(&debts);
        let month1 = &result.monthly_plan[0];
        assert_eq!(month1.payments[0].debt_id, DebtId::Number(3));
        assert_eq!(month1.payments[0].extra_payment, 100.0);
        assert_eq!(month1.payments[1].extra_payment, 0.0);
        assert_eq!(month1.payments[2].extra_payment, 0.0);
    }

    #[test]
    fn test_avalanche_order() {
        let debts = vec![
            Debt::new(1, "Low", 100.0, 5.0, 10.0),
            Debt::new(2, "High", 5000.0, 22.0, 150.0),
            Debt::new(3, "Mid", 50.0, 12.0, 10.0),
        ];
        let planner = PaymentPlanner::new(PlanConfig::new(Strategy::Avalanche, 0.0));
        let rates: Vec<f64> = planner
            .order_debts(&debts)
            .iter()
            .map(|d| d.interest_rate)
            .collect();
        assert_eq!(rates, vec![22.0, 12.0, 5.0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let debts = vec![
            Debt::new("a", "First", 400.0, 9.0, 20.0),
            Debt::new("b", "Second", 400.0, 9.0, 20.0),
            Debt::new("c", "Third", 100.0, 9.0, 20.0),
        ];
        for strategy in Strategy::ALL {
            let planner = PaymentPlanner::new(PlanConfig::new(strategy, 0.0));
            let ids: Vec<String> = planner
                .order_debts(&debts)
                .iter()
                .map(|d| d.id.to_string())
                .collect();
            match strategy {
                Strategy::Snowball => assert_eq!(ids, vec!["c", "a", "b"]),
                Strategy::Avalanche => assert_eq!(ids, vec!["a", "b", "c"]),
            }
        }
    }

    #[test]
    fn test_single_debt_first_month() {
        let debts = vec![Debt::new(1, "Loan", 1200.0, 12.0, 200.0)];
        let result = compute_payment_plan(&debts, Strategy::Snowball, 0.0);

        let first = &result.monthly_plan[0].payments[0];
        assert_relative_eq!(first.remaining_balance, 1012.0, epsilon = 1e-9);
        assert_relative_eq!(first.interest_paid, 12.0, epsilon = 1e-9);
        assert!(result.is_debt_free());
        assert_eq!(result.months_until_debt_free as usize, result.monthly_plan.len());
    }

    #[test]
    fn test_paid_off_debt_drops_out() {
        let debts = vec![
            Debt::new("A", "A", 100.0, 0.0, 50.0),
            Debt::new("B", "B", 1000.0, 10.0, 50.0),
        ];
        let result = compute_payment_plan(&debts, Strategy::Snowball, 50.0);

        let month1 = &result.monthly_plan[0];
        let a = month1.payment_for(&DebtId::from("A")).unwrap();
        assert_eq!(a.minimum_payment, 50.0);
        assert_eq!(a.extra_payment, 50.0);
        assert_eq!(a.remaining_balance, 0.0);

        for entry in &result.monthly_plan[1..] {
            assert!(entry.payment_for(&DebtId::from("A")).is_none());
            assert_eq!(entry.payments.len(), 1);
        }

        // B is the only debt from month 2 on and now gets the extra payment
        let month2 = &result.monthly_plan[1];
        assert_eq!(month2.payments[0].extra_payment, 50.0);

        assert!(result.is_debt_free());
        assert_eq!(result.months_until_debt_free as usize, result.monthly_plan.len());
        assert!(result.monthly_plan.last().unwrap().remaining_balance <= PAYOFF_TOLERANCE);
    }

    #[test]
    fn test_month_cap_reached() {
        let debts = vec![Debt::new(1, "Interest only", 10_000.0, 50.0, 0.0)];
        let result = compute_payment_plan(&debts, Strategy::Snowball, 0.0);

        assert_eq!(result.monthly_plan.len(), DEFAULT_MAX_MONTHS as usize);
        assert_eq!(result.months_until_debt_free, 0);
        assert!(result.summary().capped);
        assert!(result.horizon().is_none());
    }

    #[test]
    fn test_custom_month_cap() {
        let debts = vec![Debt::new(1, "Slow", 10_000.0, 5.0, 50.0)];
        let planner = PaymentPlanner::new(PlanConfig {
            max_months: 24,
            ..Default::default()
        });
        let result = planner.plan(&debts);
        assert_eq!(result.monthly_plan.len(), 24);
        assert_eq!(result.months_until_debt_free, 0);
    }

    #[test]
    fn test_terminates_when_minimums_cover_interest() {
        let debts = vec![
            Debt::new(1, "Card", 6000.0, 24.99, 180.0),
            Debt::new(2, "Car", 15_000.0, 7.5, 320.0),
            Debt::new(3, "Student", 22_000.0, 4.5, 230.0),
            Debt::new(4, "Store", 800.0, 29.9, 35.0),
        ];
        for strategy in Strategy::ALL {
            for extra in [0.0, 100.0, 500.0] {
                let result = compute_payment_plan(&debts, strategy, extra);
                assert!(result.months_until_debt_free > 0);
                assert!(result.months_until_debt_free <= DEFAULT_MAX_MONTHS);
            }
        }
    }

    #[test]
    fn test_balances_never_increase() {
        let debts = vec![
            Debt::new(1, "Card", 6000.0, 24.99, 180.0),
            Debt::new(2, "Car", 15_000.0, 7.5, 320.0),
            Debt::new(3, "Store", 800.0, 29.9, 35.0),
        ];
        let result = compute_payment_plan(&debts, Strategy::Avalanche, 250.0);

        for debt in &debts {
            let trajectory: Vec<f64> = result
                .monthly_plan
                .iter()
                .filter_map(|m| m.payment_for(&debt.id))
                .map(|p| p.remaining_balance)
                .collect();
            assert!(!trajectory.is_empty());
            assert!(trajectory.windows(2).all(|w| w[1] <= w[0]));
        }

        let totals: Vec<f64> = result.monthly_plan.iter().map(|m| m.remaining_balance).collect();
        assert!(totals.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_zero_extra_matches_minimum_only_amortization() {
        let card = Debt::new(1, "Card", 3000.0, 18.0, 90.0);
        let loan = Debt::new(2, "Loan", 5000.0, 6.0, 150.0);

        let together = compute_payment_plan(&[card.clone(), loan.clone()], Strategy::Snowball, 0.0);

        for debt in [&card, &loan] {
            let alone = compute_payment_plan(std::slice::from_ref(debt), Strategy::Snowball, 0.0);
            let joint: Vec<f64> = together
                .monthly_plan
                .iter()
                .filter_map(|m| m.payment_for(&debt.id))
                .map(|p| p.remaining_balance)
                .collect();
            let single: Vec<f64> = alone
                .monthly_plan
                .iter()
                .map(|m| m.payments[0].remaining_balance)
                .collect();
            assert_eq!(joint, single);
            assert!(joint.iter().all(|b| b.is_finite()));
        }
    }

    #[test]
    fn test_extra_not_rolled_over_within_month() {
        // Target balance is smaller than the extra budget; the leftover is not
        // applied to the second debt in the same month.
        let debts = vec![
            Debt::new(1, "Tiny", 30.0, 0.0, 10.0),
            Debt::new(2, "Large", 2000.0, 0.0, 100.0),
        ];
        let result = compute_payment_plan(&debts, Strategy::Snowball, 200.0);

        let month1 = &result.monthly_plan[0];
        assert_eq!(month1.payments[0].extra_payment, 30.0);
        assert_eq!(month1.payments[1].extra_payment, 0.0);
        assert_eq!(month1.payments[1].remaining_balance, 1900.0);
        assert_eq!(month1.total_paid, 10.0 + 30.0 + 100.0);
    }

    #[test]
    fn test_month_totals_sum_payments() {
        let debts = vec![
            Debt::new(1, "Card", 2500.0, 19.99, 75.0),
            Debt::new(2, "Loan", 8000.0, 6.5, 250.0),
        ];
        let result = compute_payment_plan(&debts, Strategy::Avalanche, 120.0);

        for entry in &result.monthly_plan {
            let paid: f64 = entry.payments.iter().map(|p| p.total_paid()).sum();
            let interest: f64 = entry.payments.iter().map(|p| p.interest_paid).sum();
            let principal: f64 = entry.payments.iter().map(|p| p.principal_paid).sum();
            assert_relative_eq!(entry.total_paid, paid, epsilon = 1e-6);
            assert_relative_eq!(entry.interest_paid, interest, epsilon = 1e-6);
            assert_relative_eq!(entry.principal_paid, principal, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let debts = vec![
            Debt::new(1, "Card", 2500.0, 19.99, 75.0),
            Debt::new(2, "Loan", 800.0, 6.5, 250.0),
        ];
        let before = debts.clone();
        let first = compute_payment_plan(&debts, Strategy::Snowball, 100.0);
        let second = compute_payment_plan(&debts, Strategy::Snowball, 100.0);
        assert_eq!(debts, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_marks_debt_cleared_at_cap() {
        let debts = vec![
            Debt::new("A", "A", 100.0, 0.0, 50.0),
            Debt::new("Stuck", "Stuck", 10_000.0, 50.0, 0.0),
        ];
        let planner = PaymentPlanner::new(PlanConfig {
            max_months: 2,
            ..Default::default()
        });
        let result = planner.plan(&debts);
        assert_eq!(result.monthly_plan.len(), 2);
        assert_eq!(result.months_until_debt_free, 0);

        let summary = result.summary_with_tolerance(planner.config().payoff_tolerance);
        assert!(summary.capped);
        assert_eq!(summary.debts[0].debt_id, DebtId::from("A"));
        assert_eq!(summary.debts[0].payoff_month, Some(2));
        assert_eq!(summary.debts[1].payoff_month, None);
    }

    #[test]
    fn test_all_zero_balances() {
        let debts = vec![Debt::new(1, "Done", 0.0, 10.0, 50.0)];
        let result = compute_payment_plan(&debts, Strategy::Snowball, 100.0);
        assert!(result.monthly_plan.is_empty());
        assert_eq!(result.months_until_debt_free, 0);
        assert!(!result.summary().capped);
    }

    #[test]
    fn test_try_plan_rejects_bad_input() {
        let debts = vec![Debt::new(1, "Bad", -10.0, 5.0, 10.0)];
        let planner = PaymentPlanner::default();
        assert!(matches!(planner.try_plan(&debts), Err(PlanError::InvalidDebt { .. })));

        let planner = PaymentPlanner::new(PlanConfig::new(Strategy::Snowball, -5.0));
        assert!(matches!(planner.try_plan(&[]), Err(PlanError::InvalidConfig(_))));

        let planner = PaymentPlanner::new(PlanConfig::new(Strategy::Snowball, 25.0));
        let ok = vec![Debt::new(1, "Good", 100.0, 5.0, 10.0)];
        assert!(planner.try_plan(&ok).unwrap().is_debt_free());
    }
}
