//! Payment schedule output structures

use crate::debt::DebtId;
use crate::error::Result;
use super::engine::PAYOFF_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// What was paid against one debt in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayment {
    pub debt_id: DebtId,
    pub debt_name: String,

    /// Minimum actually applied, capped at balance + interest
    pub minimum_payment: f64,

    /// Share of the extra budget applied to this debt
    pub extra_payment: f64,

    pub interest_paid: f64,

    /// Principal portion of the minimum plus the extra payment
    pub principal_paid: f64,

    pub remaining_balance: f64,
}

impl DebtPayment {
    pub fn total_paid(&self) -> f64 {
        self.minimum_payment + self.extra_payment
    }
}

/// One simulated month across all open debts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlanEntry {
    /// 1-based month number
    pub month: u32,

    /// Payments in the fixed strategy order
    pub payments: Vec<DebtPayment>,

    pub total_paid: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,

    /// Sum of balances still open after this month
    pub remaining_balance: f64,
}

impl MonthlyPlanEntry {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            payments: Vec::new(),
            total_paid: 0.0,
            interest_paid: 0.0,
            principal_paid: 0.0,
            remaining_balance: 0.0,
        }
    }

    /// Record a payment and roll it into the month totals
    pub fn add_payment(&mut self, payment: DebtPayment) {
        self.total_paid += payment.total_paid();
        self.interest_paid += payment.interest_paid;
        self.principal_paid += payment.principal_paid;
        self.payments.push(payment);
    }

    pub fn payment_for(&self, debt_id: &DebtId) -> Option<&DebtPayment> {
        self.payments.iter().find(|p| &p.debt_id == debt_id)
    }
}

/// Complete payoff plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPlanResult {
    pub monthly_plan: Vec<MonthlyPlanEntry>,

    /// Month in which every debt is paid off, 0 if the month cap was reached
    pub months_until_debt_free: u32,
}

impl PaymentPlanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_month(&mut self, entry: MonthlyPlanEntry) {
        self.monthly_plan.push(entry);
    }

    pub fn is_debt_free(&self) -> bool {
        self.months_until_debt_free > 0
    }

    /// Payoff horizon, `None` when the plan never clears the debts
    pub fn horizon(&self) -> Option<PayoffHorizon> {
        if self.is_debt_free() {
            Some(PayoffHorizon::from_months(self.months_until_debt_free))
        } else {
            None
        }
    }

    /// Get summary statistics using the default payoff tolerance
    pub fn summary(&self) -> PlanSummary {
        self.summary_with_tolerance(PAYOFF_TOLERANCE)
    }

    /// Get summary statistics; `tolerance` should match the run's payoff tolerance
    pub fn summary_with_tolerance(&self, tolerance: f64) -> PlanSummary {
        let total_paid: f64 = self.monthly_plan.iter().map(|m| m.total_paid).sum();
        let total_interest: f64 = self.monthly_plan.iter().map(|m| m.interest_paid).sum();
        let total_principal: f64 = self.monthly_plan.iter().map(|m| m.principal_paid).sum();
        let final_balance = self
            .monthly_plan
            .last()
            .map(|m| m.remaining_balance)
            .unwrap_or(0.0);

        PlanSummary {
            total_months: self.monthly_plan.len() as u32,
            months_until_debt_free: self.months_until_debt_free,
            capped: !self.is_debt_free() && !self.monthly_plan.is_empty(),
            total_paid,
            total_interest,
            total_principal,
            final_balance,
            debts: self.debt_payoffs_with_tolerance(tolerance),
        }
    }

    /// Per-debt payoff month and interest, in order of first appearance
    pub fn debt_payoffs(&self) -> Vec<DebtPayoff> {
        self.debt_payoffs_with_tolerance(PAYOFF_TOLERANCE)
    }

    pub fn debt_payoffs_with_tolerance(&self, tolerance: f64) -> Vec<DebtPayoff> {
        let mut payoffs: Vec<DebtPayoff> = Vec::new();
        let mut index: HashMap<&DebtId, usize> = HashMap::new();
        // (month, remaining balance) of each debt's latest payment
        let mut last_seen: Vec<(u32, f64)> = Vec::new();

        for entry in &self.monthly_plan {
            for payment in &entry.payments {
                let i = *index.entry(&payment.debt_id).or_insert_with(|| {
                    payoffs.push(DebtPayoff {
                        debt_id: payment.debt_id.clone(),
                        debt_name: payment.debt_name.clone(),
                        payoff_month: None,
                        interest_paid: 0.0,
                        total_paid: 0.0,
                    });
                    last_seen.push((0, 0.0));
                    payoffs.len() - 1
                });
                payoffs[i].interest_paid += payment.interest_paid;
                payoffs[i].total_paid += payment.total_paid();
                last_seen[i] = (entry.month, payment.remaining_balance);
            }
        }

        // A debt is paid off in the last month it shows up. In the final month
        // of a capped schedule that only holds if its balance was cleared.
        let last_month = self.monthly_plan.last().map(|m| m.month).unwrap_or(0);
        for (payoff, (seen, balance)) in payoffs.iter_mut().zip(last_seen) {
            if seen < last_month || self.is_debt_free() || balance <= tolerance {
                payoff.payoff_month = Some(seen);
            }
        }

        payoffs
    }
}

/// Payoff month and cost for a single debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoff {
    pub debt_id: DebtId,
    pub debt_name: String,
    pub payoff_month: Option<u32>,
    pub interest_paid: f64,
    pub total_paid: f64,
}

/// Summary statistics for a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub total_months: u32,
    pub months_until_debt_free: u32,

    /// Month cap reached with debt still outstanding
    pub capped: bool,

    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: f64,
    pub debts: Vec<DebtPayoff>,
}

/// Months until debt free, split into years and months for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffHorizon {
    pub years: u32,
    pub months: u32,
}

impl PayoffHorizon {
    pub fn from_months(total: u32) -> Self {
        Self {
            years: total / 12,
            months: total % 12,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

impl fmt::Display for PayoffHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn plural(n: u32) -> &'static str {
            if n == 1 {
                ""
            } else {
                "s"
            }
        }
        match (self.years, self.months) {
            (0, m) => write!(f, "{} month{}", m, plural(m)),
            (y, 0) => write!(f, "{} year{}", y, plural(y)),
            (y, m) => write!(f, "{} year{}, {} month{}", y, plural(y), m, plural(m)),
        }
    }
}

/// Flat schedule row, one per debt per month
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScheduleRow<'a> {
    month: u32,
    debt_id: String,
    debt_name: &'a str,
    minimum_payment: f64,
    extra_payment: f64,
    interest_paid: f64,
    principal_paid: f64,
    remaining_balance: f64,
}

/// Write the schedule as CSV, one row per debt per month
pub fn write_schedule_csv<W: Write>(result: &PaymentPlanResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for entry in &result.monthly_plan {
        for payment in &entry.payments {
            csv_writer.serialize(ScheduleRow {
                month: entry.month,
                debt_id: payment.debt_id.to_string(),
                debt_name: &payment.debt_name,
                minimum_payment: payment.minimum_payment,
                extra_payment: payment.extra_payment,
                interest_paid: payment.interest_paid,
                principal_paid: payment.principal_paid,
                remaining_balance: payment.remaining_balance,
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
