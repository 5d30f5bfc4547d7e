//! Working state for one debt during a planning run

use crate::debt::{Debt, DebtId};
use super::schedule::DebtPayment;

/// Call-local copy of a debt that the simulation pays down.
/// The caller's `Debt` records are never touched.
#[derive(Debug, Clone)]
pub struct OpenDebt {
    pub id: DebtId,
    pub name: String,

    /// Balance carried over from the end of the previous month
    pub balance: f64,

    /// Annual rate in percent
    pub interest_rate: f64,

    pub minimum_payment: f64,
}

impl OpenDebt {
    pub fn from_debt(debt: &Debt) -> Self {
        Self {
            id: debt.id.clone(),
            name: debt.name.clone(),
            balance: debt.balance,
            interest_rate: debt.interest_rate,
            minimum_payment: debt.minimum_payment,
        }
    }

    /// Monthly rate as a decimal (12% APR -> 0.01)
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }

    /// Apply one month of interest and payments.
    ///
    /// `extra_budget` is the extra payment offered to this debt; only the
    /// current target is offered a non-zero amount. Interest accrues on the
    /// balance before any payment is applied.
    pub fn apply_month(&mut self, extra_budget: f64) -> DebtPayment {
        let interest = self.monthly_rate() * self.balance;

        // Never pay more as "minimum" than what is left to clear
        let minimum = self.minimum_payment.min(self.balance + interest);

        // Negative when the minimum does not cover interest
        let principal = minimum - interest;

        let extra = extra_budget.min(self.balance);

        self.balance = (self.balance - principal - extra).max(0.0);

        DebtPayment {
            debt_id: self.id.clone(),
            debt_name: self.name.clone(),
            minimum_payment: minimum,
            extra_payment: extra,
            interest_paid: interest,
            principal_paid: principal + extra,
            remaining_balance: self.balance,
        }
    }

    pub fn is_paid_off(&self, tolerance: f64) -> bool {
        self.balance <= tolerance
    }
}
