//! Debt records as supplied by the debt-tracking data source

use crate::error::{PlanError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier correlating schedule entries back to the source record.
/// The data source hands out either numeric or string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DebtId {
    Number(i64),
    Text(String),
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtId::Number(n) => write!(f, "{}", n),
            DebtId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for DebtId {
    fn from(id: i64) -> Self {
        DebtId::Number(id)
    }
}

impl From<i32> for DebtId {
    fn from(id: i32) -> Self {
        DebtId::Number(id.into())
    }
}

impl From<&str> for DebtId {
    fn from(id: &str) -> Self {
        DebtId::Text(id.to_string())
    }
}

impl From<String> for DebtId {
    fn from(id: String) -> Self {
        DebtId::Text(id)
    }
}

/// Payoff prioritization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Smallest balance first
    #[default]
    Snowball,
    /// Highest interest rate first
    Avalanche,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Snowball, Strategy::Avalanche];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            other => Err(PlanError::UnknownStrategy(other.to_string())),
        }
    }
}

/// A single tracked debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: DebtId,

    pub name: String,

    /// Outstanding principal
    pub balance: f64,

    /// Annual percentage rate, e.g. 19.99 for 19.99% APR
    pub interest_rate: f64,

    /// Contractual minimum monthly payment
    pub minimum_payment: f64,

    // Descriptive metadata, not used by the planner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Debt {
    /// Create a debt with no descriptive metadata
    pub fn new(
        id: impl Into<DebtId>,
        name: impl Into<String>,
        balance: f64,
        interest_rate: f64,
        minimum_payment: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment,
            category: None,
            lender: None,
            notes: None,
            due_date: None,
        }
    }

    /// Monthly interest accrued on the current balance
    pub fn monthly_interest(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0 * self.balance
    }

    /// Whether the minimum payment at least covers the first month's interest
    pub fn is_amortizing(&self) -> bool {
        self.balance <= 0.0 || self.minimum_payment >= self.monthly_interest()
    }

    /// Reject negative, non-finite or out-of-range figures
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("balance", self.balance),
            ("interest rate", self.interest_rate),
            ("minimum payment", self.minimum_payment),
        ];
        for (field, value) in checks {
            if !value.is_finite() {
                return Err(self.invalid(format!("{} is not a finite number", field)));
            }
            if value < 0.0 {
                return Err(self.invalid(format!("{} must not be negative ({})", field, value)));
            }
        }
        if self.interest_rate > 100.0 {
            return Err(self.invalid(format!(
                "interest rate must be at most 100 ({})",
                self.interest_rate
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> PlanError {
        PlanError::InvalidDebt {
            id: self.id.to_string(),
            reason,
        }
    }
}
