//! Debt Planner - month-by-month debt payoff schedules
//!
//! This library provides:
//! - Debt records and CSV/JSON snapshot loading
//! - Snowball and avalanche payoff ordering
//! - Monthly amortization with a fixed extra-payment budget
//! - Plan summaries and payoff horizons
//! - Multi-scenario comparison across strategies and extra-payment levels

pub mod debt;
pub mod error;
pub mod plan;
pub mod scenario;

// Re-export commonly used types
pub use debt::{Debt, DebtId, Strategy};
pub use error::{PlanError, Result};
pub use plan::{compute_payment_plan, PaymentPlanResult, PaymentPlanner, PlanConfig};
pub use scenario::ScenarioRunner;
