//! Debt payoff planning: ordering, monthly amortization and schedule output

mod state;
mod engine;
mod schedule;

pub use state::OpenDebt;
pub use engine::{
    compute_payment_plan, PaymentPlanner, PlanConfig, DEFAULT_MAX_MONTHS, PAYOFF_TOLERANCE,
};
pub use schedule::{
    write_schedule_csv, DebtPayment, DebtPayoff, MonthlyPlanEntry, PaymentPlanResult,
    PayoffHorizon, PlanSummary,
};
