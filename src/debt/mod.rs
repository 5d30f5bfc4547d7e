//! Debt records and snapshot loading

mod data;
pub mod loader;

pub use data::{Debt, DebtId, Strategy};
pub use loader::{load_debts, load_debts_from_csv, load_debts_from_json, DebtFormat};
