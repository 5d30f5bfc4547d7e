//! Error type for loading debts and validating plan inputs
//!
//! The planner itself never fails; errors only come from the boundary
//! (reading debt files, rejecting malformed numbers, parsing CLI values).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid debt {id}: {reason}")]
    InvalidDebt { id: String, reason: String },

    #[error("Invalid plan configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown debt file format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
