//! Load debt snapshots from CSV or JSON

use super::{Debt, DebtId};
use crate::error::{PlanError, Result};
use chrono::NaiveDate;
use csv::Reader;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row. Optional columns may be empty or absent.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "name")]
    name: String,
    #[serde(rename = "balance")]
    balance: f64,
    #[serde(rename = "interestRate")]
    interest_rate: f64,
    #[serde(rename = "minimumPayment")]
    minimum_payment: f64,
    #[serde(rename = "category", default)]
    category: Option<String>,
    #[serde(rename = "lender", default)]
    lender: Option<String>,
    #[serde(rename = "notes", default)]
    notes: Option<String>,
    #[serde(rename = "dueDate", default)]
    due_date: Option<String>,
}

impl CsvRow {
    fn to_debt(self) -> Result<Debt> {
        let id = match self.id.trim().parse::<i64>() {
            Ok(n) => DebtId::Number(n),
            Err(_) => DebtId::Text(self.id.trim().to_string()),
        };

        let due_date = match non_empty(self.due_date) {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                PlanError::InvalidDebt {
                    id: id.to_string(),
                    reason: format!("bad due date {:?}: {}", raw, e),
                }
            })?),
            None => None,
        };

        Ok(Debt {
            id,
            name: self.name,
            balance: self.balance,
            interest_rate: self.interest_rate,
            minimum_payment: self.minimum_payment,
            category: non_empty(self.category),
            lender: non_empty(self.lender),
            notes: non_empty(self.notes),
            due_date,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Supported debt file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtFormat {
    Csv,
    Json,
}

impl DebtFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(DebtFormat::Csv),
            "json" => Ok(DebtFormat::Json),
            _ => Err(PlanError::UnknownFormat(path.display().to_string())),
        }
    }
}

/// Load debts from CSV rows in any reader
pub fn load_debts_from_csv<R: Read>(reader: R) -> Result<Vec<Debt>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut debts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let debt = row.to_debt()?;
        debt.validate()?;
        debts.push(debt);
    }

    Ok(debts)
}

/// Load debts from a JSON array in any reader
pub fn load_debts_from_json<R: Read>(reader: R) -> Result<Vec<Debt>> {
    let debts: Vec<Debt> = serde_json::from_reader(reader)?;
    for debt in &debts {
        debt.validate()?;
    }
    Ok(debts)
}

/// Load debts from a file, picking the format from its extension
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>> {
    let path = path.as_ref();
    let format = DebtFormat::from_path(path)?;
    let file = File::open(path)?;

    let debts = match format {
        DebtFormat::Csv => load_debts_from_csv(file)?,
        DebtFormat::Json => load_debts_from_json(file)?,
    };
    debug!("loaded {} debts from {}", debts.len(), path.display());

    Ok(debts)
}
