use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::domain::LoanRequest;

#[derive(Debug)]
pub enum LoanImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for LoanImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanImportError::Io(err) => write!(f, "failed to read loan batch: {}", err),
            LoanImportError::Csv(err) => write!(f, "invalid loan batch CSV: {}", err),
        }
    }
}

impl std::error::Error for LoanImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoanImportError::Io(err) => Some(err),
            LoanImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LoanImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LoanImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct LoanRow {
    #[serde(rename = "Loan Amount", deserialize_with = "exact_decimal")]
    loan_amount: Decimal,
    #[serde(rename = "Secured Asset Value", deserialize_with = "exact_decimal")]
    secured_asset_value: Decimal,
    #[serde(rename = "Credit Score")]
    credit_score: i32,
}

/// Parses the cell text directly so amounts never pass through `f64`.
fn exact_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)
}

/// Reads loan requests from a CSV export with `Loan Amount`,
/// `Secured Asset Value` and `Credit Score` columns.
pub struct LoanBatchImporter;

impl LoanBatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRequest>, LoanImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LoanRequest>, LoanImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut requests = Vec::new();
        for row in csv_reader.deserialize::<LoanRow>() {
            let row = row?;
            requests.push(LoanRequest {
                loan_amount: row.loan_amount,
                secured_asset_value: row.secured_asset_value,
                credit_score: row.credit_score,
            });
        }

        Ok(requests)
    }
}
