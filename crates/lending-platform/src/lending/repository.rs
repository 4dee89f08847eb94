use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::fixed_places;
use super::domain::{ApplicationId, LoanApplication};

/// A decided application as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub recorded_at: DateTime<Utc>,
    pub application: LoanApplication,
}

impl ApplicationRecord {
    pub fn view(&self) -> ApplicationView {
        let application = &self.application;
        ApplicationView {
            application_id: self.application_id.clone(),
            recorded_at: self.recorded_at,
            loan_amount: application.loan_amount(),
            secured_asset_value: application.secured_asset_value(),
            credit_score: application.applicants_credit_score(),
            loan_to_value_percent: fixed_places(application.loan_to_value_percent(), 2),
            approved: application.approved(),
            decline_reasons: application.decline_reasons().to_vec(),
            decision_rationale: application.summary(),
        }
    }
}

/// Append-ordered storage for decided applications.
pub trait LoanRepository: Send + Sync {
    fn append(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    /// Snapshot of every record in insertion order.
    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct LoanLedger {
    records: Vec<ApplicationRecord>,
    positions: HashMap<ApplicationId, usize>,
}

/// Process-local store. Appends happen under a mutex and reads hand back a
/// cloned snapshot. Ids are indexed so duplicate checks and lookups do not
/// scan the ledger.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLoanRepository {
    ledger: Arc<Mutex<LoanLedger>>,
}

impl InMemoryLoanRepository {
    fn lock(&self) -> Result<MutexGuard<'_, LoanLedger>, RepositoryError> {
        self.ledger
            .lock()
            .map_err(|_| RepositoryError::Unavailable("loan store lock poisoned".to_string()))
    }
}

impl LoanRepository for InMemoryLoanRepository {
    fn append(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let ledger = &mut *guard;
        match ledger.positions.entry(record.application_id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(ledger.records.len());
                ledger.records.push(record.clone());
                Ok(record)
            }
        }
    }

    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.records.clone())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let ledger = self.lock()?;
        Ok(ledger
            .positions
            .get(id)
            .and_then(|position| ledger.records.get(*position))
            .cloned())
    }
}

/// Rendering-friendly projection of a record.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub application_id: ApplicationId,
    pub recorded_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub loan_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub secured_asset_value: Decimal,
    pub credit_score: i32,
    pub loan_to_value_percent: String,
    pub approved: bool,
    pub decline_reasons: Vec<String>,
    pub decision_rationale: String,
}
