use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::domain::{ApplicationId, LoanApplication, LoanRequest};
use super::repository::{ApplicationRecord, LoanRepository, RepositoryError};
use super::statistics::{summarize, LoanStatistics};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("loan-{id:06}"))
}

/// Decides incoming loan requests and records them in the store.
pub struct LendingService<R> {
    repository: Arc<R>,
}

impl<R> LendingService<R>
where
    R: LoanRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate, decide and record a loan request.
    pub fn submit(&self, request: LoanRequest) -> Result<ApplicationRecord, LendingServiceError> {
        validate(&request)?;

        let application = LoanApplication::from_request(&request);
        let record = ApplicationRecord {
            application_id: next_application_id(),
            recorded_at: Utc::now(),
            application,
        };

        let stored = self.repository.append(record).map_err(|err| {
            warn!(error = %err, "failed to record loan application");
            err
        })?;

        info!(
            application_id = %stored.application_id,
            approved = stored.application.approved(),
            decline_reasons = stored.application.decline_reasons().len(),
            "loan application decided"
        );

        Ok(stored)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<ApplicationRecord, LendingServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn applications(&self) -> Result<Vec<ApplicationRecord>, LendingServiceError> {
        Ok(self.repository.list_all()?)
    }

    /// Recomputes portfolio statistics from a fresh snapshot of the store.
    pub fn statistics(&self) -> Result<LoanStatistics, LendingServiceError> {
        let snapshot = self.repository.list_all()?;
        Ok(summarize(snapshot.iter().map(|record| &record.application)))
    }
}

fn validate(request: &LoanRequest) -> Result<(), InvalidRequest> {
    if request.loan_amount <= Decimal::ZERO {
        return Err(InvalidRequest::NonPositiveAmount {
            field: "loan_amount",
            value: request.loan_amount,
        });
    }
    if request.secured_asset_value <= Decimal::ZERO {
        return Err(InvalidRequest::NonPositiveAmount {
            field: "secured_asset_value",
            value: request.secured_asset_value,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveAmount { field: &'static str, value: Decimal },
}

#[derive(Debug, thiserror::Error)]
pub enum LendingServiceError {
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
