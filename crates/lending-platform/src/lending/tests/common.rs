use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::lending::domain::{ApplicationId, LoanApplication, LoanRequest};
use crate::lending::evaluation::Rule;
use crate::lending::repository::{
    ApplicationRecord, InMemoryLoanRepository, LoanRepository, RepositoryError,
};
use crate::lending::{lending_router, LendingService};

pub(super) fn decided(loan_amount: i64, asset_value: i64, credit_score: i32) -> LoanApplication {
    LoanApplication::new(
        Decimal::from(loan_amount),
        Decimal::from(asset_value),
        credit_score,
    )
}

pub(super) fn undecided(loan_amount: i64, asset_value: i64, credit_score: i32) -> LoanApplication {
    LoanApplication::undecided_for_tests(
        Decimal::from(loan_amount),
        Decimal::from(asset_value),
        credit_score,
    )
}

pub(super) fn request(loan_amount: i64, asset_value: i64, credit_score: i32) -> LoanRequest {
    LoanRequest {
        loan_amount: Decimal::from(loan_amount),
        secured_asset_value: Decimal::from(asset_value),
        credit_score,
    }
}

pub(super) fn build_service() -> (
    LendingService<InMemoryLoanRepository>,
    Arc<InMemoryLoanRepository>,
) {
    let repository = Arc::new(InMemoryLoanRepository::default());
    let service = LendingService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: LendingService<InMemoryLoanRepository>) -> axum::Router {
    lending_router(Arc::new(service))
}

/// Shared observation point for [`ProbeRule`].
#[derive(Default)]
pub(super) struct Probe {
    pub(super) evaluations: AtomicUsize,
    pub(super) succeeded: AtomicBool,
    pub(super) failed: AtomicBool,
}

/// Rule with a fixed outcome that records every callback it receives.
pub(super) struct ProbeRule {
    outcome: bool,
    reason: &'static str,
    probe: Arc<Probe>,
}

impl ProbeRule {
    pub(super) fn passing(probe: Arc<Probe>) -> Self {
        Self {
            outcome: true,
            reason: "probe passed",
            probe,
        }
    }

    pub(super) fn failing(reason: &'static str, probe: Arc<Probe>) -> Self {
        Self {
            outcome: false,
            reason,
            probe,
        }
    }
}

impl Rule<LoanApplication> for ProbeRule {
    fn is_satisfied(&self, _application: &LoanApplication) -> bool {
        self.probe.evaluations.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }

    fn on_success(&self, _application: &mut LoanApplication) {
        self.probe.succeeded.store(true, Ordering::SeqCst);
    }

    fn on_failure(&self, application: &mut LoanApplication) {
        self.probe.failed.store(true, Ordering::SeqCst);
        application.record_decline(self.reason);
    }

    fn name(&self) -> &'static str {
        "probe"
    }
}

pub(super) struct ConflictRepository;

impl LoanRepository for ConflictRepository {
    fn append(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl LoanRepository for UnavailableRepository {
    fn append(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
