//! Loan decisioning: the policy rule set, the rule engine that applies it,
//! the application store boundary and portfolio statistics.

pub mod currency;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use currency::format_currency;
pub use domain::{ApplicationId, LoanApplication, LoanRequest};
pub use evaluation::{
    standard_rule_engine, standard_rules, EngineError, Rule, RuleEngine, LARGE_LOAN_AMOUNT,
};
pub use import::{LoanBatchImporter, LoanImportError};
pub use repository::{
    ApplicationRecord, ApplicationView, InMemoryLoanRepository, LoanRepository, RepositoryError,
};
pub use router::lending_router;
pub use service::{InvalidRequest, LendingService, LendingServiceError};
pub use statistics::{summarize, LoanStatistics};
