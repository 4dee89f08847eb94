use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::evaluation::{standard_rule_engine, RuleEngine};

const PERCENT: Decimal = dec!(100);

/// Identifier assigned to an application when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw applicant input collected at the intake boundary. Amounts keep every
/// digit of the JSON number or string they were sent as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub loan_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub secured_asset_value: Decimal,
    pub credit_score: i32,
}

/// A loan application together with its decision.
///
/// The business inputs never change after construction, and the decision is
/// produced once by the rule engine inside the constructor. `approved` is
/// always equal to `decline_reasons().is_empty()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanApplication {
    loan_amount: Decimal,
    secured_asset_value: Decimal,
    applicants_credit_score: i32,
    approved: bool,
    decline_reasons: Vec<String>,
}

impl LoanApplication {
    /// Evaluates the application against the standard lending policy.
    pub fn new(loan_amount: Decimal, secured_asset_value: Decimal, credit_score: i32) -> Self {
        Self::evaluate_with(
            &standard_rule_engine(),
            loan_amount,
            secured_asset_value,
            credit_score,
        )
    }

    /// Evaluates the application against a caller supplied engine.
    pub fn evaluate_with(
        engine: &RuleEngine<LoanApplication>,
        loan_amount: Decimal,
        secured_asset_value: Decimal,
        credit_score: i32,
    ) -> Self {
        let mut application = Self::undecided(loan_amount, secured_asset_value, credit_score);
        engine.execute(&mut application);
        application.approved = application.decline_reasons.is_empty();
        application
    }

    pub fn from_request(request: &LoanRequest) -> Self {
        Self::new(
            request.loan_amount,
            request.secured_asset_value,
            request.credit_score,
        )
    }

    fn undecided(loan_amount: Decimal, secured_asset_value: Decimal, credit_score: i32) -> Self {
        Self {
            loan_amount,
            secured_asset_value,
            applicants_credit_score: credit_score,
            approved: false,
            decline_reasons: Vec::new(),
        }
    }

    pub fn loan_amount(&self) -> Decimal {
        self.loan_amount
    }

    pub fn secured_asset_value(&self) -> Decimal {
        self.secured_asset_value
    }

    pub fn applicants_credit_score(&self) -> i32 {
        self.applicants_credit_score
    }

    /// Loan amount as a percentage of the secured asset value, `0` when the
    /// asset value is zero. Saturates at `Decimal::MAX` on overflow.
    pub fn loan_to_value_percent(&self) -> Decimal {
        if self.secured_asset_value.is_zero() {
            return Decimal::ZERO;
        }

        self.loan_amount
            .checked_div(self.secured_asset_value)
            .and_then(|ratio| ratio.checked_mul(PERCENT))
            .unwrap_or(Decimal::MAX)
    }

    pub fn approved(&self) -> bool {
        self.approved
    }

    pub fn decline_reasons(&self) -> &[String] {
        &self.decline_reasons
    }

    pub fn summary(&self) -> String {
        if self.approved {
            "loan approved".to_string()
        } else {
            format!("loan declined: {}", self.decline_reasons.join(" "))
        }
    }

    pub(crate) fn record_decline(&mut self, reason: impl Into<String>) {
        self.decline_reasons.push(reason.into());
    }

    /// Application with inputs set but no rule run yet, so individual rules
    /// can be exercised in isolation.
    #[cfg(test)]
    pub(crate) fn undecided_for_tests(
        loan_amount: Decimal,
        secured_asset_value: Decimal,
        credit_score: i32,
    ) -> Self {
        Self::undecided(loan_amount, secured_asset_value, credit_score)
    }
}
