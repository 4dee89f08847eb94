use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::super::currency::format_currency;
use super::super::domain::LoanApplication;
use super::engine::Rule;

/// Loans at or above this amount are "large"; below it they are "small".
/// Both size-dependent rules read this single constant.
pub const LARGE_LOAN_AMOUNT: Decimal = dec!(1000000);

pub(crate) const MINIMUM_CREDIT_SCORE: i32 = 1;
pub(crate) const MAXIMUM_CREDIT_SCORE: i32 = 999;

pub(crate) const MINIMUM_LOAN_AMOUNT: Decimal = dec!(100000);
pub(crate) const MAXIMUM_LOAN_AMOUNT: Decimal = dec!(1500000);

const LARGE_LOAN_MINIMUM_CREDIT_SCORE: i32 = 950;
const LARGE_LOAN_MAXIMUM_LTV_PERCENT: Decimal = dec!(60);

/// Exclusive LTV ceilings paired with the credit score each tier requires.
/// Anything at or above the last ceiling is declined outright.
const SMALL_LOAN_LTV_TIERS: [(Decimal, i32); 3] = [(dec!(60), 750), (dec!(80), 800), (dec!(90), 900)];

fn is_large_loan(application: &LoanApplication) -> bool {
    application.loan_amount() >= LARGE_LOAN_AMOUNT
}

pub struct CreditScoreMustBeValidRule;

impl Rule<LoanApplication> for CreditScoreMustBeValidRule {
    fn is_satisfied(&self, application: &LoanApplication) -> bool {
        (MINIMUM_CREDIT_SCORE..=MAXIMUM_CREDIT_SCORE)
            .contains(&application.applicants_credit_score())
    }

    fn on_failure(&self, application: &mut LoanApplication) {
        application.record_decline(format!(
            "Applicant's credit score must be between {MINIMUM_CREDIT_SCORE} and {MAXIMUM_CREDIT_SCORE}."
        ));
    }

    fn name(&self) -> &'static str {
        "credit_score_bounds"
    }
}

pub struct LoanAmountWithinGeneralLimitRule;

impl Rule<LoanApplication> for LoanAmountWithinGeneralLimitRule {
    fn is_satisfied(&self, application: &LoanApplication) -> bool {
        (MINIMUM_LOAN_AMOUNT..=MAXIMUM_LOAN_AMOUNT).contains(&application.loan_amount())
    }

    fn on_failure(&self, application: &mut LoanApplication) {
        application.record_decline(format!(
            "Loan amount must be between {} and {}.",
            format_currency(MINIMUM_LOAN_AMOUNT),
            format_currency(MAXIMUM_LOAN_AMOUNT)
        ));
    }

    fn name(&self) -> &'static str {
        "general_amount_limit"
    }
}

pub struct LargeLoanValueRule;

impl Rule<LoanApplication> for LargeLoanValueRule {
    fn is_satisfied(&self, application: &LoanApplication) -> bool {
        if !is_large_loan(application) {
            return true;
        }

        application.applicants_credit_score() >= LARGE_LOAN_MINIMUM_CREDIT_SCORE
            && application.loan_to_value_percent() <= LARGE_LOAN_MAXIMUM_LTV_PERCENT
    }

    fn on_failure(&self, application: &mut LoanApplication) {
        application.record_decline(format!(
            "Large loan value must have a credit score of at least {LARGE_LOAN_MINIMUM_CREDIT_SCORE} \
             and LTV percent of {LARGE_LOAN_MAXIMUM_LTV_PERCENT}% or less."
        ));
    }

    fn name(&self) -> &'static str {
        "large_loan_value"
    }
}

pub struct SmallLoanCreditScoreForLtvRule;

impl Rule<LoanApplication> for SmallLoanCreditScoreForLtvRule {
    fn is_satisfied(&self, application: &LoanApplication) -> bool {
        if is_large_loan(application) {
            return true;
        }

        let ltv = application.loan_to_value_percent();
        SMALL_LOAN_LTV_TIERS
            .iter()
            .find(|(ceiling, _)| ltv < *ceiling)
            .map(|(_, minimum_score)| application.applicants_credit_score() >= *minimum_score)
            .unwrap_or(false)
    }

    fn on_failure(&self, application: &mut LoanApplication) {
        application.record_decline("Small loan amount must have a valid credit score for the LTV ratio.");
    }

    fn name(&self) -> &'static str {
        "small_loan_credit_for_ltv"
    }
}
