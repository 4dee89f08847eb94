use super::super::domain::LoanApplication;
use super::engine::{Rule, RuleEngine};
use super::rules::{
    CreditScoreMustBeValidRule, LargeLoanValueRule, LoanAmountWithinGeneralLimitRule,
    SmallLoanCreditScoreForLtvRule,
};

/// The lending policy in evaluation order.
pub fn standard_rules() -> Vec<Box<dyn Rule<LoanApplication>>> {
    vec![
        Box::new(CreditScoreMustBeValidRule),
        Box::new(LoanAmountWithinGeneralLimitRule),
        Box::new(LargeLoanValueRule),
        Box::new(SmallLoanCreditScoreForLtvRule),
    ]
}

pub fn standard_rule_engine() -> RuleEngine<LoanApplication> {
    RuleEngine::new(standard_rules())
}
