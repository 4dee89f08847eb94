mod engine;
mod policy;
mod rules;

pub use engine::{EngineError, Rule, RuleEngine};
pub use policy::{standard_rule_engine, standard_rules};
pub use rules::{
    CreditScoreMustBeValidRule, LargeLoanValueRule, LoanAmountWithinGeneralLimitRule,
    SmallLoanCreditScoreForLtvRule, LARGE_LOAN_AMOUNT,
};
