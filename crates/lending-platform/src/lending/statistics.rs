use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::fixed_places;
use super::domain::LoanApplication;

const EMPTY_MEAN: &str = "0.00";

/// Portfolio snapshot over every decided application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatistics {
    pub number_of_approved_loans: usize,
    pub number_of_declined_loans: usize,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_value_of_loans_written: Decimal,
    pub mean_average_loan_to_value_ratio: String,
}

impl Default for LoanStatistics {
    fn default() -> Self {
        Self {
            number_of_approved_loans: 0,
            number_of_declined_loans: 0,
            total_value_of_loans_written: Decimal::ZERO,
            mean_average_loan_to_value_ratio: EMPTY_MEAN.to_string(),
        }
    }
}

/// Aggregates the applications from scratch. Only approved loans count
/// towards the written total, while the mean LTV covers every application.
pub fn summarize<'a, I>(applications: I) -> LoanStatistics
where
    I: IntoIterator<Item = &'a LoanApplication>,
{
    let mut approved = 0usize;
    let mut declined = 0usize;
    let mut total_written = Decimal::ZERO;
    let mut ltv_sum = Decimal::ZERO;

    for application in applications {
        if application.approved() {
            approved += 1;
            total_written = total_written.saturating_add(application.loan_amount());
        } else {
            declined += 1;
        }
        ltv_sum = ltv_sum.saturating_add(application.loan_to_value_percent());
    }

    let count = approved + declined;
    if count == 0 {
        return LoanStatistics::default();
    }

    let mean = ltv_sum / Decimal::from(count);

    LoanStatistics {
        number_of_approved_loans: approved,
        number_of_declined_loans: declined,
        total_value_of_loans_written: total_written,
        mean_average_loan_to_value_ratio: fixed_places(mean, 2),
    }
}
