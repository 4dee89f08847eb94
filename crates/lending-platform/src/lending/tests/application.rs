use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::common::*;
use crate::lending::domain::LoanApplication;

fn assert_declined_with(application: &LoanApplication, fragment: &str) {
    assert!(!application.approved());
    assert!(
        application
            .decline_reasons()
            .iter()
            .any(|reason| reason.contains(fragment)),
        "expected a reason containing {fragment:?}, got {:?}",
        application.decline_reasons()
    );
}

#[test]
fn minimum_amount_with_good_credit_is_approved() {
    let application = decided(100000, 200000, 800);

    assert!(application.approved());
    assert!(application.decline_reasons().is_empty());
}

#[test]
fn valid_applications_are_approved() {
    for (amount, asset, score) in [
        (1500000, 3000000, 950),
        (500000, 1000000, 750),
        (1000000, 2000000, 950),
        (1500000, 2500000, 999),
        (500000, 700000, 800),
        (500000, 600000, 900),
    ] {
        let application = decided(amount, asset, score);
        assert!(
            application.approved(),
            "{amount}/{asset}/{score} declined: {:?}",
            application.decline_reasons()
        );
    }
}

#[test]
fn large_loan_at_sixty_percent_ltv_is_approved() {
    let application = decided(1000000, 1666667, 999);

    assert!(application.loan_to_value_percent() <= dec!(60));
    assert!(application.approved());
}

#[test]
fn amounts_outside_general_limit_are_declined() {
    for amount in [99999, 1500001, 0] {
        let application = decided(amount, 3000000, 950);
        assert_declined_with(&application, "Loan amount must be between");
    }
}

#[test]
fn invalid_credit_scores_are_declined() {
    for score in [0, 1000, -1] {
        let application = decided(100000, 200000, score);
        assert_declined_with(&application, "credit score must be between");
    }
}

#[test]
fn large_loans_failing_policy_are_declined() {
    for (amount, asset, score) in [
        (1000000, 1500000, 949),
        (1000000, 1600000, 950),
        (1000000, 1500000, 950),
    ] {
        assert_declined_with(&decided(amount, asset, score), "Large loan value");
    }
}

#[test]
fn small_loans_failing_policy_are_declined() {
    for (amount, asset, score) in [
        (500000, 1000000, 749),
        (500000, 700000, 799),
        (500000, 600000, 899),
        (500000, 550000, 999),
    ] {
        assert_declined_with(&decided(amount, asset, score), "Small loan amount");
    }
}

#[test]
fn overlapping_failures_each_record_a_reason_in_rule_order() {
    let application = decided(50000, 50000, 0);

    assert_eq!(application.decline_reasons().len(), 3);
    assert!(application.decline_reasons()[0].contains("credit score"));
    assert!(application.decline_reasons()[1].contains("Loan amount"));
    assert!(application.decline_reasons()[2].contains("Small loan amount"));
}

#[test]
fn loan_to_value_is_derived_from_inputs() {
    for (amount, asset, expected) in [
        (500000, 1000000, dec!(50)),
        (400000, 600000, dec!(66.67)),
        (450000, 500000, dec!(90)),
    ] {
        let ltv = decided(amount, asset, 800).loan_to_value_percent();
        assert!(
            (ltv - expected).abs() <= dec!(0.01),
            "{amount}/{asset} gave {ltv}"
        );
    }
}

#[test]
fn zero_asset_value_yields_zero_ltv() {
    for amount in [100000, 0, 1500000] {
        let application = decided(amount, 0, 800);
        assert_eq!(application.loan_to_value_percent(), Decimal::ZERO);
    }
}

#[test]
fn ltv_saturates_instead_of_overflowing() {
    let application = LoanApplication::new(Decimal::MAX, dec!(0.0000000001), 800);

    assert_eq!(application.loan_to_value_percent(), Decimal::MAX);
    assert!(!application.approved());
}

#[test]
fn approval_always_mirrors_decline_reasons() {
    for amount in [0, 99999, 100000, 500000, 999999, 1000000, 1500000, 1500001] {
        for asset in [0, 500000, 1000000, 1666667, 3000000] {
            for score in [-1, 0, 1, 749, 750, 800, 900, 950, 999, 1000] {
                let application = decided(amount, asset, score);
                assert_eq!(
                    application.approved(),
                    application.decline_reasons().is_empty(),
                    "{amount}/{asset}/{score}"
                );
            }
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let first = decided(500000, 550000, 999);
    let second = decided(500000, 550000, 999);

    assert_eq!(first, second);
}

#[test]
fn summary_lists_decline_reasons() {
    assert_eq!(decided(500000, 1000000, 800).summary(), "loan approved");

    let summary = decided(500000, 550000, 999).summary();
    assert!(summary.starts_with("loan declined: "));
    assert!(summary.contains("Small loan amount"));
}
