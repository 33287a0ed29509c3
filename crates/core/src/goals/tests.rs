//! Tests for goal rules.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::GoalError;
use super::service::GoalService;

#[rstest]
#[case("Trip", dec!(1000), None, Ok(()))]
#[case("Trip", dec!(1000), Some(dec!(0)), Ok(()))]
#[case("   ", dec!(1000), None, Err(GoalError::EmptyTitle))]
#[case("Trip", dec!(0), None, Err(GoalError::NonPositiveTarget))]
#[case("Trip", dec!(10), Some(dec!(-1)), Err(GoalError::NegativeInitialAmount(dec!(-1))))]
fn test_validate(
    #[case] title: &str,
    #[case] target: Decimal,
    #[case] initial: Option<Decimal>,
    #[case] expected: Result<(), GoalError>,
) {
    assert_eq!(GoalService::validate(title, target, initial), expected);
}

#[test]
fn test_negative_contribution_is_rejected() {
    assert_eq!(
        GoalService::validate_contribution(dec!(-0.01)),
        Err(GoalError::NegativeContribution(dec!(-0.01)))
    );
    assert_eq!(GoalService::validate_contribution(Decimal::ZERO), Ok(Decimal::ZERO));
}

#[test]
fn test_status_of_overfunded_goal() {
    let status = GoalService::status(dec!(1200), dec!(1000));
    assert!(status.finished);
    assert_eq!(status.remaining_amount, Decimal::ZERO);
}

#[test]
fn test_status_of_open_goal() {
    let status = GoalService::status(dec!(250), dec!(1000));
    assert!(!status.finished);
    assert_eq!(status.remaining_amount, dec!(750));
}

#[test]
fn test_contributions_commute() {
    let apply = |deltas: &[Decimal]| {
        deltas.iter().try_fold(dec!(10), |acc, d| {
            GoalService::validate_contribution(*d).map(|d| acc + d)
        })
    };

    assert_eq!(apply(&[dec!(100), dec!(50)]), Ok(dec!(160)));
    assert_eq!(apply(&[dec!(50), dec!(100)]), Ok(dec!(160)));
}

proptest! {
    /// Remaining plus added always covers the target exactly while unfinished.
    #[test]
    fn prop_remaining_complements_added(added in 0i64..1_000_000, target in 1i64..1_000_000) {
        let added = Decimal::new(added, 2);
        let target = Decimal::new(target, 2);
        let status = GoalService::status(added, target);

        if status.finished {
            prop_assert_eq!(status.remaining_amount, Decimal::ZERO);
        } else {
            prop_assert_eq!(status.remaining_amount + added, target);
        }
    }
}
