//! Property tests for the business-rule validator.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use event_api_core::draft::EventDraft;
use event_api_core::validation::{EVENT_OBJECT_NAME, EventValidator, FieldError, WRONG_VALUE};
use event_api_testing::EventDraftBuilder;
use event_api_testing::properties::{
    any_details, date_violating_details, price_violating_details, valid_details,
};
use proptest::prelude::*;

fn fields(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
}

proptest! {
    #[test]
    fn valid_details_produce_no_errors(details in valid_details()) {
        prop_assert!(EventValidator::new().validate(&details).is_empty());
    }

    #[test]
    fn price_violations_report_both_price_fields(details in price_violating_details()) {
        let errors = EventValidator::new().validate(&details);

        prop_assert_eq!(fields(&errors), vec!["basePrice", "maxPrice"]);
        prop_assert!(errors.iter().all(|e| e.code == WRONG_VALUE));
        prop_assert!(errors.iter().all(|e| e.object_name == EVENT_OBJECT_NAME));
    }

    #[test]
    fn date_violations_report_end_once(details in date_violating_details()) {
        let errors = EventValidator::new().validate(&details);

        prop_assert_eq!(fields(&errors), vec!["endEventDateTime"]);
        prop_assert_eq!(errors[0].code.as_str(), WRONG_VALUE);
    }

    #[test]
    fn validation_is_idempotent(details in any_details()) {
        let validator = EventValidator::new();
        let before = details.clone();

        let first = validator.validate(&details);
        let second = validator.validate(&details);

        prop_assert_eq!(first, second);
        prop_assert_eq!(details, before);
    }

    #[test]
    fn at_most_three_errors(details in any_details()) {
        let errors = EventValidator::new().validate(&details);
        prop_assert!(errors.len() <= 3);
    }
}

#[test]
fn reference_submission_is_accepted() {
    let details = EventDraftBuilder::new().build_details();
    assert!(EventValidator::new().validate(&details).is_empty());
}

#[test]
fn wrong_prices_and_dates_are_rejected() {
    let details = EventDraftBuilder::new()
        .base_price(50_000)
        .max_price(200)
        .begin_enrollment("2020-03-10T04:02:02")
        .close_enrollment("2020-03-11T04:02:02")
        .begin_event("2020-03-12T04:02:02")
        .end_event("2020-03-11T04:02:02")
        .build_details();

    let errors = EventValidator::new().validate(&details);

    assert_eq!(
        fields(&errors),
        vec!["basePrice", "maxPrice", "endEventDateTime"]
    );
}

#[test]
fn empty_submission_never_reaches_the_validator() {
    let draft: EventDraft = serde_json::from_str("{}").unwrap();
    let errors = draft.bind().unwrap_err();

    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.code != WRONG_VALUE));
}
