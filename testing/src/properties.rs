//! Property-based testing strategies for event details.
//!
//! Each strategy targets one side of a business rule so property tests can
//! state "every candidate like this is accepted/rejected" directly.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use event_api_core::event::EventDetails;
use proptest::prelude::*;

/// Upper bound for generated prices.
pub const MAX_GENERATED_PRICE: i32 = 100_000;

#[allow(clippy::expect_used)]
fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("2020-01-01 is a valid date")
}

/// Timestamps spread over roughly two years from 2020-01-01.
pub fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0_i64..1_000_000).prop_map(|minutes| epoch() + Duration::minutes(minutes))
}

/// Four timestamps in non-decreasing order:
/// begin enrollment, close enrollment, begin event, end event.
pub fn ordered_timestamps()
-> impl Strategy<Value = (NaiveDateTime, NaiveDateTime, NaiveDateTime, NaiveDateTime)> {
    (timestamp(), 0_i64..50_000, 0_i64..50_000, 0_i64..50_000).prop_map(
        |(begin_enrollment, d1, d2, d3)| {
            let close_enrollment = begin_enrollment + Duration::minutes(d1);
            let begin_event = close_enrollment + Duration::minutes(d2);
            let end_event = begin_event + Duration::minutes(d3);
            (begin_enrollment, close_enrollment, begin_event, end_event)
        },
    )
}

/// `(base_price, max_price)` pairs that satisfy the price rule.
pub fn consistent_prices() -> impl Strategy<Value = (i32, i32)> {
    prop_oneof![
        // unlimited: any base price
        (0..=MAX_GENERATED_PRICE).prop_map(|base| (base, 0)),
        (1..=MAX_GENERATED_PRICE).prop_flat_map(|max| (0..=max, Just(max))),
    ]
}

/// `(base_price, max_price)` pairs where a positive max is below the base.
pub fn inconsistent_prices() -> impl Strategy<Value = (i32, i32)> {
    (1..MAX_GENERATED_PRICE).prop_flat_map(|max| ((max + 1)..=MAX_GENERATED_PRICE, Just(max)))
}

fn details_from(
    (name, description, location): (String, Option<String>, Option<String>),
    (begin_enrollment, close_enrollment, begin_event, end_event): (
        NaiveDateTime,
        NaiveDateTime,
        NaiveDateTime,
        NaiveDateTime,
    ),
    (base_price, max_price): (i32, i32),
    limit_of_enrollment: i32,
) -> EventDetails {
    EventDetails {
        name,
        description,
        begin_enrollment_date_time: begin_enrollment,
        close_enrollment_date_time: close_enrollment,
        begin_event_date_time: begin_event,
        end_event_date_time: end_event,
        location,
        base_price,
        max_price,
        limit_of_enrollment,
    }
}

fn text_fields() -> impl Strategy<Value = (String, Option<String>, Option<String>)> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,30}",
        proptest::option::of("[A-Za-z ]{0,60}"),
        proptest::option::of("[A-Za-z ]{0,30}"),
    )
}

/// Details that pass every business rule.
pub fn valid_details() -> impl Strategy<Value = EventDetails> {
    (text_fields(), ordered_timestamps(), consistent_prices(), 0..1_000)
        .prop_map(|(text, times, prices, limit)| details_from(text, times, prices, limit))
}

/// Details whose dates are fine but whose prices break the price rule.
pub fn price_violating_details() -> impl Strategy<Value = EventDetails> {
    (text_fields(), ordered_timestamps(), inconsistent_prices(), 0..1_000)
        .prop_map(|(text, times, prices, limit)| details_from(text, times, prices, limit))
}

/// Details whose prices are fine but whose end precedes one of the earlier
/// timestamps.
pub fn date_violating_details() -> impl Strategy<Value = EventDetails> {
    (valid_details(), 0_usize..3, 1_i64..10_000).prop_map(|(mut details, which, lag)| {
        let earlier = match which {
            0 => details.begin_enrollment_date_time,
            1 => details.close_enrollment_date_time,
            _ => details.begin_event_date_time,
        };
        details.end_event_date_time = earlier - Duration::minutes(lag);
        details
    })
}

/// Arbitrary details, valid or not.
pub fn any_details() -> impl Strategy<Value = EventDetails> {
    (
        text_fields(),
        (timestamp(), timestamp(), timestamp(), timestamp()),
        (0..=MAX_GENERATED_PRICE, 0..=MAX_GENERATED_PRICE),
        0..1_000,
    )
        .prop_map(|(text, times, prices, limit)| details_from(text, times, prices, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn ordered_timestamps_are_ordered((a, b, c, d) in ordered_timestamps()) {
            prop_assert!(a <= b && b <= c && c <= d);
        }

        #[test]
        fn inconsistent_prices_exceed_positive_max((base, max) in inconsistent_prices()) {
            prop_assert!(max > 0);
            prop_assert!(base > max);
        }

        #[test]
        fn date_violations_end_early(details in date_violating_details()) {
            let end = details.end_event_date_time;
            prop_assert!(
                end < details.begin_event_date_time
                    || end < details.close_enrollment_date_time
                    || end < details.begin_enrollment_date_time
            );
        }
    }
}
