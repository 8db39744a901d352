//! Business-rule validation for event submissions.
//!
//! [`EventValidator`] is a pure function over [`EventDetails`]: it never
//! mutates its input, performs no I/O and reports problems as a list of
//! [`FieldError`]s. An empty list means the candidate may be persisted.
//!
//! Rules:
//!
//! 1. **Price consistency**: when `maxPrice > 0` the event is priced by
//!    bidding, so `basePrice` must not exceed `maxPrice`. A violation reports
//!    both `basePrice` and `maxPrice`.
//! 2. **Date ordering**: `endEventDateTime` must not precede
//!    `beginEventDateTime`, `closeEnrollmentDateTime` or
//!    `beginEnrollmentDateTime`. A violation reports `endEventDateTime`.

use crate::event::EventDetails;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Object name reported on every error produced for an event submission.
pub const EVENT_OBJECT_NAME: &str = "eventDraft";

/// Error code for business-rule violations.
pub const WRONG_VALUE: &str = "wrongValue";

/// A validation failure scoped to one named field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Name of the validated object
    pub object_name: String,
    /// Field the error refers to (JSON name)
    pub field: String,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub default_message: String,
    /// The offending value, when known
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rejected_value: Option<Value>,
}

impl FieldError {
    /// Create an error for `field` on the event submission object.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            object_name: EVENT_OBJECT_NAME.to_string(),
            field: field.into(),
            code: code.into(),
            default_message: message.into(),
            rejected_value: None,
        }
    }

    /// Attach the value that was rejected.
    #[must_use]
    pub fn with_rejected_value(mut self, value: impl Into<Value>) -> Self {
        self.rejected_value = Some(value.into());
        self
    }
}

/// Stateless checker for the event business rules.
///
/// # Example
///
/// ```ignore
/// let errors = EventValidator::new().validate(&details);
/// if !errors.is_empty() {
///     return Err(AppError::validation_failed(errors));
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EventValidator;

impl EventValidator {
    /// Creates a new `EventValidator`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Check `candidate` against every business rule.
    ///
    /// Errors are ordered by rule: price errors first, then date errors.
    #[must_use]
    pub fn validate(&self, candidate: &EventDetails) -> Vec<FieldError> {
        let mut errors = Vec::new();
        Self::check_prices(candidate, &mut errors);
        Self::check_dates(candidate, &mut errors);
        errors
    }

    fn check_prices(candidate: &EventDetails, errors: &mut Vec<FieldError>) {
        if candidate.max_price > 0 && candidate.base_price > candidate.max_price {
            errors.push(
                FieldError::new(
                    "basePrice",
                    WRONG_VALUE,
                    "basePrice must not exceed maxPrice",
                )
                .with_rejected_value(candidate.base_price),
            );
            errors.push(
                FieldError::new(
                    "maxPrice",
                    WRONG_VALUE,
                    "maxPrice must not be lower than basePrice",
                )
                .with_rejected_value(candidate.max_price),
            );
        }
    }

    fn check_dates(candidate: &EventDetails, errors: &mut Vec<FieldError>) {
        let end = candidate.end_event_date_time;
        if end < candidate.begin_event_date_time
            || end < candidate.close_enrollment_date_time
            || end < candidate.begin_enrollment_date_time
        {
            errors.push(
                FieldError::new(
                    "endEventDateTime",
                    WRONG_VALUE,
                    "endEventDateTime must not precede the event start or the enrollment period",
                )
                .with_rejected_value(end.format("%Y-%m-%dT%H:%M:%S").to_string()),
            );
        }
    }
}
