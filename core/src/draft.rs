//! Structural binding of event submissions.
//!
//! [`EventDraft`] is the request body as the client sent it. Binding it does
//! two things, in order:
//!
//! 1. checks the declared constraints (required fields, non-negative
//!    numbers) and reports violations as [`FieldError`]s
//! 2. maps the draft field by field into [`EventDetails`]
//!
//! Unknown properties such as `id`, `free`, `offline` or `eventStatus` are
//! rejected while deserializing, before binding runs.

use crate::event::EventDetails;
use crate::validation::FieldError;
use chrono::NaiveDateTime;
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// JSON field names in declaration order, used to order binding errors.
const FIELD_ORDER: [&str; 10] = [
    "name",
    "description",
    "beginEnrollmentDateTime",
    "closeEnrollmentDateTime",
    "beginEventDateTime",
    "endEventDateTime",
    "location",
    "basePrice",
    "maxPrice",
    "limitOfEnrollment",
];

/// An event submission as received from the client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventDraft {
    /// Event name
    #[validate(
        required(code = "NotEmpty", message = "must not be empty"),
        length(min = 1, code = "NotEmpty", message = "must not be empty")
    )]
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// When enrollment opens
    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[serde(default)]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,

    /// When enrollment closes
    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[serde(default)]
    pub close_enrollment_date_time: Option<NaiveDateTime>,

    /// When the event starts
    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[serde(default)]
    pub begin_event_date_time: Option<NaiveDateTime>,

    /// When the event ends
    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[serde(default)]
    pub end_event_date_time: Option<NaiveDateTime>,

    /// Physical location
    #[serde(default)]
    pub location: Option<String>,

    /// Lowest price
    #[validate(range(min = 0, code = "Min", message = "must be greater than or equal to 0"))]
    #[serde(default)]
    pub base_price: i32,

    /// Highest price
    #[validate(range(min = 0, code = "Min", message = "must be greater than or equal to 0"))]
    #[serde(default)]
    pub max_price: i32,

    /// Enrollment capacity
    #[validate(range(min = 0, code = "Min", message = "must be greater than or equal to 0"))]
    #[serde(default)]
    pub limit_of_enrollment: i32,
}

impl EventDraft {
    /// Check the structural constraints and map the draft into [`EventDetails`].
    ///
    /// # Errors
    ///
    /// Returns every constraint violation, ordered by field declaration, when
    /// a required field is missing or a number is negative.
    pub fn bind(self) -> Result<EventDetails, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(to_field_errors(&errors));
        }

        Ok(EventDetails {
            name: required(self.name, "name")?,
            description: self.description,
            begin_enrollment_date_time: required(
                self.begin_enrollment_date_time,
                "beginEnrollmentDateTime",
            )?,
            close_enrollment_date_time: required(
                self.close_enrollment_date_time,
                "closeEnrollmentDateTime",
            )?,
            begin_event_date_time: required(self.begin_event_date_time, "beginEventDateTime")?,
            end_event_date_time: required(self.end_event_date_time, "endEventDateTime")?,
            location: self.location,
            base_price: self.base_price,
            max_price: self.max_price,
            limit_of_enrollment: self.limit_of_enrollment,
        })
    }
}

impl EventDetails {
    /// Map the details back into a submission body.
    #[must_use]
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            begin_enrollment_date_time: Some(self.begin_enrollment_date_time),
            close_enrollment_date_time: Some(self.close_enrollment_date_time),
            begin_event_date_time: Some(self.begin_event_date_time),
            end_event_date_time: Some(self.end_event_date_time),
            location: self.location.clone(),
            base_price: self.base_price,
            max_price: self.max_price,
            limit_of_enrollment: self.limit_of_enrollment,
        }
    }
}

fn to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut result: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, violations)| {
            let field = field.to_case(Case::Camel);
            violations.iter().map(move |violation| {
                let message = violation
                    .message
                    .as_ref()
                    .map_or_else(|| violation.code.to_string(), ToString::to_string);
                let error = FieldError::new(field.clone(), violation.code.to_string(), message);
                match violation.params.get("value") {
                    Some(value) if !value.is_null() => error.with_rejected_value(value.clone()),
                    _ => error,
                }
            })
        })
        .collect();

    result.sort_by_key(|error| field_position(&error.field));
    result.dedup_by(|a, b| a.field == b.field && a.code == b.code);
    result
}

fn field_position(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|name| *name == field)
        .unwrap_or(FIELD_ORDER.len())
}

/// Unwrap a field the constraints already marked as required.
fn required<T>(value: Option<T>, field: &str) -> Result<T, Vec<FieldError>> {
    value.ok_or_else(|| vec![FieldError::new(field, "NotNull", "must not be null")])
}
