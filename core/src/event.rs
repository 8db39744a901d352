//! Event resource types and lifecycle operations.
//!
//! An event moves through three shapes on its way into the repository:
//!
//! - [`EventDetails`]: the client-mutable field set, already structurally valid
//! - [`NewEvent`]: details plus the server-controlled status and derived flags
//! - [`Event`]: a stored event carrying its repository-assigned [`EventId`]
//!
//! `id`, `eventStatus`, `free` and `offline` never come from the client.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to an event by the repository.
///
/// # Examples
///
/// ```
/// use event_api_core::event::EventId;
///
/// let id: EventId = serde_json::from_str("42").unwrap();
/// assert_eq!(id, EventId::new(42));
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Create an `EventId` from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Publication status of an event.
///
/// Every event starts as [`EventStatus::Draft`]; nothing in this API moves it
/// further, but stored events may carry the later states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Created but not yet visible to attendees
    #[default]
    Draft,
    /// Visible to attendees
    Published,
    /// Enrollment is open
    BeganEnrollment,
}

impl EventStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::BeganEnrollment => "BEGAN_ENROLLMENT",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The client-mutable fields of an event.
///
/// Values of this type have passed structural binding (see
/// [`EventDraft::bind`](crate::draft::EventDraft::bind)): required fields are
/// present and numbers are non-negative. Business rules are checked separately
/// by [`EventValidator`](crate::validation::EventValidator).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// Event name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// When enrollment opens
    pub begin_enrollment_date_time: NaiveDateTime,
    /// When enrollment closes
    pub close_enrollment_date_time: NaiveDateTime,
    /// When the event starts
    pub begin_event_date_time: NaiveDateTime,
    /// When the event ends
    pub end_event_date_time: NaiveDateTime,
    /// Physical location; absent or blank for online events
    pub location: Option<String>,
    /// Lowest price
    pub base_price: i32,
    /// Highest price, `0` meaning unlimited
    pub max_price: i32,
    /// Enrollment capacity
    pub limit_of_enrollment: i32,
}

impl EventDetails {
    /// True when both prices are zero.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.base_price == 0 && self.max_price == 0
    }

    /// True when a non-blank location is set.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty())
    }
}

/// A validated event that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    /// Client-supplied fields
    #[serde(flatten)]
    pub details: EventDetails,
    /// Derived: both prices are zero
    pub free: bool,
    /// Derived: a location is set
    pub offline: bool,
    /// Server-controlled status
    pub event_status: EventStatus,
}

impl NewEvent {
    /// Prepare details for creation: status is forced to `DRAFT` and the
    /// derived flags are computed.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let new_event = NewEvent::draft(details);
    /// assert_eq!(new_event.event_status, EventStatus::Draft);
    /// ```
    #[must_use]
    pub fn draft(details: EventDetails) -> Self {
        Self {
            free: details.is_free(),
            offline: details.is_offline(),
            event_status: EventStatus::Draft,
            details,
        }
    }

    /// Attach the identifier assigned by the repository.
    #[must_use]
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            details: self.details,
            free: self.free,
            offline: self.offline,
            event_status: self.event_status,
        }
    }
}

/// A stored event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Repository-assigned identifier
    pub id: EventId,
    /// Client-supplied fields
    #[serde(flatten)]
    pub details: EventDetails,
    /// Derived: both prices are zero
    pub free: bool,
    /// Derived: a location is set
    pub offline: bool,
    /// Server-controlled status
    pub event_status: EventStatus,
}

impl Event {
    /// Overwrite every client-mutable field with `details`.
    ///
    /// The identifier and status are kept; derived flags are recomputed.
    pub fn apply(&mut self, details: EventDetails) {
        self.free = details.is_free();
        self.offline = details.is_offline();
        self.details = details;
    }

    /// Derived free flag.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.free
    }

    /// Derived offline flag.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.offline
    }
}
