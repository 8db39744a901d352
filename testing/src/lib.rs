//! # Event API Testing
//!
//! Testing utilities for the event REST API.
//!
//! This crate provides:
//! - Mock repositories for failure paths
//! - A draft builder seeded with a known-good submission
//! - Property-based testing strategies for event details
//!
//! ## Example
//!
//! ```
//! use event_api_testing::EventDraftBuilder;
//! use event_api_core::EventValidator;
//!
//! let details = EventDraftBuilder::new()
//!     .base_price(50_000)
//!     .max_price(200)
//!     .build_details();
//!
//! let errors = EventValidator::new().validate(&details);
//! assert_eq!(errors.len(), 2);
//! ```

use event_api_core::draft::EventDraft;
use event_api_core::event::EventDetails;

pub mod properties;

/// Mock implementations of repository traits.
pub mod mocks {
    use event_api_core::event::{Event, EventId, NewEvent};
    use event_api_core::page::{Page, PageRequest};
    use event_api_core::repository::{EventRepository, RepositoryError, RepositoryFuture};

    /// Repository whose every call fails with [`RepositoryError::Unavailable`].
    ///
    /// Drives the readiness probe and internal-error paths.
    #[derive(Debug, Clone)]
    pub struct FailingEventRepository {
        reason: String,
    }

    impl FailingEventRepository {
        /// Create a repository that fails with `reason`.
        #[must_use]
        pub fn new(reason: impl Into<String>) -> Self {
            Self {
                reason: reason.into(),
            }
        }

        fn fail<T>(&self) -> RepositoryFuture<'_, T> {
            let reason = self.reason.clone();
            Box::pin(async move { Err(RepositoryError::Unavailable(reason)) })
        }
    }

    impl Default for FailingEventRepository {
        fn default() -> Self {
            Self::new("connection refused")
        }
    }

    impl EventRepository for FailingEventRepository {
        fn save(&self, _event: NewEvent) -> RepositoryFuture<'_, Event> {
            self.fail()
        }

        fn find_by_id(&self, _id: EventId) -> RepositoryFuture<'_, Option<Event>> {
            self.fail()
        }

        fn update(&self, _event: Event) -> RepositoryFuture<'_, Event> {
            self.fail()
        }

        fn find_all(&self, _request: PageRequest) -> RepositoryFuture<'_, Page<Event>> {
            self.fail()
        }

        fn count(&self) -> RepositoryFuture<'_, u64> {
            self.fail()
        }
    }
}

/// Test helpers and builders.
pub mod helpers {
    use super::{EventDetails, EventDraft};
    use chrono::NaiveDateTime;

    /// Parse a local timestamp such as `2020-03-10T04:02:02`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a valid ISO-8601 local timestamp.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn local(value: &str) -> NaiveDateTime {
        value
            .parse()
            .expect("test timestamps should be valid ISO-8601 local date-times")
    }

    /// Builder for [`EventDraft`] submissions.
    ///
    /// Starts from a valid, priced, offline event; override only what the
    /// test cares about.
    ///
    /// # Example
    ///
    /// ```
    /// use event_api_testing::EventDraftBuilder;
    ///
    /// let body = EventDraftBuilder::new().name("Rust meetup").location(None).to_json();
    /// assert_eq!(body["name"], "Rust meetup");
    /// assert!(body["location"].is_null());
    /// ```
    #[derive(Debug, Clone)]
    pub struct EventDraftBuilder {
        draft: EventDraft,
    }

    impl Default for EventDraftBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl EventDraftBuilder {
        /// Start from the reference submission.
        #[must_use]
        pub fn new() -> Self {
            Self {
                draft: EventDraft {
                    name: Some("Spring".to_string()),
                    description: Some("REST API Development with Spring".to_string()),
                    begin_enrollment_date_time: Some(local("2020-03-10T04:02:02")),
                    close_enrollment_date_time: Some(local("2020-03-11T04:02:02")),
                    begin_event_date_time: Some(local("2020-03-12T04:02:02")),
                    end_event_date_time: Some(local("2020-03-13T04:02:02")),
                    location: Some("Gangnam station D2 startup factory".to_string()),
                    base_price: 100,
                    max_price: 200,
                    limit_of_enrollment: 100,
                },
            }
        }

        /// Set the name.
        #[must_use]
        pub fn name(mut self, name: impl Into<String>) -> Self {
            self.draft.name = Some(name.into());
            self
        }

        /// Set the description.
        #[must_use]
        pub fn description(mut self, description: Option<&str>) -> Self {
            self.draft.description = description.map(ToString::to_string);
            self
        }

        /// Set when enrollment opens.
        #[must_use]
        pub fn begin_enrollment(mut self, at: &str) -> Self {
            self.draft.begin_enrollment_date_time = Some(local(at));
            self
        }

        /// Set when enrollment closes.
        #[must_use]
        pub fn close_enrollment(mut self, at: &str) -> Self {
            self.draft.close_enrollment_date_time = Some(local(at));
            self
        }

        /// Set when the event starts.
        #[must_use]
        pub fn begin_event(mut self, at: &str) -> Self {
            self.draft.begin_event_date_time = Some(local(at));
            self
        }

        /// Set when the event ends.
        #[must_use]
        pub fn end_event(mut self, at: &str) -> Self {
            self.draft.end_event_date_time = Some(local(at));
            self
        }

        /// Set the location; `None` makes the event online.
        #[must_use]
        pub fn location(mut self, location: Option<&str>) -> Self {
            self.draft.location = location.map(ToString::to_string);
            self
        }

        /// Set the base price.
        #[must_use]
        pub const fn base_price(mut self, price: i32) -> Self {
            self.draft.base_price = price;
            self
        }

        /// Set the maximum price.
        #[must_use]
        pub const fn max_price(mut self, price: i32) -> Self {
            self.draft.max_price = price;
            self
        }

        /// Set the enrollment capacity.
        #[must_use]
        pub const fn limit_of_enrollment(mut self, limit: i32) -> Self {
            self.draft.limit_of_enrollment = limit;
            self
        }

        /// Finish building the draft.
        #[must_use]
        pub fn build(self) -> EventDraft {
            self.draft
        }

        /// Bind the draft into details.
        ///
        /// # Panics
        ///
        /// Panics if the draft fails structural binding.
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn build_details(self) -> EventDetails {
            self.draft
                .bind()
                .expect("builder drafts should pass structural binding")
        }

        /// Render the draft as a JSON request body.
        ///
        /// # Panics
        ///
        /// Panics if the draft cannot be serialized.
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn to_json(&self) -> serde_json::Value {
            serde_json::to_value(&self.draft).expect("drafts should always serialize")
        }
    }

    /// Install a test-writer tracing subscriber; repeated calls are no-ops.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::{EventDraftBuilder, init_test_tracing, local};
pub use mocks::FailingEventRepository;
