//! # Event API Core
//!
//! Domain types, validation rules and storage abstractions for the event API.
//!
//! Nothing in this crate knows about HTTP. The web crate binds request bodies
//! into [`draft::EventDraft`], runs both validation stages and hands valid
//! details to an [`repository::EventRepository`].
//!
//! ## Validation stages
//!
//! 1. **Structural** ([`draft::EventDraft::bind`]): required fields, non-negative numbers
//! 2. **Business** ([`validation::EventValidator`]): price consistency and date ordering
//!
//! Business rules only run once the structural stage has passed.
//!
//! ## Example
//!
//! ```
//! use event_api_core::draft::EventDraft;
//! use event_api_core::validation::EventValidator;
//!
//! let draft: EventDraft = serde_json::from_str(r#"{
//!     "name": "Spring",
//!     "beginEnrollmentDateTime": "2020-03-10T04:02:02",
//!     "closeEnrollmentDateTime": "2020-03-11T04:02:02",
//!     "beginEventDateTime": "2020-03-12T04:02:02",
//!     "endEventDateTime": "2020-03-13T04:02:02",
//!     "basePrice": 100,
//!     "maxPrice": 200,
//!     "limitOfEnrollment": 100
//! }"#).unwrap();
//!
//! let details = draft.bind().unwrap();
//! assert!(EventValidator::new().validate(&details).is_empty());
//! ```

pub mod draft;
pub mod event;
pub mod memory;
pub mod page;
pub mod repository;
pub mod validation;

pub use draft::EventDraft;
pub use event::{Event, EventDetails, EventId, EventStatus, NewEvent};
pub use memory::InMemoryEventRepository;
pub use page::{Direction, Page, PageError, PageRequest, Sort, SortProperty};
pub use repository::{EventRepository, RepositoryError, RepositoryFuture};
pub use validation::{EventValidator, FieldError};
