//! Repository abstraction for stored events.
//!
//! The web layer only ever talks to `Arc<dyn EventRepository>`, so the trait
//! returns boxed futures instead of using `async fn`.
//!
//! # Implementations
//!
//! - [`InMemoryEventRepository`](crate::memory::InMemoryEventRepository): map-backed store used by the server and tests
//!
//! # Example
//!
//! ```no_run
//! use event_api_core::event::{EventDetails, NewEvent};
//! use event_api_core::repository::{EventRepository, RepositoryError};
//!
//! async fn create<R: EventRepository>(repo: &R, details: EventDetails) -> Result<(), RepositoryError> {
//!     let stored = repo.save(NewEvent::draft(details)).await?;
//!     assert!(repo.find_by_id(stored.id).await?.is_some());
//!     Ok(())
//! }
//! ```

use crate::event::{Event, EventId, NewEvent};
use crate::page::{Page, PageRequest};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`EventRepository`] methods.
pub type RepositoryFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Errors that can occur during repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No event is stored under the identifier.
    #[error("Event not found: {0}")]
    NotFound(EventId),

    /// The backing store cannot serve requests.
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage for events.
///
/// Implementations must be `Send + Sync`; handlers share one instance across
/// every request task.
pub trait EventRepository: Send + Sync {
    /// Store a new event and return it with its assigned identifier.
    ///
    /// Identifiers are assigned in increasing order and never reused.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: the backing store failed
    fn save(&self, event: NewEvent) -> RepositoryFuture<'_, Event>;

    /// Look up an event by identifier.
    ///
    /// Returns `Ok(None)` when nothing is stored under `id`.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: the backing store failed
    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>>;

    /// Replace the stored event that has the same identifier.
    ///
    /// # Errors
    ///
    /// - `NotFound`: nothing is stored under `event.id`
    /// - `Unavailable`: the backing store failed
    fn update(&self, event: Event) -> RepositoryFuture<'_, Event>;

    /// Load one page of events.
    ///
    /// Pages past the end are empty but still report the total count.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: the backing store failed
    fn find_all(&self, request: PageRequest) -> RepositoryFuture<'_, Page<Event>>;

    /// Number of stored events.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: the backing store failed
    fn count(&self) -> RepositoryFuture<'_, u64>;
}
