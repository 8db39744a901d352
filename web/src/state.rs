//! Application state for Axum handlers.

use crate::links::LinkBuilder;
use event_api_core::page::PageRequest;
use event_api_core::repository::EventRepository;
use event_api_core::validation::EventValidator;
use std::sync::Arc;

/// Page size limits for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    /// Size used when the request names none
    pub default_size: u32,
    /// Largest size a request may ask for
    pub max_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_size: PageRequest::DEFAULT_SIZE,
            max_size: 2000,
        }
    }
}

/// Application state shared across all HTTP handlers.
///
/// # Examples
///
/// ```
/// use event_api_core::memory::InMemoryEventRepository;
/// use event_api_web::links::LinkBuilder;
/// use event_api_web::state::AppState;
/// use std::sync::Arc;
///
/// let state = AppState::new(
///     Arc::new(InMemoryEventRepository::new()),
///     LinkBuilder::new("http://localhost:8080"),
/// );
/// assert_eq!(state.paging.default_size, 20);
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Event storage
    pub repository: Arc<dyn EventRepository>,
    /// Business-rule validator
    pub validator: EventValidator,
    /// Link construction
    pub links: LinkBuilder,
    /// Listing page size limits
    pub paging: PagingConfig,
}

impl AppState {
    /// Create state over `repository` with default paging limits.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>, links: LinkBuilder) -> Self {
        Self {
            repository,
            validator: EventValidator::new(),
            links,
            paging: PagingConfig::default(),
        }
    }

    /// Replace the paging limits.
    #[must_use]
    pub const fn with_paging(mut self, paging: PagingConfig) -> Self {
        self.paging = paging;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("links", &self.links)
            .field("paging", &self.paging)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Axum requires Clone state
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
