//! Axum integration for the event REST API.
//!
//! Handlers stay thin: they extract input, hand it to the core crate's
//! binding, validation and repository, and map the outcome to HAL/JSON.
//!
//! # Request Flow
//!
//! 1. **Correlation layer** resolves `X-Correlation-ID` and opens the request span
//! 2. **Extractors** parse the body, path and paging parameters (400 on failure)
//! 3. **Binding** checks required fields and number bounds (400 with field errors)
//! 4. **Validator** checks prices and dates (400 with field errors)
//! 5. **Repository** stores or loads events
//! 6. **HAL response** adds absolute links
//!
//! # Example
//!
//! ```
//! use event_api_core::memory::InMemoryEventRepository;
//! use event_api_web::{AppState, build_router, links::LinkBuilder};
//! use std::sync::Arc;
//!
//! let state = AppState::new(
//!     Arc::new(InMemoryEventRepository::new()),
//!     LinkBuilder::new("http://localhost:8080"),
//! );
//! let app: axum::Router = build_router(state);
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod hal;
pub mod handlers;
pub mod links;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{CorrelationId, EventPath, JsonBody, Paging};
pub use hal::{EntityModel, HAL_JSON, Hal, Links, PagedModel};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use router::build_router;
pub use state::{AppState, PagingConfig};
