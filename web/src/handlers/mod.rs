//! HTTP request handlers.

pub mod events;
pub mod health;
pub mod index;

pub use events::{create_event, get_event, list_events, update_event};
pub use health::{health_check, readiness_check};
pub use index::index;
