//! API root.

use crate::hal::{Hal, Links};
use crate::state::AppState;
use axum::extract::State;
use serde::Serialize;

/// Index resource: links only.
#[derive(Debug, Serialize)]
pub struct IndexResource {
    /// Top-level relations
    #[serde(rename = "_links")]
    pub links: Links,
}

/// `GET /api`: entry point linking to every collection.
#[allow(clippy::unused_async)]
pub async fn index(State(state): State<AppState>) -> Hal<IndexResource> {
    Hal(IndexResource {
        links: Links::new().with("events", state.links.events()),
    })
}
