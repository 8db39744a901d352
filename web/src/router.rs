//! Router configuration.

use crate::handlers::{
    create_event, get_event, health_check, index, list_events, readiness_check, update_event,
};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `/health`, `/ready`: probes
/// - `/api`: index
/// - `/api/events`, `/api/events/:id`: event resources
///
/// Every route runs inside the HTTP trace layer and the correlation ID layer.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(index))
        .route("/events", get(list_events).post(create_event))
        .route("/events/:id", get(get_event).put(update_event));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
