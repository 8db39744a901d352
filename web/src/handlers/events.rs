//! Event API endpoints.
//!
//! - `POST /api/events` - Create an event
//! - `GET /api/events` - List events page by page
//! - `GET /api/events/:id` - Get one event
//! - `PUT /api/events/:id` - Replace an event's details
//!
//! Submissions pass structural binding first and the business rules second;
//! the first stage that fails answers 400 with an error resource.

use crate::error::AppError;
use crate::extractors::{EventPath, JsonBody, Paging};
use crate::hal::{EntityModel, Hal, PagedModel};
use crate::metrics::{self, ValidationStage};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use event_api_core::draft::EventDraft;
use event_api_core::event::{Event, EventDetails, NewEvent};
use event_api_core::validation::FieldError;

/// Collection relation of embedded events.
pub const EVENT_LIST_REL: &str = "eventList";

/// Create a new event.
///
/// The event always starts as `DRAFT`; `free` and `offline` are derived
/// from the submitted prices and location.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/events \
///   -H "Content-Type: application/json" \
///   -d '{
///     "name": "Spring",
///     "description": "REST API Development with Spring",
///     "beginEnrollmentDateTime": "2020-03-10T04:02:02",
///     "closeEnrollmentDateTime": "2020-03-11T04:02:02",
///     "beginEventDateTime": "2020-03-12T04:02:02",
///     "endEventDateTime": "2020-03-13T04:02:02",
///     "location": "Gangnam station",
///     "basePrice": 100,
///     "maxPrice": 200,
///     "limitOfEnrollment": 100
///   }'
/// ```
///
/// # Errors
///
/// - 400 when the body is malformed, has unknown properties or fails validation
/// - 500 when the repository is unavailable
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<EventDraft>,
) -> Result<impl IntoResponse, AppError> {
    let details = accept(&state, draft)?;

    let event = state.repository.save(NewEvent::draft(details)).await?;
    metrics::record_event_created();
    tracing::info!(event_id = %event.id, name = %event.details.name, "Event created");

    let self_href = state.links.event(event.id);
    let model = EntityModel::new(event)
        .with_link("self", self_href.clone())
        .with_link("query-events", state.links.events())
        .with_link("update-event", self_href.clone())
        .with_link("profile", state.links.profile("resources-events-create"));

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, self_href)],
        Hal(model),
    ))
}

/// List events with pagination.
///
/// # Example
///
/// ```bash
/// curl 'http://localhost:8080/api/events?page=1&size=10&sort=name,DESC'
/// ```
///
/// # Errors
///
/// - 400 for a zero size or an unknown sort property
/// - 500 when the repository is unavailable
pub async fn list_events(
    State(state): State<AppState>,
    Paging(request): Paging,
) -> Result<Hal<PagedModel<Event>>, AppError> {
    let page = state.repository.find_all(request).await?;
    tracing::debug!(
        page = page.number,
        size = page.size,
        total = page.total_elements,
        "Events listed"
    );

    let links = state
        .links
        .page_navigation(&request, &page)
        .with("profile", state.links.profile("resources-events-list"));
    let page = page.map(|event| {
        let href = state.links.event(event.id);
        EntityModel::new(event).with_link("self", href)
    });

    Ok(Hal(PagedModel::new(EVENT_LIST_REL, page, links)))
}

/// Get event details by ID.
///
/// # Errors
///
/// - 404 when no event has the ID
pub async fn get_event(
    State(state): State<AppState>,
    EventPath(id): EventPath,
) -> Result<Hal<EntityModel<Event>>, AppError> {
    let event = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;

    Ok(Hal(
        EntityModel::new(event)
            .with_link("self", state.links.event(id))
            .with_link("profile", state.links.profile("resources-events-get")),
    ))
}

/// Replace an event's details.
///
/// The stored status is kept; `free` and `offline` are recomputed.
///
/// # Errors
///
/// - 404 when no event has the ID
/// - 400 when the body is malformed or fails validation
pub async fn update_event(
    State(state): State<AppState>,
    EventPath(id): EventPath,
    JsonBody(draft): JsonBody<EventDraft>,
) -> Result<Hal<EntityModel<Event>>, AppError> {
    let mut event = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;

    let details = accept(&state, draft)?;
    event.apply(details);

    let event = state.repository.update(event).await?;
    metrics::record_event_updated();
    tracing::info!(event_id = %id, "Event updated");

    Ok(Hal(
        EntityModel::new(event)
            .with_link("self", state.links.event(id))
            .with_link("profile", state.links.profile("resources-events-update")),
    ))
}

/// Run both validation stages over a submission.
fn accept(state: &AppState, draft: EventDraft) -> Result<EventDetails, AppError> {
    let details = draft
        .bind()
        .map_err(|errors| reject(state, ValidationStage::Binding, errors))?;

    let errors = state.validator.validate(&details);
    if !errors.is_empty() {
        return Err(reject(state, ValidationStage::Business, errors));
    }

    Ok(details)
}

fn reject(state: &AppState, stage: ValidationStage, errors: Vec<FieldError>) -> AppError {
    metrics::record_validation_failure(stage);
    tracing::warn!(
        stage = stage.as_str(),
        error_count = errors.len(),
        "Event submission rejected"
    );
    AppError::validation_failed(errors, state.links.index())
}
