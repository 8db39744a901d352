//! Custom Axum extractors.
//!
//! - `CorrelationId`: the request's correlation ID
//! - `JsonBody`: JSON request body with rejections rendered as [`AppError`]
//! - `EventPath`: the `{id}` path segment as an [`EventId`]
//! - `Paging`: `page`, `size` and `sort` query parameters as a [`PageRequest`]

use crate::error::AppError;
use crate::middleware::resolve_correlation_id;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query},
    http::request::Parts,
};
use event_api_core::event::EventId;
use event_api_core::page::PageRequest;
use serde::Deserialize;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Taken from request extensions when the correlation layer is installed,
/// otherwise resolved from the `X-Correlation-ID` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }
        Ok(Self(resolve_correlation_id(&parts.headers)))
    }
}

/// JSON request body.
///
/// Malformed JSON, wrong types and unknown properties become a 400
/// [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Identifier segment of `/api/events/{id}`.
#[derive(Debug, Deserialize, FromRequestParts)]
#[serde(transparent)]
#[from_request(via(Path), rejection(AppError))]
pub struct EventPath(pub EventId);

#[derive(Debug, Default, Deserialize)]
struct PagingParams {
    page: Option<u32>,
    size: Option<u32>,
    sort: Option<String>,
}

/// Page request built from `page`, `size` and `sort` query parameters.
///
/// Missing parameters fall back to the configured defaults; `size` is capped
/// at the configured maximum.
#[derive(Debug, Clone, Copy)]
pub struct Paging(pub PageRequest);

#[async_trait]
impl FromRequestParts<AppState> for Paging {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PagingParams>::from_request_parts(parts, state).await?;

        let size = params
            .size
            .unwrap_or(state.paging.default_size)
            .min(state.paging.max_size);
        let mut request = PageRequest::new(params.page.unwrap_or(0), size)?;

        if let Some(sort) = params.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            request = request.with_sort(sort.parse()?);
        }

        Ok(Self(request))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::links::LinkBuilder;
    use crate::state::PagingConfig;
    use axum::http::{Request, StatusCode};
    use event_api_core::memory::InMemoryEventRepository;
    use event_api_core::page::{Direction, Sort, SortProperty};
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(
            Arc::new(InMemoryEventRepository::new()),
            LinkBuilder::new("http://localhost:8080"),
        )
        .with_paging(PagingConfig {
            default_size: 20,
            max_size: 50,
        })
    }

    async fn paging(uri: &str) -> Result<PageRequest, AppError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Paging::from_request_parts(&mut parts, &state())
            .await
            .map(|p| p.0)
    }

    #[tokio::test]
    async fn correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let (mut parts, ()) = Request::builder()
            .header("X-Correlation-ID", uuid.to_string())
            .body(())
            .unwrap()
            .into_parts();

        let id = CorrelationId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.0, uuid);
    }

    #[tokio::test]
    async fn correlation_id_prefers_extension() {
        let stored = Uuid::new_v4();
        let (mut parts, ()) = Request::builder()
            .header("X-Correlation-ID", Uuid::new_v4().to_string())
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(CorrelationId(stored));

        let id = CorrelationId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.0, stored);
    }

    #[tokio::test]
    async fn paging_defaults() {
        let request = paging("/api/events").await.unwrap();

        assert_eq!(request.page, 0);
        assert_eq!(request.size, 20);
        assert_eq!(request.sort, None);
    }

    #[tokio::test]
    async fn paging_parses_all_parameters() {
        let request = paging("/api/events?page=1&size=10&sort=name,DESC")
            .await
            .unwrap();

        assert_eq!(request.page, 1);
        assert_eq!(request.size, 10);
        assert_eq!(
            request.sort,
            Some(Sort::new(SortProperty::Name, Direction::Desc))
        );
    }

    #[tokio::test]
    async fn paging_caps_size() {
        let request = paging("/api/events?size=5000").await.unwrap();
        assert_eq!(request.size, 50);
    }

    #[tokio::test]
    async fn paging_rejects_bad_values() {
        for uri in [
            "/api/events?size=0",
            "/api/events?page=-1",
            "/api/events?page=abc",
            "/api/events?sort=password",
        ] {
            let err = paging(uri).await.unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    async fn event_path(uri: &str) -> (StatusCode, String) {
        use axum::{Router, body::Body, routing::get};
        use tower::ServiceExt;

        let app = Router::new().route(
            "/events/:id",
            get(|EventPath(id): EventPath| async move { id.value().to_string() }),
        );
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn event_path_extracts_the_id() {
        assert_eq!(event_path("/events/7").await, (StatusCode::OK, "7".to_string()));
    }

    #[tokio::test]
    async fn event_path_rejects_non_numeric_ids() {
        let (status, body) = event_path("/events/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("BAD_REQUEST"), "{body}");
    }
}
