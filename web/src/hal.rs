//! HAL/JSON resource representations.
//!
//! Only the parts of HAL the API emits are modelled: `_links` with plain
//! `href`s, `_embedded` collections and the `page` metadata block.

use crate::error::AppError;
use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use event_api_core::page::Page;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Media type of every HAL response.
pub const HAL_JSON: &str = "application/hal+json;charset=UTF-8";

/// A single link relation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL
    pub href: String,
}

/// `_links` object keyed by relation name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    /// Empty link set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the link for `rel`.
    #[must_use]
    pub fn with(mut self, rel: &str, href: impl Into<String>) -> Self {
        self.0.insert(rel.to_string(), Link { href: href.into() });
        self
    }

    /// Look up a relation.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }
}

/// A single resource with its links.
#[derive(Debug, Clone, Serialize)]
pub struct EntityModel<T> {
    /// Resource fields, inlined
    #[serde(flatten)]
    pub content: T,
    /// Link relations
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> EntityModel<T> {
    /// Wrap `content` with no links.
    #[must_use]
    pub fn new(content: T) -> Self {
        Self {
            content,
            links: Links::new(),
        }
    }

    /// Add a link relation.
    #[must_use]
    pub fn with_link(mut self, rel: &str, href: impl Into<String>) -> Self {
        self.links = self.links.with(rel, href);
        self
    }
}

/// `page` block of a paged collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Requested page size
    pub size: u32,
    /// Items across all pages
    pub total_elements: u64,
    /// Number of pages
    pub total_pages: u64,
    /// Zero-based page index
    pub number: u32,
}

impl<T> From<&Page<T>> for PageMetadata {
    fn from(page: &Page<T>) -> Self {
        Self {
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            number: page.number,
        }
    }
}

/// A page of embedded resources with navigation links.
#[derive(Debug, Clone, Serialize)]
pub struct PagedModel<T> {
    /// Embedded resources keyed by collection relation; omitted when empty
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<BTreeMap<&'static str, Vec<EntityModel<T>>>>,
    /// Navigation links
    #[serde(rename = "_links")]
    pub links: Links,
    /// Page metadata
    pub page: PageMetadata,
}

impl<T> PagedModel<T> {
    /// Embed a page of resources under `rel`.
    #[must_use]
    pub fn new(rel: &'static str, page: Page<EntityModel<T>>, links: Links) -> Self {
        let metadata = PageMetadata::from(&page);
        let embedded = if page.content.is_empty() {
            None
        } else {
            Some(BTreeMap::from([(rel, page.content)]))
        };
        Self {
            embedded,
            links,
            page: metadata,
        }
    }
}

/// Responds with `application/hal+json`.
#[derive(Debug, Clone)]
pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))],
                body,
            )
                .into_response(),
            Err(err) => AppError::internal("Failed to serialize response")
                .with_source(err.into())
                .into_response(),
        }
    }
}
