//! Absolute link construction for API resources.

use crate::hal::Links;
use event_api_core::event::EventId;
use event_api_core::page::{Page, PageRequest};
use std::sync::Arc;

/// Path of the API index.
pub const INDEX_PATH: &str = "/api";

/// Path of the event collection.
pub const EVENTS_PATH: &str = "/api/events";

/// Path of the generated API documentation.
pub const DOCS_PATH: &str = "/docs/index.html";

/// Builds absolute hrefs under a public base URL.
///
/// # Example
///
/// ```
/// use event_api_core::event::EventId;
/// use event_api_web::links::LinkBuilder;
///
/// let links = LinkBuilder::new("http://localhost:8080/");
/// assert_eq!(links.event(EventId::new(3)), "http://localhost:8080/api/events/3");
/// ```
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: Arc<str>,
}

impl LinkBuilder {
    /// Create a builder for `base_url`; a trailing slash is ignored.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// The base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute href for `path`.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// API index.
    #[must_use]
    pub fn index(&self) -> String {
        self.href(INDEX_PATH)
    }

    /// Event collection.
    #[must_use]
    pub fn events(&self) -> String {
        self.href(EVENTS_PATH)
    }

    /// A single event.
    #[must_use]
    pub fn event(&self, id: EventId) -> String {
        format!("{}{EVENTS_PATH}/{id}", self.base_url)
    }

    /// Documentation section `anchor`.
    #[must_use]
    pub fn profile(&self, anchor: &str) -> String {
        format!("{}{DOCS_PATH}#{anchor}", self.base_url)
    }

    /// Event collection at page `page` of `request`'s size and sort.
    #[must_use]
    pub fn events_page(&self, request: &PageRequest, page: u64) -> String {
        let mut href = format!("{}?page={page}&size={}", self.events(), request.size);
        if let Some(sort) = request.sort {
            href.push_str("&sort=");
            href.push_str(&sort.to_string());
        }
        href
    }

    /// Navigation links for `page`: `first`, `prev`, `self`, `next`, `last`.
    ///
    /// `prev` and `next` are only present when those pages exist.
    #[must_use]
    pub fn page_navigation<T>(&self, request: &PageRequest, page: &Page<T>) -> Links {
        let number = u64::from(page.number);
        let last = page.total_pages().saturating_sub(1);

        let mut links = Links::new()
            .with("first", self.events_page(request, 0))
            .with("self", self.events_page(request, number))
            .with("last", self.events_page(request, last));
        if page.has_previous() {
            // Past the end, step back onto the last real page.
            links = links.with("prev", self.events_page(request, (number - 1).min(last)));
        }
        if page.has_next() {
            links = links.with("next", self.events_page(request, number + 1));
        }
        links
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use event_api_core::page::{Direction, Sort, SortProperty};

    fn links() -> LinkBuilder {
        LinkBuilder::new("http://example.com")
    }

    #[test]
    fn resource_hrefs() {
        let links = links();

        assert_eq!(links.index(), "http://example.com/api");
        assert_eq!(links.events(), "http://example.com/api/events");
        assert_eq!(
            links.profile("resources-events-create"),
            "http://example.com/docs/index.html#resources-events-create"
        );
    }

    #[test]
    fn page_hrefs_carry_size_and_sort() {
        let request = PageRequest::new(1, 10)
            .unwrap()
            .with_sort(Sort::new(SortProperty::Name, Direction::Desc));

        assert_eq!(
            links().events_page(&request, 2),
            "http://example.com/api/events?page=2&size=10&sort=name,desc"
        );
    }

    #[test]
    fn middle_page_has_prev_and_next() {
        let request = PageRequest::new(1, 10).unwrap();
        let page = Page::new(vec![0; 10], &request, 30);

        let nav = links().page_navigation(&request, &page);

        assert!(nav.get("prev").unwrap().href.contains("page=0"));
        assert!(nav.get("next").unwrap().href.contains("page=2"));
        assert!(nav.get("last").unwrap().href.contains("page=2"));
    }

    #[test]
    fn single_page_has_no_prev_or_next() {
        let request = PageRequest::default();
        let page = Page::new(vec![1], &request, 1);

        let nav = links().page_navigation(&request, &page);

        assert!(nav.get("prev").is_none());
        assert!(nav.get("next").is_none());
        assert_eq!(nav.get("first"), nav.get("last"));
    }

    #[test]
    fn page_past_the_end_points_prev_at_last() {
        let request = PageRequest::new(5, 20).unwrap();
        let page: Page<i32> = Page::new(Vec::new(), &request, 3);

        let nav = links().page_navigation(&request, &page);

        assert!(nav.get("prev").unwrap().href.contains("page=0&"));
        assert_eq!(nav.get("prev"), nav.get("last"));
        assert!(nav.get("next").is_none());
    }
}
