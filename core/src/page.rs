//! Paging and sorting for event listings.
//!
//! Page indexes are zero-based. Sort expressions follow the
//! `property[,asc|desc]` query format, e.g. `name,DESC`.

use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while interpreting paging parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The sort property is not a sortable event field.
    #[error("Unknown sort property: {0}")]
    UnknownProperty(String),

    /// The sort direction is neither `asc` nor `desc`.
    #[error("Unknown sort direction: {0}")]
    UnknownDirection(String),

    /// The page size is zero.
    #[error("Page size must be at least 1")]
    EmptyPage,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl FromStr for Direction {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(PageError::UnknownDirection(s.to_string())),
        }
    }
}

/// Event fields that listings can be sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortProperty {
    /// Identifier
    #[default]
    Id,
    /// Name
    Name,
    /// Enrollment opening
    BeginEnrollmentDateTime,
    /// Enrollment closing
    CloseEnrollmentDateTime,
    /// Event start
    BeginEventDateTime,
    /// Event end
    EndEventDateTime,
    /// Lowest price
    BasePrice,
    /// Highest price
    MaxPrice,
    /// Capacity
    LimitOfEnrollment,
}

impl SortProperty {
    /// Query-string name of the property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::BeginEnrollmentDateTime => "beginEnrollmentDateTime",
            Self::CloseEnrollmentDateTime => "closeEnrollmentDateTime",
            Self::BeginEventDateTime => "beginEventDateTime",
            Self::EndEventDateTime => "endEventDateTime",
            Self::BasePrice => "basePrice",
            Self::MaxPrice => "maxPrice",
            Self::LimitOfEnrollment => "limitOfEnrollment",
        }
    }

    fn compare(self, a: &Event, b: &Event) -> Ordering {
        let (x, y) = (&a.details, &b.details);
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => x.name.cmp(&y.name),
            Self::BeginEnrollmentDateTime => {
                x.begin_enrollment_date_time.cmp(&y.begin_enrollment_date_time)
            },
            Self::CloseEnrollmentDateTime => {
                x.close_enrollment_date_time.cmp(&y.close_enrollment_date_time)
            },
            Self::BeginEventDateTime => x.begin_event_date_time.cmp(&y.begin_event_date_time),
            Self::EndEventDateTime => x.end_event_date_time.cmp(&y.end_event_date_time),
            Self::BasePrice => x.base_price.cmp(&y.base_price),
            Self::MaxPrice => x.max_price.cmp(&y.max_price),
            Self::LimitOfEnrollment => x.limit_of_enrollment.cmp(&y.limit_of_enrollment),
        }
    }
}

impl FromStr for SortProperty {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let property = match s.trim() {
            "id" => Self::Id,
            "name" => Self::Name,
            "beginEnrollmentDateTime" => Self::BeginEnrollmentDateTime,
            "closeEnrollmentDateTime" => Self::CloseEnrollmentDateTime,
            "beginEventDateTime" => Self::BeginEventDateTime,
            "endEventDateTime" => Self::EndEventDateTime,
            "basePrice" => Self::BasePrice,
            "maxPrice" => Self::MaxPrice,
            "limitOfEnrollment" => Self::LimitOfEnrollment,
            other => return Err(PageError::UnknownProperty(other.to_string())),
        };
        Ok(property)
    }
}

/// Sort order for a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to sort by
    pub property: SortProperty,
    /// Direction
    pub direction: Direction,
}

impl Sort {
    /// Sort by `property` in `direction`.
    #[must_use]
    pub const fn new(property: SortProperty, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }

    /// Compare two events under this sort; ties fall back to ascending id.
    #[must_use]
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        let ordering = self.property.compare(a, b);
        let ordering = match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{},{direction}", self.property.as_str())
    }
}

impl FromStr for Sort {
    type Err = PageError;

    /// Parse `property` or `property,direction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let property = parts.next().unwrap_or_default().parse()?;
        let direction = match parts.next() {
            Some(direction) => direction.parse()?,
            None => Direction::Asc,
        };
        Ok(Self::new(property, direction))
    }
}

/// A request for one page of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Number of items per page
    pub size: u32,
    /// Sort order, `None` for ascending id
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// Default page size.
    pub const DEFAULT_SIZE: u32 = 20;

    /// Request page `page` of `size` items.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::EmptyPage`] when `size` is zero.
    pub const fn new(page: u32, size: u32) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::EmptyPage);
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    /// Apply a sort order.
    #[must_use]
    pub const fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Number of items before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
            sort: None,
        }
    }
}

/// One page of a listing together with its position in the whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub content: Vec<T>,
    /// Zero-based page index
    pub number: u32,
    /// Requested page size
    pub size: u32,
    /// Number of items across all pages
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Build a page for `request` holding `content`.
    #[must_use]
    pub const fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Number of pages needed for every item; `0` when there are none.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size as u64)
    }

    /// True when a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.number as u64) + 1 < self.total_pages()
    }

    /// True when an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// True for the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        !self.has_previous()
    }

    /// True for the last page (or an out-of-range page).
    #[must_use]
    pub const fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Transform each item while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn sort_parsing() {
        assert_eq!(
            "name,DESC".parse::<Sort>().unwrap(),
            Sort::new(SortProperty::Name, Direction::Desc)
        );
        assert_eq!(
            "basePrice".parse::<Sort>().unwrap(),
            Sort::new(SortProperty::BasePrice, Direction::Asc)
        );
        assert_eq!(
            "id,asc".parse::<Sort>().unwrap().to_string(),
            "id,asc"
        );
    }

    #[test]
    fn sort_parsing_rejects_unknown_values() {
        assert_eq!(
            "password,asc".parse::<Sort>(),
            Err(PageError::UnknownProperty("password".to_string()))
        );
        assert_eq!(
            "name,sideways".parse::<Sort>(),
            Err(PageError::UnknownDirection("sideways".to_string()))
        );
        assert!("".parse::<Sort>().is_err());
    }

    #[test]
    fn page_request_rejects_zero_size() {
        assert_eq!(PageRequest::new(0, 0), Err(PageError::EmptyPage));
        assert_eq!(PageRequest::new(3, 10).unwrap().offset(), 30);
    }

    #[test]
    fn page_metadata() {
        let request = PageRequest::new(1, 10).unwrap();
        let page = Page::new(vec![1; 10], &request, 30);

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert!(!page.is_first());
        assert!(!page.is_last());
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let page: Page<u8> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn map_keeps_metadata() {
        let request = PageRequest::new(2, 5).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 13).map(|n| n * 10);

        assert_eq!(page.content, vec![10, 20, 30]);
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages(), 3);
        assert!(page.is_last());
    }
}
