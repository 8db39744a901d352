//! In-memory [`EventRepository`].

use crate::event::{Event, EventId, NewEvent};
use crate::page::{Page, PageRequest, Sort};
use crate::repository::{EventRepository, RepositoryError, RepositoryFuture};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// Map-backed event repository.
///
/// Identifiers start at 1. The identifier sequence is atomic so concurrent
/// saves never share an id.
#[derive(Debug)]
pub struct InMemoryEventRepository {
    events: RwLock<BTreeMap<EventId, Event>>,
    next_id: AtomicI64,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl EventRepository for InMemoryEventRepository {
    fn save(&self, event: NewEvent) -> RepositoryFuture<'_, Event> {
        Box::pin(async move {
            let id = EventId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let event = event.into_event(id);
            self.events.write().await.insert(id, event.clone());
            tracing::debug!(event_id = %id, "Event stored");
            Ok(event)
        })
    }

    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>> {
        Box::pin(async move { Ok(self.events.read().await.get(&id).cloned()) })
    }

    fn update(&self, event: Event) -> RepositoryFuture<'_, Event> {
        Box::pin(async move {
            let mut events = self.events.write().await;
            let Some(slot) = events.get_mut(&event.id) else {
                return Err(RepositoryError::NotFound(event.id));
            };
            slot.clone_from(&event);
            tracing::debug!(event_id = %event.id, "Event replaced");
            Ok(event)
        })
    }

    fn find_all(&self, request: PageRequest) -> RepositoryFuture<'_, Page<Event>> {
        Box::pin(async move {
            let events = self.events.read().await;
            let total = events.len() as u64;

            let mut all: Vec<&Event> = events.values().collect();
            let sort = request.sort.unwrap_or_default();
            if sort != Sort::default() {
                all.sort_by(|a, b| sort.compare(a, b));
            }

            let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
            let content = all
                .into_iter()
                .skip(skip)
                .take(request.size as usize)
                .cloned()
                .collect();

            Ok(Page::new(content, &request, total))
        })
    }

    fn count(&self) -> RepositoryFuture<'_, u64> {
        Box::pin(async move { Ok(self.events.read().await.len() as u64) })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::event::{EventDetails, EventStatus};
    use crate::page::{Direction, SortProperty};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn details(name: &str, base_price: i32) -> EventDetails {
        let at = |day| {
            NaiveDate::from_ymd_opt(2020, 3, day)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .expect("valid timestamp")
        };
        EventDetails {
            name: name.to_string(),
            description: None,
            begin_enrollment_date_time: at(1),
            close_enrollment_date_time: at(2),
            begin_event_date_time: at(3),
            end_event_date_time: at(4),
            location: None,
            base_price,
            max_price: 0,
            limit_of_enrollment: 10,
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repo = InMemoryEventRepository::new();

        let first = repo.save(NewEvent::draft(details("a", 0))).await.unwrap();
        let second = repo.save(NewEvent::draft(details("b", 0))).await.unwrap();

        assert_eq!(first.id, EventId::new(1));
        assert_eq!(second.id, EventId::new(2));
        assert_eq!(first.event_status, EventStatus::Draft);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn concurrent_saves_get_distinct_ids() {
        let repo = Arc::new(InMemoryEventRepository::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.save(NewEvent::draft(details(&format!("event {i}"), 0)))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 50);
        assert_eq!(repo.count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown() {
        let repo = InMemoryEventRepository::new();
        assert_eq!(repo.find_by_id(EventId::new(99)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_replaces_stored_event() {
        let repo = InMemoryEventRepository::new();
        let mut event = repo.save(NewEvent::draft(details("before", 0))).await.unwrap();

        event.apply(details("after", 500));
        repo.update(event.clone()).await.unwrap();

        let stored = repo.find_by_id(event.id).await.unwrap().unwrap();
        assert_eq!(stored.details.name, "after");
        assert!(!stored.is_free());
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let repo = InMemoryEventRepository::new();
        let ghost = NewEvent::draft(details("ghost", 0)).into_event(EventId::new(42));

        assert_eq!(
            repo.update(ghost).await,
            Err(RepositoryError::NotFound(EventId::new(42)))
        );
    }

    #[tokio::test]
    async fn find_all_pages_in_id_order() {
        let repo = InMemoryEventRepository::new();
        for i in 0..25 {
            repo.save(NewEvent::draft(details(&format!("event {i:02}"), i)))
                .await
                .unwrap();
        }

        let page = repo
            .find_all(PageRequest::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages(), 3);
        let ids: Vec<i64> = page.content.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn find_all_sorts_descending() {
        let repo = InMemoryEventRepository::new();
        for (name, price) in [("b", 300), ("a", 100), ("c", 200)] {
            repo.save(NewEvent::draft(details(name, price))).await.unwrap();
        }

        let request = PageRequest::new(0, 10)
            .unwrap()
            .with_sort(Sort::new(SortProperty::BasePrice, Direction::Desc));
        let page = repo.find_all(request).await.unwrap();

        let names: Vec<&str> = page.content.iter().map(|e| e.details.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn page_past_end_is_empty() {
        let repo = InMemoryEventRepository::new();
        repo.save(NewEvent::draft(details("only", 0))).await.unwrap();

        let page = repo
            .find_all(PageRequest::new(5, 10).unwrap())
            .await
            .unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 1);
    }
}
