use std::sync::Arc;
use thiserror::Error;

use crate::core::Matcher;
use crate::models::{MatchResult, NewNotification};
use crate::services::store::{MatchStore, StoreError};

/// Errors returned by a match request
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Volunteer not found: {0}")]
    VolunteerNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Runs a match request against a store
///
/// Looks up the volunteer, scores the whole catalog and notifies the
/// volunteer about their best match.
#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn MatchStore>,
    matcher: Matcher,
}

impl MatchService {
    pub fn new(store: Arc<dyn MatchStore>, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    pub fn store(&self) -> &Arc<dyn MatchStore> {
        &self.store
    }

    /// Match a volunteer against the event catalog
    ///
    /// Unknown volunteers produce `MatchError::VolunteerNotFound` without
    /// touching the notification store. A failed notification append is
    /// logged and does not fail the request.
    pub async fn handle_match_request(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let volunteer = self
            .store
            .find_volunteer(volunteer_id)
            .await?
            .ok_or_else(|| MatchError::VolunteerNotFound(volunteer_id.to_string()))?;

        let events = self.store.list_events().await?;

        tracing::debug!(
            "Scoring {} events for volunteer {}",
            events.len(),
            volunteer_id
        );

        let matches = self.matcher.compute_matches(&volunteer, &events);

        if let Some(top) = matches.first() {
            let notification = NewNotification::matched(&volunteer.id, &top.event);
            match self.store.append_notification(notification).await {
                Ok(stored) => tracing::debug!(
                    "Notified volunteer {} about event {} ({})",
                    volunteer.id,
                    top.event.id,
                    stored.id
                ),
                Err(e) => tracing::warn!(
                    "Failed to record match notification for {}, continuing: {}",
                    volunteer.id,
                    e
                ),
            }
        }

        tracing::info!(
            "Returning {} matches for volunteer {} (from {} events)",
            matches.len(),
            volunteer_id,
            events.len()
        );

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Event, Notification, Volunteer};
    use crate::services::memory::InMemoryStore;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    fn create_volunteer() -> Volunteer {
        Volunteer {
            id: "1".to_string(),
            name: "Alex".to_string(),
            location: "Houston".to_string(),
            skills: ["first aid", "cooking"].iter().map(|s| s.to_string()).collect(),
            preferences: ["outdoors"].iter().map(|s| s.to_string()).collect(),
            availability: Availability {
                start: Utc.with_ymd_and_hms(2025, 7, 15, 0, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2025, 7, 20, 23, 59, 59).unwrap(),
            },
        }
    }

    fn create_event(id: &str, title: &str, location: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            location: location.to_string(),
            required_skills: vec!["cooking".to_string()],
            preference_tag: "outdoors".to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 7, 17, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 7, 17, 18, 0, 0).unwrap(),
        }
    }

    /// Store whose notification sink is always down
    struct BrokenSink(InMemoryStore);

    #[async_trait]
    impl MatchStore for BrokenSink {
        fn backend_tag(&self) -> &'static str {
            "broken"
        }

        async fn find_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError> {
            self.0.find_volunteer(id).await
        }

        async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
            self.0.list_events().await
        }

        async fn append_notification(
            &self,
            _notification: NewNotification,
        ) -> Result<Notification, StoreError> {
            Err(StoreError::Unavailable("sink offline".to_string()))
        }

        async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<(), StoreError> {
            self.0.upsert_volunteer(volunteer).await
        }

        async fn upsert_event(&self, event: Event) -> Result<(), StoreError> {
            self.0.upsert_event(event).await
        }

        async fn list_notifications(
            &self,
            volunteer_id: &str,
        ) -> Result<Vec<Notification>, StoreError> {
            self.0.list_notifications(volunteer_id).await
        }
    }

    #[tokio::test]
    async fn test_top_match_notified_once() {
        let store = Arc::new(InMemoryStore::with_data(
            vec![create_volunteer()],
            vec![
                create_event("1", "Soup Kitchen", "Dallas"),
                create_event("2", "Food Drive", "Houston"),
            ],
        ));
        let service = MatchService::new(store.clone(), Matcher::default());

        let matches = service.handle_match_request("1").await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].event.title, "Food Drive");

        let notifications = store.list_notifications("1").await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "You've been matched to Food Drive!");
    }

    #[tokio::test]
    async fn test_unknown_volunteer_has_no_side_effects() {
        let store = Arc::new(InMemoryStore::with_data(
            vec![create_volunteer()],
            vec![create_event("1", "Food Drive", "Houston")],
        ));
        let service = MatchService::new(store.clone(), Matcher::default());

        let result = service.handle_match_request("404").await;

        assert!(matches!(result, Err(MatchError::VolunteerNotFound(id)) if id == "404"));
        assert_eq!(store.notification_count().await, 0);
    }

    #[tokio::test]
    async fn test_empty_catalog_no_notification() {
        let store = Arc::new(InMemoryStore::with_data(vec![create_volunteer()], vec![]));
        let service = MatchService::new(store.clone(), Matcher::default());

        let matches = service.handle_match_request("1").await.unwrap();

        assert!(matches.is_empty());
        assert_eq!(store.notification_count().await, 0);
    }

    #[tokio::test]
    async fn test_notification_failure_is_not_fatal() {
        let store = Arc::new(BrokenSink(InMemoryStore::with_data(
            vec![create_volunteer()],
            vec![create_event("1", "Food Drive", "Houston")],
        )));
        let service = MatchService::new(store, Matcher::default());

        let matches = service.handle_match_request("1").await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_score, 4);
    }
}
