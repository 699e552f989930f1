use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{Event, NewNotification, Notification, Volunteer};
use crate::services::store::{MatchStore, StoreError};

/// Process-local store, used for development, seeded demos and tests
#[derive(Default)]
pub struct InMemoryStore {
    volunteers: RwLock<HashMap<String, Volunteer>>,
    events: RwLock<Vec<Event>>,
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store already holding the given volunteers and events
    pub fn with_data(volunteers: Vec<Volunteer>, events: Vec<Event>) -> Self {
        Self {
            volunteers: RwLock::new(
                volunteers
                    .into_iter()
                    .map(|volunteer| (volunteer.id.clone(), volunteer))
                    .collect(),
            ),
            events: RwLock::new(events),
            notifications: RwLock::new(Vec::new()),
        }
    }

    /// Number of notifications stored for every volunteer
    pub async fn notification_count(&self) -> usize {
        self.notifications.read().await.len()
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn find_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError> {
        Ok(self.volunteers.read().await.get(id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.events.read().await.clone())
    }

    async fn append_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StoreError> {
        let stored = notification.into_notification();
        self.notifications.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<(), StoreError> {
        self.volunteers
            .write()
            .await
            .insert(volunteer.id.clone(), volunteer);
        Ok(())
    }

    async fn upsert_event(&self, event: Event) -> Result<(), StoreError> {
        let mut events = self.events.write().await;
        match events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
        Ok(())
    }

    async fn list_notifications(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<Notification>, StoreError> {
        // Appended in time order, so reversing gives newest first
        Ok(self
            .notifications
            .read()
            .await
            .iter()
            .rev()
            .filter(|notification| notification.volunteer_id == volunteer_id)
            .cloned()
            .collect())
    }
}
