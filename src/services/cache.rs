use async_trait::async_trait;
use moka::future::{Cache, CacheBuilder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::models::{Event, NewNotification, Notification, Volunteer};
use crate::services::store::{MatchStore, StoreError};

/// Read-through cache in front of another store
///
/// Volunteer lookups and the event catalog are served from in-memory moka
/// caches until their TTL expires or the matching upsert invalidates them.
/// Notifications always go straight to the inner store.
///
/// Each cache carries a write generation. A miss only keeps the value it
/// read if no upsert went through while it was reading.
pub struct CachedStore<S> {
    inner: S,
    volunteers: Cache<String, Volunteer>,
    volunteer_generation: AtomicU64,
    catalog: Cache<String, Arc<Vec<Event>>>,
    catalog_generation: AtomicU64,
}

impl<S: MatchStore> CachedStore<S> {
    /// Wrap `inner` with caches holding up to `capacity` volunteers
    pub fn new(inner: S, capacity: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);

        Self {
            inner,
            volunteers: CacheBuilder::new(capacity).time_to_live(ttl).build(),
            volunteer_generation: AtomicU64::new(0),
            catalog: CacheBuilder::new(1).time_to_live(ttl).build(),
            catalog_generation: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: MatchStore> MatchStore for CachedStore<S> {
    fn backend_tag(&self) -> &'static str {
        self.inner.backend_tag()
    }

    async fn find_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError> {
        let key = CacheKey::volunteer(id);
        if let Some(volunteer) = self.volunteers.get(&key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(Some(volunteer));
        }

        tracing::trace!("Cache miss: {}", key);
        let generation = self.volunteer_generation.load(Ordering::SeqCst);
        let volunteer = self.inner.find_volunteer(id).await?;
        // Misses are not cached so a volunteer created elsewhere shows up immediately
        if let Some(found) = &volunteer {
            self.volunteers.insert(key.clone(), found.clone()).await;
            // An upsert that landed during the read may have been overwritten
            if self.volunteer_generation.load(Ordering::SeqCst) != generation {
                self.volunteers.invalidate(&key).await;
            }
        }
        Ok(volunteer)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let key = CacheKey::catalog();
        if let Some(events) = self.catalog.get(&key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(events.as_ref().clone());
        }

        tracing::trace!("Cache miss: {}", key);
        let generation = self.catalog_generation.load(Ordering::SeqCst);
        let events = self.inner.list_events().await?;
        self.catalog.insert(key.clone(), Arc::new(events.clone())).await;
        if self.catalog_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Event catalog changed during read, dropping cached copy");
            self.catalog.invalidate(&key).await;
        }
        Ok(events)
    }

    async fn append_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StoreError> {
        self.inner.append_notification(notification).await
    }

    async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<(), StoreError> {
        let key = CacheKey::volunteer(&volunteer.id);
        self.inner.upsert_volunteer(volunteer).await?;
        self.volunteer_generation.fetch_add(1, Ordering::SeqCst);
        self.volunteers.invalidate(&key).await;
        Ok(())
    }

    async fn upsert_event(&self, event: Event) -> Result<(), StoreError> {
        self.inner.upsert_event(event).await?;
        self.catalog_generation.fetch_add(1, Ordering::SeqCst);
        self.catalog.invalidate(&CacheKey::catalog()).await;
        tracing::debug!("Invalidated event catalog cache");
        Ok(())
    }

    async fn list_notifications(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<Notification>, StoreError> {
        self.inner.list_notifications(volunteer_id).await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.inner.health_check().await
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a volunteer profile
    pub fn volunteer(volunteer_id: &str) -> String {
        format!("volunteer:{}", volunteer_id)
    }

    /// Build the cache key for the event catalog
    pub fn catalog() -> String {
        "events:catalog".to_string()
    }
}
