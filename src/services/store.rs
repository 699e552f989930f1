use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Event, NewNotification, Notification, Volunteer};

/// Errors that can occur when reading or writing a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction the matching service is built on
///
/// Volunteers and events are owned by the rest of the application; the
/// matcher only reads them and appends notifications.
#[async_trait]
pub trait MatchStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn find_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError>;

    /// Full event catalog in insertion order
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    async fn append_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StoreError>;

    async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<(), StoreError>;

    /// Insert an event, or replace the one with the same id in place
    async fn upsert_event(&self, event: Event) -> Result<(), StoreError>;

    /// Notifications for a volunteer, newest first
    async fn list_notifications(&self, volunteer_id: &str)
        -> Result<Vec<Notification>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
