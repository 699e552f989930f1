use serde::{Deserialize, Serialize};
use crate::models::domain::Notification;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}

/// Notifications delivered to one volunteer, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    #[serde(rename = "volunteerId")]
    pub volunteer_id: String,
    pub notifications: Vec<Notification>,
    pub count: usize,
}
