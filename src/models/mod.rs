// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Availability, Event, MatchResult, NewNotification, Notification, Volunteer};
pub use requests::{AvailabilityRecord, EventRecord, MalformedInput, VolunteerRecord};
pub use responses::{ErrorResponse, HealthResponse, NotificationListResponse};
