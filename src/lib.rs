//! Volunteer Match - event matching service for the volunteer management app
//!
//! This library scores the event catalog for a volunteer (location,
//! availability, shared skills and preference tag), keeps the events that
//! clear the threshold and notifies the volunteer about their best match.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, Matcher};
pub use models::{Event, MatchResult, Notification, Volunteer};
pub use services::{InMemoryStore, MatchError, MatchService, MatchStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.min_score(), 2);
    }
}
