use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Time window during which a volunteer can take part in events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Availability {
    /// True when the window fully covers `[start, end]`
    #[inline]
    pub fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= start && self.end >= end
    }
}

/// Volunteer profile as read by the matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub preferences: BTreeSet<String>,
    pub availability: Availability,
}

impl Volunteer {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    pub fn prefers(&self, tag: &str) -> bool {
        self.preferences.contains(tag)
    }
}

/// Event in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    #[serde(rename = "preferenceTag")]
    pub preference_tag: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
}

/// Event augmented with its score for one volunteer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "matchedSkills")]
    pub matched_skills: Vec<String>,
}

/// Notification as stored, with identifier and timestamp assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: uuid::Uuid,
    #[serde(rename = "volunteerId")]
    pub volunteer_id: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Notification waiting to be appended to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub volunteer_id: String,
    pub message: String,
}

impl NewNotification {
    /// Message sent to a volunteer for their best match
    pub fn matched(volunteer_id: &str, event: &Event) -> Self {
        Self {
            volunteer_id: volunteer_id.to_string(),
            message: format!("You've been matched to {}!", event.title),
        }
    }

    /// Stamp the notification with a fresh identifier and the current time
    pub fn into_notification(self) -> Notification {
        Notification {
            id: uuid::Uuid::new_v4(),
            volunteer_id: self.volunteer_id,
            message: self.message,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_availability_covers_inclusive_bounds() {
        let window = Availability { start: ts(15, 0), end: ts(20, 23) };

        assert!(window.covers(ts(17, 10), ts(17, 18)));
        assert!(window.covers(ts(15, 0), ts(20, 23)));
        assert!(!window.covers(ts(14, 23), ts(17, 18)));
        assert!(!window.covers(ts(20, 10), ts(21, 1)));
    }

    #[test]
    fn test_matched_notification_message() {
        let event = Event {
            id: "101".to_string(),
            title: "Food Drive".to_string(),
            description: None,
            location: "Houston".to_string(),
            required_skills: vec![],
            preference_tag: "outdoors".to_string(),
            start_time: ts(17, 10),
            end_time: ts(17, 18),
        };

        let notification = NewNotification::matched("1", &event);
        assert_eq!(notification.volunteer_id, "1");
        assert_eq!(notification.message, "You've been matched to Food Drive!");
    }

    #[test]
    fn test_match_result_flattens_event_fields() {
        let result = MatchResult {
            event: Event {
                id: "101".to_string(),
                title: "Food Drive".to_string(),
                description: None,
                location: "Houston".to_string(),
                required_skills: vec!["cooking".to_string()],
                preference_tag: "outdoors".to_string(),
                start_time: ts(17, 10),
                end_time: ts(17, 18),
            },
            match_score: 4,
            matched_skills: vec!["cooking".to_string()],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["id"], "101");
        assert_eq!(json["requiredSkills"][0], "cooking");
        assert_eq!(json["matchScore"], 4);
        assert_eq!(json["matchedSkills"][0], "cooking");
        assert!(json.get("event").is_none());
    }
}
