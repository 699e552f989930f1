use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::domain::{Availability, Event, Volunteer};

/// Reasons an incoming volunteer or event record is rejected
#[derive(Debug, Error)]
pub enum MalformedInput {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid timestamp for {field}: {value:?} ({source})")]
    Timestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{field} ends before it starts")]
    InvertedWindow { field: &'static str },

    #[error("{field} must not be blank")]
    BlankField { field: &'static str },

    #[error("{field} contains a blank label")]
    BlankLabel { field: &'static str },
}

/// Availability window as submitted, timestamps still in RFC 3339 text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub start: String,
    pub end: String,
}

/// Volunteer as submitted by the profile form or the seed file
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VolunteerRecord {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    pub availability: AvailabilityRecord,
}

/// Event as submitted by the admin event form or the seed file
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventRecord {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    #[validate(length(min = 1))]
    #[serde(rename = "preferenceTag")]
    pub preference_tag: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

impl TryFrom<VolunteerRecord> for Volunteer {
    type Error = MalformedInput;

    fn try_from(record: VolunteerRecord) -> Result<Self, Self::Error> {
        record.validate()?;

        let start = parse_timestamp("availability.start", &record.availability.start)?;
        let end = parse_timestamp("availability.end", &record.availability.end)?;
        if end < start {
            return Err(MalformedInput::InvertedWindow { field: "availability" });
        }

        Ok(Volunteer {
            id: required("id", &record.id)?,
            name: required("name", &record.name)?,
            location: required("location", &record.location)?,
            skills: clean_labels("skills", record.skills)?.into_iter().collect(),
            preferences: clean_labels("preferences", record.preferences)?
                .into_iter()
                .collect(),
            availability: Availability { start, end },
        })
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = MalformedInput;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        record.validate()?;

        let start_time = parse_timestamp("startTime", &record.start_time)?;
        let end_time = parse_timestamp("endTime", &record.end_time)?;
        if end_time < start_time {
            return Err(MalformedInput::InvertedWindow { field: "event" });
        }

        let mut required_skills = Vec::with_capacity(record.required_skills.len());
        for skill in clean_labels("requiredSkills", record.required_skills)? {
            if !required_skills.contains(&skill) {
                required_skills.push(skill);
            }
        }

        Ok(Event {
            id: required("id", &record.id)?,
            title: required("title", &record.title)?,
            description: record.description.filter(|d| !d.trim().is_empty()),
            location: required("location", &record.location)?,
            required_skills,
            preference_tag: required("preferenceTag", &record.preference_tag)?,
            start_time,
            end_time,
        })
    }
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, MalformedInput> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| MalformedInput::Timestamp {
            field,
            value: value.to_string(),
            source,
        })
}

/// Trim a required text field, rejecting it when nothing is left
fn required(field: &'static str, value: &str) -> Result<String, MalformedInput> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(MalformedInput::BlankField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trim every label, rejecting any that end up empty
fn clean_labels(field: &'static str, labels: Vec<String>) -> Result<Vec<String>, MalformedInput> {
    labels
        .into_iter()
        .map(|label| {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                Err(MalformedInput::BlankLabel { field })
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

/// Accept identifiers written either as JSON strings or as integers
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
