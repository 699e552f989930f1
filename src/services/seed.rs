use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::{Event, EventRecord, MalformedInput, Volunteer, VolunteerRecord};
use crate::services::store::{MatchStore, StoreError};

/// Errors that can occur while loading seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed {kind} #{index} in seed file: {source}")]
    Malformed {
        kind: &'static str,
        index: usize,
        #[source]
        source: MalformedInput,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Layout of a seed file
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub volunteers: Vec<VolunteerRecord>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// How many records a seed load wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub volunteers: usize,
    pub events: usize,
}

/// Validate every record, then write them to the store in file order
///
/// Nothing is written if any record is malformed.
pub async fn apply_seed(data: SeedData, store: &dyn MatchStore) -> Result<SeedSummary, SeedError> {
    let volunteers = data
        .volunteers
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Volunteer::try_from(record).map_err(|source| SeedError::Malformed {
                kind: "volunteer",
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let events = data
        .events
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Event::try_from(record).map_err(|source| SeedError::Malformed {
                kind: "event",
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let summary = SeedSummary {
        volunteers: volunteers.len(),
        events: events.len(),
    };

    for volunteer in volunteers {
        store.upsert_volunteer(volunteer).await?;
    }
    for event in events {
        store.upsert_event(event).await?;
    }

    Ok(summary)
}

/// Load a JSON seed file into the store
pub async fn load_seed<P: AsRef<Path>>(
    path: P,
    store: &dyn MatchStore,
) -> Result<SeedSummary, SeedError> {
    let raw = tokio::fs::read_to_string(path.as_ref()).await?;
    let data: SeedData = serde_json::from_str(&raw)?;

    let summary = apply_seed(data, store).await?;

    tracing::info!(
        "Loaded seed data from {}: {} volunteers, {} events",
        path.as_ref().display(),
        summary.volunteers,
        summary.events
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::InMemoryStore;
    use serde_json::json;

    fn seed_json() -> serde_json::Value {
        json!({
            "volunteers": [{
                "id": "1",
                "name": "Alex",
                "location": "Houston",
                "skills": ["first aid", "cooking"],
                "preferences": ["outdoors"],
                "availability": {"start": "2025-07-15T00:00:00Z", "end": "2025-07-20T23:59:59Z"}
            }],
            "events": [{
                "id": 101,
                "title": "Food Drive",
                "location": "Houston",
                "requiredSkills": ["cooking"],
                "preferenceTag": "outdoors",
                "startTime": "2025-07-17T10:00:00Z",
                "endTime": "2025-07-17T18:00:00Z"
            }]
        })
    }

    #[tokio::test]
    async fn test_apply_seed_populates_store() {
        let store = InMemoryStore::new();
        let data: SeedData = serde_json::from_value(seed_json()).unwrap();

        let summary = apply_seed(data, &store).await.unwrap();

        assert_eq!(summary, SeedSummary { volunteers: 1, events: 1 });
        assert!(store.find_volunteer("1").await.unwrap().is_some());
        assert_eq!(store.list_events().await.unwrap()[0].id, "101");
    }

    #[tokio::test]
    async fn test_malformed_record_aborts_load() {
        let store = InMemoryStore::new();
        let mut value = seed_json();
        value["events"][0]["endTime"] = json!("not a time");
        let data: SeedData = serde_json::from_value(value).unwrap();

        match apply_seed(data, &store).await {
            Err(SeedError::Malformed { kind, index, .. }) => {
                assert_eq!(kind, "event");
                assert_eq!(index, 0);
            }
            other => panic!("expected malformed seed error, got {:?}", other),
        }
        assert!(store.find_volunteer("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_seed_missing_file() {
        let store = InMemoryStore::new();
        let result = load_seed("does/not/exist.json", &store).await;
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
