use crate::models::{Event, MatchResult, Volunteer};
use crate::core::scoring::calculate_match_score;

/// Events must score strictly above this to be returned
pub const DEFAULT_MIN_SCORE: u32 = 2;

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Score every event in the catalog
/// 2. Drop events at or below the minimum score
/// 3. Stable sort by score, highest first
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    min_score: u32,
}

impl Matcher {
    pub fn new(min_score: u32) -> Self {
        Self { min_score }
    }

    pub fn with_default_threshold() -> Self {
        Self::new(DEFAULT_MIN_SCORE)
    }

    pub fn min_score(&self) -> u32 {
        self.min_score
    }

    /// Find the events worth suggesting to a volunteer
    ///
    /// # Arguments
    /// * `volunteer` - The volunteer being matched
    /// * `events` - The full event catalog, in catalog order
    ///
    /// # Returns
    /// Events scoring above the threshold, highest score first. Events with
    /// equal scores keep their catalog order.
    pub fn compute_matches(&self, volunteer: &Volunteer, events: &[Event]) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = events
            .iter()
            .filter_map(|event| {
                let breakdown = calculate_match_score(volunteer, event);
                let score = breakdown.total();

                if score > self.min_score {
                    Some(MatchResult {
                        event: event.clone(),
                        match_score: score,
                        matched_skills: breakdown.matched_skills,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, ties stay in catalog order
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_threshold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;
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

    fn create_event(id: &str, location: &str, skills: &[&str], tag: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            description: None,
            location: location.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            preference_tag: tag.to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 7, 17, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 7, 17, 18, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_compute_matches_basic() {
        let matcher = Matcher::default();
        let volunteer = create_volunteer();

        let events = vec![
            create_event("101", "Houston", &["cooking"], "outdoors"),
            create_event("102", "Dallas", &["first aid"], "indoors"),
        ];

        let result = matcher.compute_matches(&volunteer, &events);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].event.id, "101");
        assert_eq!(result[0].match_score, 4);
        assert_eq!(result[0].matched_skills, vec!["cooking"]);
    }

    #[test]
    fn test_matches_sorted_by_score() {
        let matcher = Matcher::default();
        let volunteer = create_volunteer();

        let events = vec![
            create_event("a", "Houston", &[], "outdoors"),
            create_event("b", "Houston", &["cooking", "first aid"], "outdoors"),
            create_event("c", "Houston", &["cooking"], "outdoors"),
        ];

        let result = matcher.compute_matches(&volunteer, &events);
        let ids: Vec<&str> = result.iter().map(|m| m.event.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(result[0].match_score, 5);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let matcher = Matcher::default();
        let volunteer = create_volunteer();

        let events = vec![
            create_event("x", "Houston", &["cooking"], "indoors"),
            create_event("y", "Houston", &[], "outdoors"),
            create_event("z", "Dallas", &["cooking"], "outdoors"),
        ];

        let result = matcher.compute_matches(&volunteer, &events);
        let ids: Vec<&str> = result.iter().map(|m| m.event.id.as_str()).collect();

        assert_eq!(ids, vec!["x", "y", "z"]);
        assert!(result.iter().all(|m| m.match_score == 3));
    }

    #[test]
    fn test_empty_catalog() {
        let matcher = Matcher::default();
        let result = matcher.compute_matches(&create_volunteer(), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let matcher = Matcher::new(3);
        let volunteer = create_volunteer();

        let events = vec![
            create_event("101", "Houston", &["cooking"], "outdoors"),
            create_event("103", "Houston", &[], "outdoors"),
        ];

        let result = matcher.compute_matches(&volunteer, &events);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].event.id, "101");
    }
}
