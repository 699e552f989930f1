use crate::models::{Event, Volunteer};
use crate::core::filters::{matched_skills, matches_availability, matches_location, matches_preference};

/// The four independent contributions to an event's match score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub location: u32,
    pub availability: u32,
    pub matched_skills: Vec<String>,
    pub preference: u32,
}

impl ScoreBreakdown {
    /// Additive match score; every matched skill counts once
    pub fn total(&self) -> u32 {
        self.location + self.availability + self.matched_skills.len() as u32 + self.preference
    }
}

/// Score one event for a volunteer
///
/// Scoring formula:
/// score = (
///     location        # 1 if the event is in the volunteer's location
///   + availability    # 1 if the availability window covers the event
///   + skills          # 1 per required skill the volunteer has
///   + preference      # 1 if the event's tag is a volunteer preference
/// )
pub fn calculate_match_score(volunteer: &Volunteer, event: &Event) -> ScoreBreakdown {
    ScoreBreakdown {
        location: matches_location(volunteer, event) as u32,
        availability: matches_availability(volunteer, event) as u32,
        matched_skills: matched_skills(volunteer, event),
        preference: matches_preference(volunteer, event) as u32,
    }
}
