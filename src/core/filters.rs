use crate::models::{Event, Volunteer};

/// Check whether the event happens in the volunteer's home location
///
/// Locations are compared as exact strings.
#[inline]
pub fn matches_location(volunteer: &Volunteer, event: &Event) -> bool {
    event.location == volunteer.location
}

/// Check whether the volunteer's availability window fully covers the event
#[inline]
pub fn matches_availability(volunteer: &Volunteer, event: &Event) -> bool {
    volunteer
        .availability
        .covers(event.start_time, event.end_time)
}

/// Check whether the event's preference tag is one the volunteer likes
#[inline]
pub fn matches_preference(volunteer: &Volunteer, event: &Event) -> bool {
    volunteer.prefers(&event.preference_tag)
}

/// Required skills of the event that the volunteer has
///
/// Order follows `event.required_skills`; a skill listed twice is kept once.
pub fn matched_skills(volunteer: &Volunteer, event: &Event) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();

    for skill in &event.required_skills {
        if volunteer.has_skill(skill) && !matched.contains(skill) {
            matched.push(skill.clone());
        }
    }

    matched
}
