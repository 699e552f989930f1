// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{matched_skills, matches_availability, matches_location, matches_preference};
pub use matcher::{Matcher, DEFAULT_MIN_SCORE};
pub use scoring::{calculate_match_score, ScoreBreakdown};
