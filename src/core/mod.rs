// Core algorithm exports
pub mod matcher;
pub mod scoring;

pub use matcher::{Matcher, MatchResult, DEFAULT_MATCH_THRESHOLD};
pub use scoring::{calculate_compatibility_score, department_bonus, jaccard_similarity};
