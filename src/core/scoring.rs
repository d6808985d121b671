use crate::models::{ScoringWeights, UserProfile};
use std::collections::HashSet;

/// Calculate a compatibility score (0-100) between two profiles
///
/// Scoring formula:
/// score = round(
///     jaccard(interests) * 85 +    # Shared interests
///     department_bonus             # 15 same department, 5 otherwise
/// ) capped at 100
pub fn calculate_compatibility_score(a: &UserProfile, b: &UserProfile, weights: &ScoringWeights) -> u8 {
    let interest_component = jaccard_similarity(&a.interests, &b.interests) * weights.interests;
    let department_component = department_bonus(&a.department, &b.department, weights);

    let total = (interest_component + department_component).round();
    total.clamp(0.0, 100.0) as u8
}

/// Jaccard similarity of two interest lists, treating each as a set
///
/// The union size is floored at 1 so two empty lists score 0.
pub fn jaccard_similarity(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count().max(1);

    intersection as f64 / union as f64
}

/// Department affinity points
#[inline]
pub fn department_bonus(a: &str, b: &str, weights: &ScoringWeights) -> f64 {
    if a == b {
        weights.same_department
    } else {
        weights.cross_department
    }
}
