use crate::core::scoring::calculate_compatibility_score;
use crate::models::{ScoringWeights, UserProfile};

/// Default score at or above which a pair counts as matched
pub const DEFAULT_MATCH_THRESHOLD: u8 = 55;

/// Outcome of scoring one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub score: u8,
    pub matched: bool,
}

/// Scores pairs of profiles and applies the match threshold
///
/// The scorer itself is pure; the threshold is policy owned by whoever
/// constructs the matcher.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    threshold: u8,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, threshold: u8) -> Self {
        Self { weights, threshold }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MATCH_THRESHOLD)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Score `me` against `candidate`
    pub fn score(&self, me: &UserProfile, candidate: &UserProfile) -> MatchResult {
        let score = calculate_compatibility_score(me, candidate, &self.weights);
        MatchResult {
            score,
            matched: score >= self.threshold,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let matcher = Matcher::with_default_weights();

        // 3 of 5 shared: 0.6 * 85 + 5 = 56
        let me = UserProfile::new(["a", "b", "c", "d"], "ops");
        let candidate = UserProfile::new(["a", "b", "c", "e"], "sales");
        let result = matcher.score(&me, &candidate);
        assert_eq!(result.score, 56);
        assert!(result.matched);

        // 1 of 2 shared: 0.5 * 85 + 5 = 47.5 -> 48
        let candidate = UserProfile::new(["a", "x"], "sales");
        let me = UserProfile::new(["a"], "ops");
        assert!(!matcher.score(&me, &candidate).matched);
    }

    #[test]
    fn test_custom_threshold() {
        let matcher = Matcher::new(ScoringWeights::default(), 10);
        let lonely = UserProfile::new(Vec::<String>::new(), "ops");
        assert!(matcher.score(&lonely, &lonely).matched);
    }
}
