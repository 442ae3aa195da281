//! Best-candidate tracking within one run.

/// A reviewed candidate chapter.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Candidate {
    /// Review score
    score: i32,
    /// Candidate text
    content: String,
    /// Review feedback
    feedback: String,
}

impl Candidate {
    /// Create a candidate.
    pub fn new(score: i32, content: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            score,
            content: content.into(),
            feedback: feedback.into(),
        }
    }
}

/// Keeps the highest-scoring candidate seen so far.
///
/// A later candidate replaces the current best only with a strictly higher
/// score, so on ties the earliest candidate wins.
///
/// # Examples
///
/// ```
/// use feuilleton_narrative::{Candidate, CandidateTracker};
///
/// let mut tracker = CandidateTracker::new();
/// assert!(tracker.consider(Candidate::new(70, "first", "ok")));
/// assert!(!tracker.consider(Candidate::new(70, "second", "ok")));
/// assert_eq!(tracker.best().map(|c| c.content().as_str()), Some("first"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CandidateTracker {
    best: Option<Candidate>,
}

impl CandidateTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate. Returns true when it became the new best.
    pub fn consider(&mut self, candidate: Candidate) -> bool {
        let replace = self
            .best
            .as_ref()
            .is_none_or(|best| candidate.score > best.score);
        if replace {
            self.best = Some(candidate);
        }
        replace
    }

    /// The current best candidate.
    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Score of the current best candidate.
    pub fn best_score(&self) -> Option<i32> {
        self.best.as_ref().map(|c| c.score)
    }

    /// Consume the tracker, returning the best candidate.
    pub fn into_best(self) -> Option<Candidate> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_is_running_maximum() {
        let mut tracker = CandidateTracker::new();
        for (i, score) in [40, 85, 60, 85, 90, 10].into_iter().enumerate() {
            tracker.consider(Candidate::new(score, format!("draft {i}"), ""));
        }
        let best = tracker.into_best().unwrap();
        assert_eq!(*best.score(), 90);
        assert_eq!(best.content(), "draft 4");
    }

    #[test]
    fn test_first_candidate_is_taken_even_at_zero() {
        let mut tracker = CandidateTracker::new();
        assert!(tracker.consider(Candidate::new(0, "only", "")));
        assert_eq!(tracker.best_score(), Some(0));
    }
}
