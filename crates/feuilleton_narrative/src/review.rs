//! Parsing of self-review replies.

use crate::extract_json_object;
use serde_json::Value;

/// Feedback recorded when the review omitted it.
pub const MISSING_FEEDBACK: &str = "No feedback provided.";

/// Feedback recorded when the review could not be parsed at all.
pub const INVALID_REVIEW_FEEDBACK: &str =
    "The review was not valid JSON. Respond with a JSON object containing score and feedback.";

/// A parsed review.
///
/// Parsing never fails: malformed replies score 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Score clamped to 0..=100
    pub score: i32,
    /// Revision feedback
    pub feedback: String,
    /// Parsed payload, or the raw reply as a string when it was not JSON
    pub raw: Value,
}

impl Review {
    /// Parse a review reply.
    ///
    /// # Examples
    ///
    /// ```
    /// use feuilleton_narrative::Review;
    ///
    /// let review = Review::parse(r#"{"score": "88", "feedback": "Cut the prologue."}"#);
    /// assert_eq!(review.score, 88);
    /// assert_eq!(review.feedback, "Cut the prologue.");
    ///
    /// let broken = Review::parse("I liked it!");
    /// assert_eq!(broken.score, 0);
    /// ```
    pub fn parse(reply: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(reply)
            .ok()
            .filter(Value::is_object)
            .or_else(|| {
                extract_json_object(reply)
                    .and_then(|json| serde_json::from_str::<Value>(&json).ok())
                    .filter(Value::is_object)
            });

        match parsed {
            Some(raw) => {
                let score = coerce_score(raw.get("score"));
                let feedback = match raw.get("feedback") {
                    Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
                    None | Some(Value::Null) | Some(Value::String(_)) => {
                        MISSING_FEEDBACK.to_string()
                    }
                    Some(other) => other.to_string(),
                };
                Self {
                    score,
                    feedback,
                    raw,
                }
            }
            None => {
                tracing::warn!(reply_length = reply.len(), "Review reply was not JSON");
                Self {
                    score: 0,
                    feedback: INVALID_REVIEW_FEEDBACK.to_string(),
                    raw: Value::String(reply.to_string()),
                }
            }
        }
    }
}

/// Integer score from a number or numeric string; 0 otherwise.
fn coerce_score(value: Option<&Value>) -> i32 {
    let score = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    };
    score.map(|s| s.clamp(0, 100) as i32).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fractional_score_truncates() {
        assert_eq!(Review::parse(r#"{"score": 91.7, "feedback": "x"}"#).score, 91);
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        assert_eq!(Review::parse(r#"{"score": 140}"#).score, 100);
        assert_eq!(Review::parse(r#"{"score": -3}"#).score, 0);
    }

    #[test]
    fn test_missing_or_malformed_score_is_zero() {
        assert_eq!(Review::parse(r#"{"feedback": "x"}"#).score, 0);
        assert_eq!(Review::parse(r#"{"score": "great"}"#).score, 0);
        assert_eq!(Review::parse(r#"{"score": [90]}"#).score, 0);
    }

    #[test]
    fn test_missing_feedback_uses_placeholder() {
        let review = Review::parse(r#"{"score": 80}"#);
        assert_eq!(review.feedback, MISSING_FEEDBACK);
        assert_eq!(review.raw, json!({"score": 80}));
    }

    #[test]
    fn test_object_embedded_in_prose_is_found() {
        let review = Review::parse("Verdict: {\"score\": 77, \"feedback\": \"more tension\"}");
        assert_eq!(review.score, 77);
        assert_eq!(review.feedback, "more tension");
    }

    #[test]
    fn test_non_object_json_is_invalid() {
        let review = Review::parse("[1, 2, 3]");
        assert_eq!(review.score, 0);
        assert_eq!(review.feedback, INVALID_REVIEW_FEEDBACK);
        assert_eq!(review.raw, Value::String("[1, 2, 3]".to_string()));
    }
}
