//! Parameters of a generation run.

use feuilleton_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_attempts`.
pub const MAX_ATTEMPTS_LIMIT: u32 = 20;
/// Attempts per run when not configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Acceptance threshold when not configured.
pub const DEFAULT_MIN_SCORE: i32 = 95;
/// Previous chapters fed to the writer when not configured.
pub const DEFAULT_CONTEXT_WINDOW: usize = 3;

/// How hard a run tries and what it accepts.
///
/// # Examples
///
/// ```
/// use feuilleton_core::GenerationConfig;
///
/// let config = GenerationConfig::default().with_max_attempts(5u32).with_min_score(80);
/// assert!(config.validate().is_ok());
/// assert!(config.with_max_attempts(0u32).validate().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct GenerationConfig {
    /// Write/review cycles before giving up (1 to 20)
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    /// Score a candidate needs to be accepted (0 to 100)
    #[serde(default = "default_min_score")]
    min_score: i32,
    /// Number of previous chapters included as context
    #[serde(default = "default_context_window")]
    context_window: usize,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_min_score() -> i32 {
    DEFAULT_MIN_SCORE
}

fn default_context_window() -> usize {
    DEFAULT_CONTEXT_WINDOW
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_score: DEFAULT_MIN_SCORE,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

impl GenerationConfig {
    /// Checks the bounds accepted at the request surface.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::InvalidConfig`] when `max_attempts` is
    /// outside 1..=20 or `min_score` outside 0..=100.
    #[track_caller]
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(1..=MAX_ATTEMPTS_LIMIT).contains(&self.max_attempts) {
            return Err(GenerationError::new(GenerationErrorKind::InvalidConfig(
                format!(
                    "max_attempts must be between 1 and {}, got {}",
                    MAX_ATTEMPTS_LIMIT, self.max_attempts
                ),
            )));
        }
        if !(0..=100).contains(&self.min_score) {
            return Err(GenerationError::new(GenerationErrorKind::InvalidConfig(
                format!("min_score must be between 0 and 100, got {}", self.min_score),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(*config.max_attempts(), 10);
        assert_eq!(*config.min_score(), 95);
        assert_eq!(*config.context_window(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bounds() {
        let config = GenerationConfig::default();
        assert!(config.with_max_attempts(20).validate().is_ok());
        assert!(config.with_max_attempts(21).validate().is_err());
        assert!(config.with_min_score(0).validate().is_ok());
        assert!(config.with_min_score(100).validate().is_ok());
        assert!(config.with_min_score(101).validate().is_err());
        assert!(config.with_min_score(-1).validate().is_err());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: GenerationConfig = serde_json::from_str(r#"{"min_score": 70}"#).unwrap();
        assert_eq!(*config.min_score(), 70);
        assert_eq!(*config.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    }
}
