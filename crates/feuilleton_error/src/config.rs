//! Configuration errors.

use std::fmt::Display;
use std::path::Path;

/// Settings that could not be loaded or do not make sense.
///
/// Raised for the layered `feuilleton.toml` lookup, out-of-range
/// `[generation]` values, and unusable command-line input such as a prompt
/// file that cannot be read.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Description of what went wrong
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use feuilleton_error::ConfigError;
    ///
    /// let err = ConfigError::new("Invalid [generation] section: min_score must be 0-100");
    /// assert!(err.message.starts_with("Invalid [generation]"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A file the user pointed at could not be read.
    ///
    /// ```
    /// use feuilleton_error::ConfigError;
    ///
    /// let err = ConfigError::unreadable("prompts/write.txt", "No such file or directory");
    /// assert_eq!(err.message, "Failed to read prompts/write.txt: No such file or directory");
    /// ```
    #[track_caller]
    pub fn unreadable(path: impl AsRef<Path>, reason: impl Display) -> Self {
        Self::new(format!(
            "Failed to read {}: {}",
            path.as_ref().display(),
            reason
        ))
    }
}
