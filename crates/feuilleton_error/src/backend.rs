//! Engine-internal errors.

/// Failure inside the generation engine that is neither the model's nor the
/// store's fault, such as an attempt record that cannot be assembled.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", message, line, file)]
pub struct BackendError {
    /// Description of what went wrong
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a BackendError at the current location.
    ///
    /// ```
    /// use feuilleton_error::BackendError;
    ///
    /// let err = BackendError::new("Failed to build attempt entry: `score` must be initialized");
    /// assert!(err.file.ends_with(".rs"));
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
}
