//! JSON input and output errors.

/// Malformed JSON handed to the engine, or a value that could not be
/// rendered as JSON.
///
/// `input` names where the JSON came from or was headed: a command-line
/// flag such as `--world`, or `output` for printed listings.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error in {}: {} at line {} in {}", input, message, line, file)]
pub struct JsonError {
    /// Flag or destination the JSON belongs to
    pub input: String,
    /// What was wrong with it
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Report a JSON problem with `input` at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use feuilleton_error::JsonError;
    ///
    /// let err = JsonError::new("--world", "must be a JSON object");
    /// assert_eq!(err.input, "--world");
    /// assert!(err.to_string().contains("--world: must be a JSON object"));
    /// ```
    #[track_caller]
    pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            input: input.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
