//! Chapter generation and run admission errors.

/// Reasons a generation request or run can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Another run for the same project has not finished yet
    #[display("Generation already in progress for project {}", _0)]
    AlreadyRunning(i32),
    /// The project does not exist
    #[display("Project {} not found", _0)]
    ProjectNotFound(i32),
    /// Run parameters out of range
    #[display("Invalid generation config: {}", _0)]
    InvalidConfig(String),
    /// The background task ended without producing a report
    #[display("Run aborted: {}", _0)]
    RunAborted(String),
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use feuilleton_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::AlreadyRunning(3));
/// assert!(format!("{}", err).contains("already in progress"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
