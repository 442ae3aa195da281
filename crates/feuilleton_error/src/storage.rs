//! Story store error types.

/// Kinds of story store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Project does not exist
    #[display("Project {} not found", _0)]
    ProjectNotFound(i32),
    /// A chapter with this number already exists for the project
    #[display("Chapter {} already exists for project {}", chapter_number, project_id)]
    DuplicateChapter {
        /// Owning project
        project_id: i32,
        /// Conflicting chapter number
        chapter_number: i32,
    },
    /// Stored record could not be decoded
    #[display("Corrupt record: {}", _0)]
    Corrupt(String),
    /// Backend is unavailable
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
}

/// Story store error with location tracking.
///
/// # Examples
///
/// ```
/// use feuilleton_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::ProjectNotFound(7));
/// assert!(format!("{}", err).contains("Project 7 not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
