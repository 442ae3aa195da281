//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{BackendError, ConfigError, GeminiError, GenerationError, JsonError, StorageError};

/// Every error condition the engine can report.
///
/// # Examples
///
/// ```
/// use feuilleton_error::{FeuilletonError, GeminiError, GeminiErrorKind};
///
/// let err: FeuilletonError = GeminiError::new(GeminiErrorKind::Timeout("30s elapsed".into())).into();
/// assert!(format!("{}", err).contains("30s elapsed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FeuilletonErrorKind {
    /// Malformed JSON input or unrenderable JSON output
    #[from(JsonError)]
    Json(JsonError),
    /// Engine-internal error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Story store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Generation or run admission error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Feuilleton error with kind discrimination.
///
/// # Examples
///
/// ```
/// use feuilleton_error::{ConfigError, FeuilletonResult};
///
/// fn might_fail() -> FeuilletonResult<()> {
///     Err(ConfigError::new("Pass --text or --file"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Feuilleton Error: {}", _0)]
pub struct FeuilletonError(Box<FeuilletonErrorKind>);

impl FeuilletonError {
    /// Create a new error from a kind.
    pub fn new(kind: FeuilletonErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FeuilletonErrorKind {
        &self.0
    }

    /// Returns the generation error kind, if this is a generation error.
    pub fn generation_kind(&self) -> Option<&crate::GenerationErrorKind> {
        match self.kind() {
            FeuilletonErrorKind::Generation(e) => Some(&e.kind),
            _ => None,
        }
    }
}

impl<T> From<T> for FeuilletonError
where
    T: Into<FeuilletonErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Feuilleton operations.
pub type FeuilletonResult<T> = std::result::Result<T, FeuilletonError>;
