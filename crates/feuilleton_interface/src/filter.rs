//! Project search filter.

use serde::{Deserialize, Serialize};

/// Filter for project searches.
///
/// Text criteria are case-insensitive substring matches; set criteria are
/// combined with AND.
///
/// # Examples
///
/// ```
/// use feuilleton_interface::ProjectFilter;
///
/// let filter = ProjectFilter::new().with_genre("fantasy").with_limit(10);
/// assert_eq!(filter.genre.as_deref(), Some("fantasy"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// Substring of the title
    pub title: Option<String>,
    /// Substring of the genre
    pub genre: Option<String>,
    /// Substring of the title, summary or world-setting
    pub keyword: Option<String>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Number of results to skip
    pub offset: Option<usize>,
}

impl ProjectFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by title substring.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Filter by genre substring.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Filter by keyword across title, summary and world-setting.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Limit the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip a number of results.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true when the given fields satisfy every set criterion.
    ///
    /// Stores that cannot push the filter down to a query use this.
    pub fn matches(
        &self,
        title: &str,
        genre: Option<&str>,
        summary: Option<&str>,
        world_text: &str,
    ) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        if let Some(t) = &self.title
            && !contains(title, t)
        {
            return false;
        }
        if let Some(g) = &self.genre
            && !genre.is_some_and(|genre| contains(genre, g))
        {
            return false;
        }
        if let Some(k) = &self.keyword
            && !(contains(title, k)
                || summary.is_some_and(|s| contains(s, k))
                || contains(world_text, k))
        {
            return false;
        }
        true
    }
}
