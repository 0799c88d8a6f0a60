use crate::article::ArticleError;
use serde::{Deserialize, Serialize};

/// A normalized article, as extracted from pasted JSON-like input.
///
/// Produced by [`crate::normalize::parse`]; no field is guaranteed non-empty
/// until [`validate`] has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub title: String,
    pub author: String,

    /// May be empty.
    #[serde(default)]
    pub summary: String,

    /// Markdown source of the article body.
    pub markdown_body: String,

    /// Unique, non-blank, in order of first appearance.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ArticleRecord {
    /// Returns the record if it passes [`validate`], otherwise
    /// [`ArticleError::ValidationFailed`] with every violated rule.
    pub fn into_valid(self) -> Result<Self, ArticleError> {
        let errors = validate(&self);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ArticleError::ValidationFailed { errors })
        }
    }
}

/// Check the required fields of a record.
///
/// Returns one human readable message per violated rule; an empty list means
/// the record is valid.
pub fn validate(record: &ArticleRecord) -> Vec<String> {
    let mut errors = Vec::new();

    if record.title.trim().is_empty() {
        errors.push("article title must not be empty".to_string());
    }

    if record.markdown_body.trim().is_empty() {
        errors.push("article content must not be empty".to_string());
    }

    errors
}
