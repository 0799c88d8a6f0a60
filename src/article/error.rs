use thiserror::Error;

/// Failure kinds of the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArticleError {
    /// The input could not be parsed as JSON, even after repair and the
    /// escaping fallback. Carries the JSON parser's message verbatim.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// Well-formed JSON, but required fields are missing or blank.
    #[error("validation failed: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },
}

impl ArticleError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }
}
