//! Article record and its error contract.
//!
//! This module defines the **contract** between:
//! 1) normalizing pasted JSON-like text -> `ArticleRecord`, and
//! 2) rendering `ArticleRecord::markdown_body` -> HTML.
//!
//! Both error kinds are plain data. Nothing in the core panics on input.

mod error;
mod record;

pub use error::*;
pub use record::*;

/// Author used when the input does not name one.
pub const DEFAULT_AUTHOR: &str = "怡亚科技";

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, body: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            summary: String::new(),
            markdown_body: body.to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn valid_record_has_no_messages() {
        assert!(validate(&record("T", "body")).is_empty());
    }

    #[test]
    fn empty_body_yields_one_content_message() {
        let errors = validate(&record("T", "   "));
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].contains("content"), "{errors:?}");
    }

    #[test]
    fn empty_title_and_body_yield_two_messages() {
        let errors = validate(&record("", "\n\t"));
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[0].contains("title"), "{errors:?}");
        assert!(errors[1].contains("content"), "{errors:?}");
    }

    #[test]
    fn into_valid_reports_validation_failed() {
        let err = record("", "x").into_valid().unwrap_err();
        match err {
            ArticleError::ValidationFailed { errors } => assert_eq!(errors.len(), 1),
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn record_serializes_with_camel_case_body() {
        let json = serde_json::to_value(record("T", "b")).expect("serialize");
        assert_eq!(json["markdownBody"], "b");
        assert_eq!(json["author"], DEFAULT_AUTHOR);
    }
}
