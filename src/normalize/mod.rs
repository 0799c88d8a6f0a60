//! Lenient JSON -> `ArticleRecord` normalization.
//!
//! Operators paste JSON that has been through chat tools, editors and
//! clipboards: unquoted keys, single quotes, trailing commas and doubly
//! escaped newlines are all common. [`repair`] fixes what it can, [`parse`]
//! extracts a record with format-tolerant fallbacks.

mod repair;
mod tags;

pub use repair::repair;
pub use tags::{dedup_tags, extract_tags, split_tag_list};

use crate::article::{ArticleError, ArticleRecord, DEFAULT_AUTHOR};
use serde_json::Value;
use tags::scalar_text;
use tracing::debug;

/// Example input shown to operators. The body uses a doubly escaped newline,
/// which [`repair`] folds back into a single escape.
pub const EXAMPLE_INPUT: &str = r####"{
  "author": "怡亚科技",
  "markdown_content": "### 文章标题\\n这是文章内容...",
  "summary": "文章摘要",
  "title": ["文章标题"],
  "tags": ["标签1", "标签2", "标签3"]
}"####;

/// Repair and parse `raw`, using [`DEFAULT_AUTHOR`] when no author is given.
pub fn parse(raw: &str) -> Result<ArticleRecord, ArticleError> {
    parse_with_default_author(raw, DEFAULT_AUTHOR)
}

/// Like [`parse`], but with a caller-chosen fallback author.
///
/// Fails only with [`ArticleError::MalformedInput`]; a record with empty
/// required fields is still returned (see [`crate::article::validate`]).
pub fn parse_with_default_author(
    raw: &str,
    default_author: &str,
) -> Result<ArticleRecord, ArticleError> {
    let repaired = repair(raw);
    let data: Value =
        serde_json::from_str(&repaired).map_err(|e| ArticleError::malformed(e.to_string()))?;

    let record = extract_record(&data, default_author);
    debug!(
        title = %record.title,
        author = %record.author,
        tags = ?record.tags,
        "parsed article record"
    );
    Ok(record)
}

fn extract_record(data: &Value, default_author: &str) -> ArticleRecord {
    let title = match data.get("title") {
        Some(Value::Array(items)) => items.first().and_then(scalar_text),
        Some(v) => scalar_text(v),
        None => None,
    }
    .unwrap_or_default();

    let author = text_field(data, "author").unwrap_or_else(|| default_author.to_string());
    let summary = text_field(data, "summary").unwrap_or_default();
    let markdown_body = text_field(data, "markdown_content")
        .or_else(|| text_field(data, "markdownContent"))
        .unwrap_or_default();

    ArticleRecord {
        title,
        author,
        summary,
        markdown_body,
        tags: extract_tags(data),
    }
}

/// A non-empty scalar field; empty strings count as absent.
fn text_field(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(scalar_text).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_input_with_title_list_and_tag_string() {
        let rec = parse(r#"{title:["T"], markdown_content:"**b**", tags:"a, b, a"}"#)
            .expect("parse");
        assert_eq!(rec.title, "T");
        assert_eq!(rec.markdown_body, "**b**");
        assert_eq!(rec.tags, vec!["a", "b"]);
        assert_eq!(rec.author, DEFAULT_AUTHOR);
        assert_eq!(rec.summary, "");
    }

    #[test]
    fn camel_case_body_is_a_fallback() {
        let rec = parse(r#"{"title": "T", "markdownContent": "body"}"#).unwrap();
        assert_eq!(rec.markdown_body, "body");

        // an empty snake_case body falls through to the camelCase one.
        let data = serde_json::json!({"title": "T", "markdown_content": "", "markdownContent": "second"});
        assert_eq!(extract_record(&data, DEFAULT_AUTHOR).markdown_body, "second");
    }

    #[test]
    fn single_quoted_keys_are_not_repaired() {
        // only values are converted; the key keeps its single quotes.
        assert!(parse(r#"{'title': 'x'}"#).is_err());
    }

    #[test]
    fn explicit_author_and_summary_are_kept() {
        let rec = parse(r#"{"title": "x", "author": 'Ann', "summary": "S"}"#).unwrap();
        assert_eq!(rec.author, "Ann");
        assert_eq!(rec.summary, "S");
    }

    #[test]
    fn empty_author_falls_back_to_configured_default() {
        let data = serde_json::json!({"title": "x", "author": ""});
        assert_eq!(extract_record(&data, "Desk").author, "Desk");

        let rec = parse_with_default_author(r#"{"title": "x"}"#, "Desk").unwrap();
        assert_eq!(rec.author, "Desk");
    }

    #[test]
    fn empty_string_value_is_corrupted_by_doubled_quote_repair() {
        let err = parse(r#"{"title": "x", "summary": ""}"#).unwrap_err();
        assert!(matches!(err, ArticleError::MalformedInput { .. }), "{err}");
    }

    #[test]
    fn unrecoverable_input_is_malformed_with_message() {
        let err = parse("this is not { json").unwrap_err();
        match err {
            ArticleError::MalformedInput { message } => assert!(!message.is_empty()),
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn non_object_json_parses_to_an_empty_record() {
        let rec = parse("[1, 2, 3]").unwrap();
        assert_eq!(rec.title, "");
        assert_eq!(rec.markdown_body, "");
        assert_eq!(crate::article::validate(&rec).len(), 2);
    }

    #[test]
    fn example_input_parses_and_unfolds_its_newline() {
        let rec = parse(EXAMPLE_INPUT).unwrap();
        assert_eq!(rec.title, "文章标题");
        assert_eq!(rec.markdown_body, "### 文章标题\n这是文章内容...");
        assert_eq!(rec.tags, vec!["标签1", "标签2", "标签3"]);
    }

    #[test]
    fn multi_line_pasted_body_survives_whitespace_collapse() {
        let raw = "{\n  \"title\": \"T\",\n  \"markdown_content\": \"# H\\n\\nText\"\n}";
        let rec = parse(raw).unwrap();
        assert_eq!(rec.markdown_body, "# H\n\nText");
    }
}
