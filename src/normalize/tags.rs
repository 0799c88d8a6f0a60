use serde_json::Value;

/// Extract the tag list from a parsed input object.
///
/// The first matching rule wins, rules are never merged:
/// `tags` array, `tags` string, `tag` array, `tag` string. String forms are
/// comma separated. The result is deduplicated (first occurrence wins) and
/// blank entries are dropped.
pub fn extract_tags(data: &Value) -> Vec<String> {
    let raw = match (data.get("tags"), data.get("tag")) {
        (Some(Value::Array(items)), _) => items.iter().filter_map(scalar_text).collect(),
        (Some(Value::String(s)), _) => split_tag_list(s),
        (_, Some(Value::Array(items))) => items.iter().filter_map(scalar_text).collect(),
        (_, Some(Value::String(s))) => split_tag_list(s),
        _ => Vec::new(),
    };

    dedup_tags(raw)
}

/// Split a comma separated tag string, trimming each piece and dropping
/// empty ones.
pub fn split_tag_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove blank and repeated tags, keeping the first occurrence of each.
pub fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if tag.trim().is_empty() || out.contains(&tag) {
            continue;
        }
        out.push(tag);
    }
    out
}

/// Text form of a JSON scalar. Objects, arrays and `null` have none.
pub(crate) fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
