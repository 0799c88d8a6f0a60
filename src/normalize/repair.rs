use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static BARE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([{,]\s*)([a-zA-Z_$][a-zA-Z0-9_$]*)\s*:").expect("bare key pattern")
});
static SINGLE_QUOTED_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s*'([^']*)'").expect("single quoted value pattern"));
static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern"));
static DOUBLED_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([^\\])"""#).expect("doubled quote pattern"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Repair JSON-like text into something `serde_json` can usually parse.
///
/// Steps run in a fixed order:
/// 1. un-double escape sequences left over from copy-pasting escaped JSON,
/// 2. quote bare object keys,
/// 3. turn single-quoted values into double-quoted ones,
/// 4. drop trailing commas before `}` / `]`,
/// 5. collapse a doubled `""` that is not preceded by a backslash,
/// 6. collapse whitespace runs and trim.
///
/// If the result still does not parse, the text is escaped one level further
/// instead (for input that was a raw multi-line string). That fallback is
/// best-effort; callers must still handle a parse failure.
pub fn repair(raw: &str) -> String {
    let unescaped = collapse_double_escapes(raw);

    let mut text = BARE_KEY
        .replace_all(&unescaped, r#"${1}"${2}":"#)
        .into_owned();
    text = SINGLE_QUOTED_VALUE
        .replace_all(&text, r#": "${1}""#)
        .into_owned();
    text = TRAILING_COMMA.replace_all(&text, "${1}").into_owned();
    // narrow on purpose: `"a": ""` next to a non-backslash also collapses.
    text = DOUBLED_QUOTE.replace_all(&text, r#"${1}""#).into_owned();
    text = WHITESPACE_RUN.replace_all(&text, " ").trim().to_string();

    if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
        return text;
    }

    debug!("repaired text still fails to parse, escaping one level deeper");
    escape_one_level(&text)
}

fn collapse_double_escapes(input: &str) -> String {
    input
        .replace(r"\\n", r"\n")
        .replace(r#"\\""#, r#"\""#)
        .replace(r"\\t", r"\t")
        .replace(r"\\r", r"\r")
        .replace(r"\\\\", r"\\")
}

fn escape_one_level(input: &str) -> String {
    input
        .replace(r"\n", r"\\n")
        .replace(r#"\""#, r#"\\""#)
        .replace('\n', r"\n")
        .replace('\t', r"\t")
        .replace('\r', r"\r")
}
