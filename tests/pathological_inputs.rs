use postsmith::article::ArticleError;
use postsmith::normalize::{parse, repair};
use postsmith::render::{render_basic, render_enhanced};

/// Inputs that once looked risky for a regex-driven renderer: long delimiter
/// runs, unterminated constructs and control characters.
fn odd_inputs() -> Vec<(&'static str, String)> {
    vec![
        ("stars", "*".repeat(20_000)),
        ("underscores", "_".repeat(20_001)),
        ("backticks", "`".repeat(20_001)),
        ("brackets", "[".repeat(20_000)),
        ("hashes", "#".repeat(20_000)),
        ("quotes", ">".repeat(20_000)),
        ("many_items", "- x\n".repeat(10_000)),
        ("unclosed_link", "[a](".repeat(5_000)),
        ("unclosed_image", "![".repeat(5_000)),
        ("nul_and_cr", "a\u{0}b\r\r\n\r# h\r".to_string()),
        ("lone_markers", "#\n# \n> \n- \n1. \n```".to_string()),
        ("emoji", "# 🚀 *✨* [🔗](🌐)".to_string()),
    ]
}

#[test]
fn renderers_never_panic_on_odd_inputs() {
    for (name, src) in odd_inputs() {
        let result = std::panic::catch_unwind(|| (render_basic(&src), render_enhanced(&src)));
        assert!(result.is_ok(), "renderer panicked on case '{name}'");
    }
}

#[test]
fn repair_and_parse_never_panic_on_odd_inputs() {
    for (name, src) in odd_inputs() {
        let result = std::panic::catch_unwind(|| {
            let _ = repair(&src);
            parse(&src)
        });
        match result {
            Ok(Ok(_)) | Ok(Err(ArticleError::MalformedInput { .. })) => {}
            Ok(Err(other)) => panic!("unexpected error for case '{name}': {other}"),
            Err(_) => panic!("parse panicked on case '{name}'"),
        }
    }
}

#[test]
fn star_run_is_consumed_by_bold_pairs() {
    let html = render_enhanced(&"*".repeat(20_000));
    assert!(!html.contains('*'));
    assert_eq!(html.matches("<strong></strong>").count(), 5_000);
}

#[test]
fn odd_backtick_run_leaves_one_backtick() {
    let html = render_enhanced(&"`".repeat(20_001));
    assert_eq!(html.matches("<code></code>").count(), 10_000);
    assert!(html.ends_with('`'), "{}", &html[html.len() - 20..]);
}

#[test]
fn bracket_run_is_plain_text() {
    let src = "[".repeat(20_000);
    assert_eq!(render_enhanced(&src), format!("<p>{src}</p>"));
}

#[test]
fn deep_brace_nesting_is_malformed_not_a_crash() {
    let src = "{".repeat(20_000);
    assert!(matches!(
        parse(&src),
        Err(ArticleError::MalformedInput { .. })
    ));
}

#[test]
fn long_list_renders_as_one_list() {
    let html = render_enhanced(&"- x\n".repeat(10_000));
    assert!(html.starts_with("<ul><li>x</li>"));
    assert!(html.ends_with("</ul>"));
    assert_eq!(html.matches("<li>").count(), 10_000);
}
