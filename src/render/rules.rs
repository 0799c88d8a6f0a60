use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// One entry of a rewrite table: a pattern and its replacement template.
///
/// Templates use `regex` expansion syntax (`${1}`).
#[derive(Debug)]
pub struct RenderRule {
    pub name: &'static str,
    pattern: Regex,
    template: &'static str,
}

impl RenderRule {
    fn new(name: &'static str, pattern: &str, template: &'static str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("render rule `{name}` has an invalid pattern: {e}"));
        Self {
            name,
            pattern,
            template,
        }
    }

    /// Replace every non-overlapping match in `text`. The rule never sees
    /// its own output.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.template)
    }
}

/// Run `rules` in order, each one over the output of the previous one.
pub fn apply_rules(rules: &[RenderRule], text: &str) -> String {
    let mut out = text.to_string();
    for rule in rules {
        if let Cow::Owned(next) = rule.apply(&out) {
            out = next;
        }
    }
    out
}

const IMG: &str = r#"<img src="${2}" alt="${1}" style="max-width: 100%; height: auto;">"#;
const LINK: &str = r#"<a href="${2}" target="_blank">${1}</a>"#;

// `R` keeps `.` and `$` off the `\r` of CRLF input.
pub(crate) static BASIC_RULES: Lazy<Vec<RenderRule>> = Lazy::new(|| {
    vec![
        RenderRule::new("h3", r"(?mR)^### (.*)$", "<h3>${1}</h3>"),
        RenderRule::new("h2", r"(?mR)^## (.*)$", "<h2>${1}</h2>"),
        RenderRule::new("h1", r"(?mR)^# (.*)$", "<h1>${1}</h1>"),
        RenderRule::new("bold", r"(?R)\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        RenderRule::new("italic", r"(?R)\*(.*?)\*", "<em>${1}</em>"),
        RenderRule::new("blockquote", r"(?mR)^> (.*)$", "<blockquote>${1}</blockquote>"),
        RenderRule::new("code", r"(?R)`(.*?)`", "<code>${1}</code>"),
        RenderRule::new("image", r"(?R)!\[(.*?)\]\((.*?)\)", IMG),
        RenderRule::new("link", r"(?R)\[(.*?)\]\((.*?)\)", LINK),
    ]
});

// longest `#` run first, so `### ` never eats the head of `###### `.
pub(crate) static ENHANCED_RULES: Lazy<Vec<RenderRule>> = Lazy::new(|| {
    vec![
        RenderRule::new("h6", r"(?mR)^###### (.*)$", "<h6>${1}</h6>"),
        RenderRule::new("h5", r"(?mR)^##### (.*)$", "<h5>${1}</h5>"),
        RenderRule::new("h4", r"(?mR)^#### (.*)$", "<h4>${1}</h4>"),
        RenderRule::new("h3", r"(?mR)^### (.*)$", "<h3>${1}</h3>"),
        RenderRule::new("h2", r"(?mR)^## (.*)$", "<h2>${1}</h2>"),
        RenderRule::new("h1", r"(?mR)^# (.*)$", "<h1>${1}</h1>"),
        RenderRule::new("bold", r"(?R)\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        RenderRule::new("italic", r"(?R)\*(.*?)\*", "<em>${1}</em>"),
        RenderRule::new("bold_underscore", r"(?R)__(.*?)__", "<strong>${1}</strong>"),
        RenderRule::new("italic_underscore", r"(?R)_(.*?)_", "<em>${1}</em>"),
        RenderRule::new("code", r"(?R)`(.*?)`", "<code>${1}</code>"),
        RenderRule::new("fenced_code", r"```([\s\S]*?)```", "<pre><code>${1}</code></pre>"),
        RenderRule::new("blockquote", r"(?mR)^> (.*)$", "<blockquote>${1}</blockquote>"),
        RenderRule::new("image", r"(?R)!\[(.*?)\]\((.*?)\)", IMG),
        RenderRule::new("link", r"(?R)\[(.*?)\]\((.*?)\)", LINK),
        RenderRule::new("hr_dash", r"(?mR)^---$", "<hr>"),
        RenderRule::new("hr_star", r"(?mR)^\*\*\*$", "<hr>"),
        RenderRule::new("hr_underscore", r"(?mR)^___$", "<hr>"),
    ]
});
