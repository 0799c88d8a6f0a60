//! Markdown -> HTML renderer.
//!
//! Rendering is an ordered rewrite table (see [`rules`]) followed by a
//! line-based block pass. This is not CommonMark: there is no nested
//! emphasis, no nested lists and no reference links. Output shape is relied
//! on by stored articles, so rule order and block grouping stay as they are.

mod blocks;
pub mod rules;

use rules::{BASIC_RULES, ENHANCED_RULES, RenderRule};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which rewrite table and block policy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Headings 1-3, `*` emphasis, code spans, quotes, images, links.
    /// Paragraph lines are joined and leftover newlines become `<br>`.
    Basic,
    /// Adds headings 4-6, `_` emphasis, fenced code and horizontal rules.
    #[default]
    Enhanced,
}

impl Flavor {
    pub fn rules(self) -> &'static [RenderRule] {
        match self {
            Flavor::Basic => &BASIC_RULES,
            Flavor::Enhanced => &ENHANCED_RULES,
        }
    }

    /// Whether a trimmed line is already in tag form and must not be wrapped.
    fn is_passthrough(self, line: &str) -> bool {
        match self {
            Flavor::Basic => ["<h", "<blockquote", "<ul", "<ol", "<li"]
                .iter()
                .any(|p| line.starts_with(p)),
            Flavor::Enhanced => line.starts_with('<') && !line.starts_with("</"),
        }
    }

    fn joins_paragraph_lines(self) -> bool {
        matches!(self, Flavor::Basic)
    }

    fn breaks_newlines(self) -> bool {
        matches!(self, Flavor::Basic)
    }

    /// What sits between two rendered blocks in the output.
    pub fn block_separator(self) -> &'static str {
        if self.breaks_newlines() { "<br>" } else { "\n" }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Basic => f.write_str("basic"),
            Flavor::Enhanced => f.write_str("enhanced"),
        }
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Flavor::Basic),
            "enhanced" => Ok(Flavor::Enhanced),
            other => Err(format!("unknown renderer flavor `{other}` (expected basic|enhanced)")),
        }
    }
}

/// Rendering options that control formatting decisions.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub flavor: Flavor,
}

pub fn render_basic(markdown: &str) -> String {
    render_markdown_with_options(markdown, &RenderOptions { flavor: Flavor::Basic })
}

pub fn render_enhanced(markdown: &str) -> String {
    render_markdown_with_options(
        markdown,
        &RenderOptions {
            flavor: Flavor::Enhanced,
        },
    )
}

/// Render with default options (the enhanced flavor).
pub fn render_markdown(markdown: &str) -> String {
    render_markdown_with_options(markdown, &RenderOptions::default())
}

/// Render `markdown` to an HTML fragment. Never fails; empty input gives
/// empty output.
pub fn render_markdown_with_options(markdown: &str, opts: &RenderOptions) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let flavor = opts.flavor;
    let rewritten = rules::apply_rules(flavor.rules(), markdown);
    let grouped = blocks::group_lines(&rewritten, flavor);
    let html = blocks::blocks_to_html(&grouped);

    if flavor.breaks_newlines() {
        html.replace('\n', "<br>")
    } else {
        html
    }
}
