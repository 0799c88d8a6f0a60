//! Assembling a finished article: image placement, the article id, the HTML
//! wrapper and the index entry.

use crate::article::ArticleRecord;
use crate::normalize::dedup_tags;
use crate::render::{self, RenderOptions};
use crate::store::{ImageAsset, ImageRef, IndexEntry};
use deunicode::deunicode;
use html_escape::{encode_double_quoted_attribute, encode_text};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{OffsetDateTime, macros::format_description};

/// Marker in the Markdown body that `ImagePosition::Marker` replaces.
pub const IMAGE_MARKER: &str = "<!-- INSERT_IMAGES_HERE -->";

const ID_MAX_LEN: usize = 50;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Where selected images go relative to the rendered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePosition {
    Start,
    #[default]
    End,
    /// At the first [`IMAGE_MARKER`]; at the end if there is none.
    Marker,
}

impl fmt::Display for ImagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImagePosition::Start => "start",
            ImagePosition::End => "end",
            ImagePosition::Marker => "marker",
        })
    }
}

impl FromStr for ImagePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(ImagePosition::Start),
            "end" => Ok(ImagePosition::End),
            // "custom" is what the position was called in older settings files.
            "marker" | "custom" => Ok(ImagePosition::Marker),
            other => Err(format!(
                "unknown image position `{other}` (expected start|end|marker)"
            )),
        }
    }
}

/// Options for [`compose`].
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    pub render: RenderOptions,
    pub image_position: ImagePosition,
}

/// Output of [`compose`]: the standalone HTML and its index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedArticle {
    pub id: String,
    pub html: String,
    pub entry: IndexEntry,
}

impl ComposedArticle {
    /// File name of the HTML artifact, relative to the output directory.
    pub fn html_path(&self) -> String {
        self.entry.content_file.clone()
    }

    pub fn json_path(&self) -> String {
        format!("posts/{}.json", self.id)
    }
}

/// One centered block per image, one line each.
pub fn images_html(images: &[ImageAsset]) -> String {
    images
        .iter()
        .map(|img| {
            format!(
                "<div style=\"text-align: center; margin: 20px 0;\"><img src=\"{}\" alt=\"{}\" \
                 style=\"max-width: 100%; height: auto; border-radius: 8px; \
                 box-shadow: 0 2px 10px rgba(0,0,0,0.1);\"></div>",
                encode_double_quoted_attribute(&img.data_url),
                encode_double_quoted_attribute(&img.name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render `markdown` and place `images` according to `position`.
///
/// The image block is never passed through the rewrite rules. With
/// `ImagePosition::Marker` the text on each side of the first marker is
/// rendered on its own and the block goes between the two halves.
pub fn render_body(
    markdown: &str,
    images: &[ImageAsset],
    position: ImagePosition,
    opts: &RenderOptions,
) -> String {
    if images.is_empty() {
        return render::render_markdown_with_options(markdown, opts);
    }

    let sep = opts.flavor.block_separator();
    let block = images_html(images).replace('\n', sep);
    let (before, after) = match position {
        ImagePosition::Start => ("", markdown),
        ImagePosition::End => (markdown, ""),
        ImagePosition::Marker => markdown.split_once(IMAGE_MARKER).unwrap_or((markdown, "")),
    };

    [
        render::render_markdown_with_options(before, opts),
        block,
        render::render_markdown_with_options(after, opts),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(sep)
}

/// Derive a file-name-safe id from the title.
///
/// The title is transliterated to ASCII, lower-cased, whitespace runs become
/// `-` and everything outside `[a-z0-9-]` is dropped. Ids shorter than three
/// characters get a time-based suffix.
pub fn article_id(title: &str, now: OffsetDateTime) -> String {
    let ascii = deunicode(title.trim()).to_lowercase();
    let dashed = WHITESPACE_RUN.replace_all(&ascii, "-");
    let mut id: String = dashed
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .take(ID_MAX_LEN)
        .collect();
    id = id.trim_matches('-').to_string();

    if id.len() >= 3 {
        return id;
    }

    let nanos = now.unix_timestamp_nanos();
    let stamp = to_base36((nanos / 1_000_000).max(0) as u128);
    let digest = format!("{:x}", md5::compute(format!("{title}:{nanos}")));
    let prefix = if id.is_empty() { "article" } else { id.as_str() };
    format!("{}-{}-{}", prefix, stamp, &digest[..4])
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// `YYYY-MM-DD` in UTC.
pub fn format_date(now: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day]");
    now.to_offset(time::UtcOffset::UTC)
        .format(&fmt)
        .unwrap_or_else(|_| "1970-01-01".to_string())
}

/// Wrap a rendered body into the standalone article HTML.
pub fn wrap_article(title: &str, author: &str, date: &str, tags: &[String], body: &str) -> String {
    let chips = if tags.is_empty() {
        String::new()
    } else {
        let spans: String = tags
            .iter()
            .map(|t| {
                format!(
                    "<span style=\"background: #e1ecf4; color: #39739d; padding: 2px 6px; \
                     border-radius: 10px; margin-right: 5px;\">{}</span>",
                    encode_text(t)
                )
            })
            .collect();
        format!("<p style=\"color: #666; font-size: 0.9em;\">标签: {spans}</p>")
    };

    format!(
        "<h1>{}</h1>\n<p style=\"color: #666; font-size: 0.9em;\">发布于: {} | 作者: {}</p>\n{}\n<hr>\n{}",
        encode_text(title),
        date,
        encode_text(author),
        chips,
        body
    )
}

/// Build the HTML article and its index entry from a validated record.
///
/// `extra_tags` are appended after the record's own tags; repeats are dropped.
pub fn compose(
    record: &ArticleRecord,
    images: &[ImageAsset],
    extra_tags: &[String],
    opts: &ComposeOptions,
    now: OffsetDateTime,
) -> ComposedArticle {
    let id = article_id(&record.title, now);
    let date = format_date(now);
    let tags = dedup_tags(record.tags.iter().chain(extra_tags).cloned());

    let body = render_body(
        &record.markdown_body,
        images,
        opts.image_position,
        &opts.render,
    );
    let html = wrap_article(&record.title, &record.author, &date, &tags, &body);

    let entry = IndexEntry {
        id: id.clone(),
        title: record.title.clone(),
        date,
        author: record.author.clone(),
        summary: record.summary.clone(),
        tags,
        content_file: format!("posts/{id}.html"),
        images: images
            .iter()
            .map(|img| ImageRef {
                id: img.id.clone(),
                name: img.name.clone(),
            })
            .collect(),
    };

    ComposedArticle { id, html, entry }
}
