use super::Flavor;
use once_cell::sync::Lazy;
use regex::Regex;

// group 1 is set for unordered markers.
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(?:([-*+])|[0-9]+\.) (.*)$").expect("list item pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Unordered,
    Ordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block {
    Paragraph(Vec<String>),
    List { kind: ListKind, items: Vec<String> },
    /// A line already in tag form.
    Raw(String),
}

impl Block {
    fn to_html(&self) -> String {
        match self {
            Block::Paragraph(lines) => format!("<p>{}</p>", lines.join(" ")),
            Block::List { kind, items } => {
                let tag = match kind {
                    ListKind::Unordered => "ul",
                    ListKind::Ordered => "ol",
                };
                let mut out = format!("<{tag}>");
                for item in items {
                    out.push_str("<li>");
                    out.push_str(item);
                    out.push_str("</li>");
                }
                out.push_str(&format!("</{tag}>"));
                out
            }
            Block::Raw(line) => line.clone(),
        }
    }
}

/// Accumulates lines into blocks. At most one of `paragraph` / `list` is open.
#[derive(Debug, Default)]
struct Grouper {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Option<(ListKind, Vec<String>)>,
}

impl Grouper {
    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            self.blocks
                .push(Block::Paragraph(std::mem::take(&mut self.paragraph)));
        }
    }

    fn flush_list(&mut self) {
        if let Some((kind, items)) = self.list.take() {
            self.blocks.push(Block::List { kind, items });
        }
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    fn push_item(&mut self, kind: ListKind, text: &str) {
        self.flush_paragraph();
        // the first marker decides the kind for the whole run.
        self.list
            .get_or_insert_with(|| (kind, Vec::new()))
            .1
            .push(text.to_string());
    }
}

/// Group rewritten text into blocks, one trimmed line at a time.
pub(crate) fn group_lines(text: &str, flavor: Flavor) -> Vec<Block> {
    let mut g = Grouper::default();

    for raw_line in text.split('\n') {
        let line = raw_line.trim();

        if line.is_empty() {
            g.flush();
            continue;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            let kind = if caps.get(1).is_some() {
                ListKind::Unordered
            } else {
                ListKind::Ordered
            };
            let item = caps.get(2).map_or("", |m| m.as_str());
            g.push_item(kind, item);
            continue;
        }

        g.flush_list();

        if flavor.is_passthrough(line) {
            g.flush_paragraph();
            g.blocks.push(Block::Raw(line.to_string()));
        } else if flavor.joins_paragraph_lines() {
            g.paragraph.push(line.to_string());
        } else {
            g.blocks.push(Block::Paragraph(vec![line.to_string()]));
        }
    }

    g.flush();
    g.blocks
}

pub(crate) fn blocks_to_html(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}
