//! Line-oriented renderer for the small markup subset returned by the
//! analysis backend.
//!
//! Each input line becomes exactly one [`Block`]:
//!
//! - `## ` starts a level-2 heading, `### ` a level-3 heading
//! - a line whose trimmed text starts with `* ` or `- ` is a list item
//! - anything else is a paragraph; blank lines stay as empty paragraphs
//!
//! Inside list items and paragraphs the text is split on `**`; every odd
//! segment is emphasized. An unmatched delimiter simply emphasizes the
//! trailing segment. There is no nesting and no escaping, and rendering
//! never fails.

const HEADING_2: &str = "## ";
const HEADING_3: &str = "### ";
const BULLETS: [&str; 2] = ["* ", "- "];
const STRONG_DELIMITER: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading2,
    Heading3,
    ListItem,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Strong(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(text) | Span::Strong(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

impl Block {
    fn heading(kind: BlockKind, text: &str) -> Self {
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![Span::Plain(text.to_string())]
        };
        Block { kind, spans }
    }

    /// Concatenated span text with emphasis dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }

    /// Blank paragraphs are kept only for vertical spacing.
    pub fn is_spacer(&self) -> bool {
        self.kind == BlockKind::Paragraph && self.plain_text().trim().is_empty()
    }
}

pub fn render(text: &str) -> Vec<Block> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(render_line)
        .collect()
}

fn render_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix(HEADING_2) {
        return Block::heading(BlockKind::Heading2, rest);
    }
    if let Some(rest) = line.strip_prefix(HEADING_3) {
        return Block::heading(BlockKind::Heading3, rest);
    }

    let trimmed = line.trim();
    if let Some(rest) = BULLETS
        .iter()
        .find_map(|bullet| trimmed.strip_prefix(bullet))
    {
        return Block {
            kind: BlockKind::ListItem,
            spans: split_emphasis(rest),
        };
    }

    Block {
        kind: BlockKind::Paragraph,
        spans: split_emphasis(line),
    }
}

/// Splits on `**`, alternating plain and strong starting with plain.
/// Empty segments carry no text and are dropped.
pub fn split_emphasis(text: &str) -> Vec<Span> {
    text.split(STRONG_DELIMITER)
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(index, segment)| {
            if index % 2 == 1 {
                Span::Strong(segment.to_string())
            } else {
                Span::Plain(segment.to_string())
            }
        })
        .collect()
}

/// Flattens blocks back to text, one line per block, without markers.
pub fn to_plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}
