use crate::models::{Block, BlockKind, TableData};

use super::{
    classify::LineClass,
    kinds::{CodeFence, Quote, TableRow},
    open::{BlockOpen, try_open},
};

/// The multi-line construct currently being accumulated.
#[derive(Debug)]
enum Pending {
    None,
    Paragraph {
        indent: usize,
        lines: Vec<String>,
    },
    Quote {
        indent: usize,
        lines: Vec<String>,
    },
    Callout {
        indent: usize,
        variant: String,
        title: String,
        lines: Vec<String>,
    },
    Toggle {
        indent: usize,
        collapsed: bool,
        text: String,
        children: Vec<Block>,
    },
    Fence {
        indent: usize,
        language: String,
        lines: Vec<String>,
    },
    Table {
        indent: usize,
        rows: Vec<Vec<String>>,
        /// Whether the line after the header has been seen.
        past_separator: bool,
    },
}

/// Greedy, line-buffered state machine turning classified lines into blocks.
///
/// Every line lands in some block; there is no failure state.
pub struct BlockBuilder {
    pending: Pending,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            pending: Pending::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        if self.continue_pending(c) {
            return;
        }

        if c.is_blank {
            self.flush();
            self.out.push(Block::empty());
            return;
        }

        match try_open(c.remainder) {
            Some(open) => {
                self.flush();
                self.open(open, c);
            }
            None => self.extend_paragraph(c),
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush; an unterminated fence is emitted as a code block anyway
        if let Pending::Fence { .. } = self.pending {
            log::debug!("unterminated code fence at end of input");
        }
        self.flush();
        self.out
    }

    /// Feeds the line to the pending multi-line construct. Returns false when
    /// the construct does not take it; non-paragraph constructs are flushed
    /// at that point.
    fn continue_pending(&mut self, c: &LineClass) -> bool {
        let consumed = match &mut self.pending {
            Pending::None | Pending::Paragraph { .. } => return false,
            Pending::Fence { lines, .. } => {
                if CodeFence::closes(c.raw) {
                    self.flush();
                } else {
                    lines.push(c.raw.to_string());
                }
                return true;
            }
            Pending::Quote { indent, lines } | Pending::Callout { indent, lines, .. } => {
                match Quote::strip(c.remainder) {
                    Some(text) if c.indent == *indent => {
                        lines.push(text.to_string());
                        true
                    }
                    _ => false,
                }
            }
            Pending::Toggle {
                indent, children, ..
            } => {
                if c.indent > *indent {
                    children.push(Block::text(c.remainder).with_indent(c.indent - *indent - 1));
                    true
                } else {
                    false
                }
            }
            Pending::Table {
                rows,
                past_separator,
                ..
            } => {
                if TableRow::matches(c.remainder) {
                    let cells = TableRow::cells(c.remainder);
                    let is_separator = !*past_separator && TableRow::is_separator(&cells);
                    *past_separator = true;
                    if !is_separator {
                        rows.push(cells);
                    }
                    true
                } else {
                    false
                }
            }
        };

        if !consumed {
            self.flush();
        }
        consumed
    }

    fn open(&mut self, open: BlockOpen<'_>, c: &LineClass<'_>) {
        let indent = c.indent;
        let single = |kind: BlockKind, text: &str| Block::new(kind, text).with_indent(indent);

        match open {
            BlockOpen::Heading { level, text } => self.out.push(single(BlockKind::Heading(level), text)),
            BlockOpen::Checklist { checked, text } => {
                self.out.push(single(BlockKind::Checklist { checked }, text))
            }
            BlockOpen::Bullet { text } => self.out.push(single(BlockKind::Bullet, text)),
            BlockOpen::Ordered { text } => self.out.push(single(BlockKind::Ordered, text)),
            BlockOpen::Divider => self.out.push(single(BlockKind::Divider, "")),
            BlockOpen::Embed(embed) => {
                let alt = embed.alt.map(str::to_string);
                let kind = if embed.is_image {
                    BlockKind::ImageEmbed { alt }
                } else {
                    BlockKind::FileEmbed { alt }
                };
                self.out.push(single(kind, embed.target));
            }
            BlockOpen::Toggle { collapsed, text } => {
                self.pending = Pending::Toggle {
                    indent,
                    collapsed,
                    text: text.to_string(),
                    children: vec![],
                }
            }
            BlockOpen::Quote { text } => {
                self.pending = Pending::Quote {
                    indent,
                    lines: vec![text.to_string()],
                }
            }
            BlockOpen::Callout { variant, title } => {
                self.pending = Pending::Callout {
                    indent,
                    variant: variant.to_string(),
                    title: title.to_string(),
                    lines: vec![],
                }
            }
            BlockOpen::CodeFence { language } => {
                self.pending = Pending::Fence {
                    indent,
                    language: language.to_string(),
                    lines: vec![],
                }
            }
            BlockOpen::TableRow => {
                self.pending = Pending::Table {
                    indent,
                    rows: vec![TableRow::cells(c.remainder)],
                    past_separator: false,
                }
            }
        }
    }

    fn extend_paragraph(&mut self, c: &LineClass) {
        match &mut self.pending {
            Pending::Paragraph { lines, .. } => lines.push(c.remainder.to_string()),
            _ => {
                self.pending = Pending::Paragraph {
                    indent: c.indent,
                    lines: vec![c.remainder.to_string()],
                }
            }
        }
    }

    fn flush(&mut self) {
        let block = match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::None => return,
            Pending::Paragraph { indent, lines } => Block::text(lines.join("\n")).with_indent(indent),
            Pending::Quote { indent, lines } => {
                Block::new(BlockKind::Quote, lines.join("\n")).with_indent(indent)
            }
            Pending::Callout {
                indent,
                variant,
                title,
                lines,
            } => Block::new(BlockKind::Callout { variant, title }, lines.join("\n"))
                .with_indent(indent),
            Pending::Toggle {
                indent,
                collapsed,
                text,
                children,
            } => Block::new(
                BlockKind::Toggle {
                    collapsed,
                    children,
                },
                text,
            )
            .with_indent(indent),
            Pending::Fence {
                indent,
                language,
                lines,
            } => Block::new(BlockKind::Code { language }, lines.join("\n")).with_indent(indent),
            Pending::Table { indent, rows, .. } => {
                let width = rows.first().map_or(0, Vec::len);
                if rows.iter().any(|r| r.len() != width) {
                    log::debug!("padding ragged table rows to a common width");
                }
                Block::new(BlockKind::Table(TableData::new(rows)), "").with_indent(indent)
            }
        };
        self.out.push(block);
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
