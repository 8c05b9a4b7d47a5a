use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a block that survives edits.
///
/// Assigned once at creation and never reused, including across decode runs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Heading depth; the dialect only knows three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn from_hashes(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    pub fn hashes(self) -> usize {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

/// Rectangular table contents. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableData {
    rows: Vec<Vec<String>>,
}

impl TableData {
    /// Builds a table, padding short rows with empty cells so every row has
    /// the width of the widest one.
    pub fn new(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// Replaces a single cell. Out-of-range coordinates are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = text.into();
        }
    }
}

/// The kind of a block together with the fields that only make sense for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Plain paragraph text (default when no other opener matches).
    Text,
    Heading(HeadingLevel),
    Bullet,
    /// Ordered item; its label is derived by the numbering engine.
    Ordered,
    Checklist {
        checked: bool,
    },
    Quote,
    Code {
        language: String,
    },
    Divider,
    Callout {
        /// Keyword between `[!` and `]`, e.g. `NOTE` or `WARNING`.
        variant: String,
        title: String,
    },
    ImageEmbed {
        alt: Option<String>,
    },
    FileEmbed {
        alt: Option<String>,
    },
    Table(TableData),
    /// Collapsible section; the only kind that owns children.
    Toggle {
        collapsed: bool,
        children: Vec<Block>,
    },
}

impl BlockKind {
    pub fn is_toggle(&self) -> bool {
        matches!(self, BlockKind::Toggle { .. })
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, BlockKind::Divider)
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, BlockKind::Ordered)
    }

    /// Short name used in outlines and log messages.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Text => "Text",
            BlockKind::Heading(HeadingLevel::H1) => "Heading1",
            BlockKind::Heading(HeadingLevel::H2) => "Heading2",
            BlockKind::Heading(HeadingLevel::H3) => "Heading3",
            BlockKind::Bullet => "Bullet",
            BlockKind::Ordered => "Ordered",
            BlockKind::Checklist { .. } => "Checklist",
            BlockKind::Quote => "Quote",
            BlockKind::Code { .. } => "Code",
            BlockKind::Divider => "Divider",
            BlockKind::Callout { .. } => "Callout",
            BlockKind::ImageEmbed { .. } => "ImageEmbed",
            BlockKind::FileEmbed { .. } => "FileEmbed",
            BlockKind::Table(_) => "Table",
            BlockKind::Toggle { .. } => "Toggle",
        }
    }
}

/// One structural unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Raw inline content. For embeds this is the embed target.
    pub text: String,
    /// Nesting depth, independent of toggle children.
    pub indent: usize,
}

impl Block {
    /// Creates a block with a fresh id.
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(),
            kind,
            text: text.into(),
            indent: 0,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, text)
    }

    /// The empty paragraph used whenever a document would otherwise be empty.
    pub fn empty() -> Self {
        Self::text("")
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn children(&self) -> &[Block] {
        match &self.kind {
            BlockKind::Toggle { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match &mut self.kind {
            BlockKind::Toggle { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Takes the children out of a toggle, leaving it empty.
    pub(crate) fn take_children(&mut self) -> Vec<Block> {
        self.children_mut().map(std::mem::take).unwrap_or_default()
    }
}
