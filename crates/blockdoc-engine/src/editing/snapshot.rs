//! Id-free text outline of a block tree.
//!
//! One line per block, two spaces per indent level, toggle children under
//! their toggle behind a `> ` marker. Ordered items show their display
//! label. Used by tests to compare trees across decodes (ids differ every
//! time) and by the CLI `show` command.

use std::collections::HashMap;
use std::fmt::Write;

use crate::models::{Block, BlockKind, BlockTree};
use crate::numbering;

pub fn format_outline(tree: &BlockTree) -> String {
    let labels: HashMap<_, _> = numbering::labels(tree).into_iter().collect();
    let mut out = String::new();

    for block in tree.blocks() {
        let label = labels.get(&block.id).map(|l| l.label.as_str());
        let pad = "  ".repeat(block.indent);
        let _ = writeln!(out, "{pad}{}", describe(block, label));

        for child in block.children() {
            let child_pad = "  ".repeat(child.indent);
            let _ = writeln!(out, "{pad}  > {child_pad}{}", describe(child, None));
        }
    }
    out
}

/// Single-line description of a block, e.g. `Checklist[x] "done"`.
pub fn describe(block: &Block, label: Option<&str>) -> String {
    let head = match &block.kind {
        BlockKind::Ordered => format!("Ordered({})", label.unwrap_or("?")),
        BlockKind::Checklist { checked } => {
            format!("Checklist[{}]", if *checked { "x" } else { " " })
        }
        BlockKind::Code { language } if !language.is_empty() => format!("Code({language})"),
        BlockKind::Callout { variant, title } if title.is_empty() => format!("Callout({variant})"),
        BlockKind::Callout { variant, title } => format!("Callout({variant}: {title})"),
        BlockKind::ImageEmbed { alt: Some(alt) } => format!("ImageEmbed({alt})"),
        BlockKind::FileEmbed { alt: Some(alt) } => format!("FileEmbed({alt})"),
        BlockKind::Table(table) => return format!("Table {:?}", table.rows()),
        BlockKind::Toggle {
            collapsed: true, ..
        } => "Toggle[collapsed]".to_string(),
        BlockKind::Divider => return "Divider".to_string(),
        kind => kind.name().to_string(),
    };
    format!("{head} {:?}", block.text)
}
