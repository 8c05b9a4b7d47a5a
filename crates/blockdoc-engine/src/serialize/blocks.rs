use crate::models::{Block, BlockKind, TableData};
use crate::numbering::OrderedCounters;
use crate::parsing::blocks::kinds::{
    Bullet, Callout, Checklist, CodeFence, Divider, Embed, Quote, TableRow, Toggle,
};

/// Writes top-level blocks, one canonical form per kind.
pub fn write_blocks(out: &mut Vec<String>, blocks: &[Block]) {
    let mut counters = OrderedCounters::new();
    for block in blocks {
        let ordinal = counters.observe(block);
        write_block(out, block, ordinal);
    }
}

fn write_block(out: &mut Vec<String>, block: &Block, ordinal: Option<u64>) {
    let prefix = "\t".repeat(block.indent);
    let text = block.text.as_str();

    match &block.kind {
        BlockKind::Text => {
            if text.is_empty() {
                out.push(String::new());
            } else {
                push_lines(out, &prefix, "", text);
            }
        }
        BlockKind::Heading(level) => {
            let marker = format!("{} ", "#".repeat(level.hashes()));
            push_lines(out, &prefix, &marker, text);
        }
        BlockKind::Bullet => push_lines(out, &prefix, Bullet::MARKER, text),
        BlockKind::Ordered => {
            let marker = format!("{}. ", ordinal.unwrap_or(1));
            push_lines(out, &prefix, &marker, text);
        }
        BlockKind::Checklist { checked } => {
            let marker = if *checked {
                Checklist::CHECKED
            } else {
                Checklist::UNCHECKED
            };
            push_lines(out, &prefix, marker, text);
        }
        BlockKind::Quote => push_quoted(out, &prefix, text.split('\n')),
        BlockKind::Code { language } => {
            out.push(format!("{prefix}{}{language}", CodeFence::BACKTICKS));
            if !text.is_empty() {
                out.extend(text.split('\n').map(str::to_string));
            }
            out.push(format!("{prefix}{}", CodeFence::BACKTICKS));
        }
        BlockKind::Divider => out.push(format!("{prefix}{}", Divider::MARKER)),
        BlockKind::Callout { variant, title } => {
            let mut open = format!("{prefix}{}{variant}]", Callout::OPEN);
            if !title.is_empty() {
                open.push(' ');
                open.push_str(title);
            }
            out.push(open);
            if !text.is_empty() {
                push_quoted(out, &prefix, text.split('\n'));
            }
        }
        BlockKind::ImageEmbed { alt } | BlockKind::FileEmbed { alt } => {
            let alt = alt.as_deref().map(|a| format!("|{a}")).unwrap_or_default();
            out.push(format!("{prefix}{}{text}{alt}{}", Embed::OPEN, Embed::CLOSE));
        }
        BlockKind::Table(table) => write_table(out, &prefix, table),
        BlockKind::Toggle {
            collapsed,
            children,
        } => {
            let state = if *collapsed {
                format!("{} ", Toggle::COLLAPSED)
            } else {
                String::new()
            };
            out.push(format!("{prefix}{}{state}{text}", Toggle::PREFIX));
            // Children persist as plain text one level deeper than the toggle.
            for child in children {
                let child_prefix = "\t".repeat(block.indent + 1 + child.indent);
                for line in child.text.split('\n') {
                    out.push(format!("{child_prefix}{line}"));
                }
            }
        }
    }
}

fn push_lines(out: &mut Vec<String>, prefix: &str, marker: &str, text: &str) {
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    out.push(format!("{prefix}{marker}{first}"));
    for line in lines {
        out.push(format!("{prefix}{line}"));
    }
}

fn push_quoted<'a>(out: &mut Vec<String>, prefix: &str, lines: impl Iterator<Item = &'a str>) {
    for line in lines {
        if line.is_empty() {
            out.push(format!("{prefix}>"));
        } else {
            out.push(format!("{prefix}{}{line}", Quote::PREFIX));
        }
    }
}

fn write_table(out: &mut Vec<String>, prefix: &str, table: &TableData) {
    let width = table.width().max(1);
    match table.rows().split_first() {
        Some((header, body)) => {
            out.push(table_row(prefix, header));
            out.push(separator(prefix, width));
            out.extend(body.iter().map(|r| table_row(prefix, r)));
        }
        None => {
            out.push(format!("{prefix}|{}", "  |".repeat(width)));
            out.push(separator(prefix, width));
        }
    }
}

fn table_row(prefix: &str, cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| TableRow::escape(c)).collect();
    format!("{prefix}| {} |", cells.join(" | "))
}

fn separator(prefix: &str, width: usize) -> String {
    format!("{prefix}|{}", " --- |".repeat(width))
}
