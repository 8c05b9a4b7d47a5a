//! Display labels for ordered items.
//!
//! One running counter per indent depth; an ordered item bumps the counter
//! at its depth and zeroes every deeper one. Other kinds leave the counters
//! alone. The label style cycles with depth: decimal, letters, roman.

use serde::Serialize;

use crate::models::{Block, BlockId, BlockTree};

/// Label of an ordered item, e.g. `"b"` at depth 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedLabel {
    pub label: String,
    pub depth: usize,
}

/// Running per-depth counters over a scan of top-level blocks.
#[derive(Debug, Default, Clone)]
pub struct OrderedCounters {
    counts: Vec<u64>,
}

impl OrderedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an ordered item at `depth` and returns its ordinal there.
    pub fn advance(&mut self, depth: usize) -> u64 {
        if self.counts.len() <= depth {
            self.counts.resize(depth + 1, 0);
        }
        self.counts[depth] += 1;
        self.counts.truncate(depth + 1);
        self.counts[depth]
    }

    /// Feeds one block; returns its ordinal when it is an ordered item.
    pub fn observe(&mut self, block: &Block) -> Option<u64> {
        block.kind.is_ordered().then(|| self.advance(block.indent))
    }
}

/// Label for the ordered item `id`, or `None` for any other block.
pub fn number_of(tree: &BlockTree, id: BlockId) -> Option<OrderedLabel> {
    let mut counters = OrderedCounters::new();
    for block in tree.blocks() {
        let ordinal = counters.observe(block);
        if block.id == id {
            return ordinal.map(|n| OrderedLabel {
                label: format_label(n, block.indent),
                depth: block.indent,
            });
        }
    }
    None
}

/// Labels for every ordered item in one pass, in document order.
pub fn labels(tree: &BlockTree) -> Vec<(BlockId, OrderedLabel)> {
    let mut counters = OrderedCounters::new();
    tree.blocks()
        .iter()
        .filter_map(|block| {
            counters.observe(block).map(|n| {
                (
                    block.id,
                    OrderedLabel {
                        label: format_label(n, block.indent),
                        depth: block.indent,
                    },
                )
            })
        })
        .collect()
}

pub fn format_label(n: u64, depth: usize) -> String {
    match depth % 3 {
        0 => n.to_string(),
        1 => to_letters(n),
        _ => to_roman(n),
    }
}

/// Bijective base-26: 1 -> a, 26 -> z, 27 -> aa.
pub fn to_letters(mut n: u64) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

pub fn to_roman(mut n: u64) -> String {
    const NUMERALS: [(u64, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}
