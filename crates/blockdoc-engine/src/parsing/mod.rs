pub mod blocks;
pub mod header;

#[cfg(test)]
mod tests;

use crate::editing::Document;
use crate::models::{Block, BlockTree, Metadata};

use blocks::{BlockBuilder, LineClassifier};

/// Decodes a persisted document.
///
/// Total over arbitrary input: invalid UTF-8 is replaced, unknown lines
/// become plain text and a missing header yields fresh metadata.
pub fn parse_document(bytes: &[u8]) -> Document {
    let text = String::from_utf8_lossy(bytes);
    let (header, body) = header::split_header(&text);

    let metadata = match header {
        Some(lines) => header::parse_header(&lines),
        None => Metadata::fresh(),
    };

    Document::new(metadata, BlockTree::new(parse_blocks(body)))
}

/// Decodes a document body (no header handling) into top-level blocks.
pub fn parse_blocks(body: &str) -> Vec<Block> {
    let classifier = LineClassifier;
    let mut builder = BlockBuilder::new();

    for line in body.lines() {
        let lc = classifier.classify(line);
        builder.push(&lc);
    }

    builder.finish()
}
