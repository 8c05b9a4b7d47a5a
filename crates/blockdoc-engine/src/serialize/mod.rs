//! Block tree to text.
//!
//! Every block has exactly one canonical form, so encoding is a plain walk
//! over the top-level sequence. The header is always written and the output
//! ends with a newline.

pub mod blocks;
pub mod header;

use chrono::{DateTime, Utc};

use crate::editing::Document;
use crate::models::timestamp;

/// Encodes a document, stamping `updated_at` with the current time.
pub fn serialize_document(doc: &Document) -> String {
    serialize_document_at(doc, Utc::now())
}

/// Encodes a document with an explicit `updated_at`.
pub fn serialize_document_at(doc: &Document, now: DateTime<Utc>) -> String {
    let mut lines = Vec::new();
    header::write_header(&mut lines, &doc.metadata, &timestamp(now));
    blocks::write_blocks(&mut lines, doc.tree.blocks());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn to_bytes(doc: &Document) -> Vec<u8> {
    serialize_document(doc).into_bytes()
}
