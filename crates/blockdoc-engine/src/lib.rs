pub mod editing;
pub mod io;
pub mod models;
pub mod numbering;
pub mod parsing;
pub mod serialize;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{BlockPatch, Cmd, Document, Patch, Placement, format_outline};
pub use io::*;
pub use models::{Block, BlockId, BlockKind, BlockTree, HeadingLevel, MetaValue, Metadata, Position, TableData};
pub use numbering::{OrderedLabel, labels, number_of};
pub use parsing::parse_document;
pub use serialize::{serialize_document, serialize_document_at};
