pub mod block;
pub mod metadata;
pub mod tree;

pub use block::{Block, BlockId, BlockKind, HeadingLevel, TableData};
pub use metadata::{MetaValue, Metadata, timestamp};
pub use tree::{BlockTree, Position};
