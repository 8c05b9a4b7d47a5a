use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Patch {
    /// Blocks created, removed or modified by the command. Empty for a no-op.
    pub changed: Vec<BlockId>,
    pub version: u64,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
