use chrono::{DateTime, Utc};
use log::debug;

use crate::editing::{Cmd, Patch};
use crate::models::{Block, BlockId, BlockTree, Metadata};
use crate::numbering::{self, OrderedLabel};
use crate::{parsing, serialize};

/// An open document: header metadata plus the block tree being edited.
///
/// All structural edits go through [`Document::apply`], which bumps the
/// version whenever a command actually changes something.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    pub(crate) tree: BlockTree,
    /// Incremented on each effective edit
    pub(crate) version: u64,
}

impl Document {
    pub fn new(metadata: Metadata, tree: BlockTree) -> Self {
        Self {
            metadata,
            tree,
            version: 0,
        }
    }

    /// Decodes persisted bytes. Never fails; see [`parsing::parse_document`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        parsing::parse_document(bytes)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serialize::to_bytes(self)
    }

    pub fn serialize_at(&self, now: DateTime<Utc>) -> String {
        serialize::serialize_document_at(self, now)
    }

    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    pub fn blocks(&self) -> &[Block] {
        self.tree.blocks()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_valid(&self) -> bool {
        self.tree.is_valid()
    }

    pub fn number_of(&self, id: BlockId) -> Option<OrderedLabel> {
        numbering::number_of(&self.tree, id)
    }

    /// Apply a command to the document
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let changed = match cmd {
            Cmd::Update { id, patch } => self.tree.update(id, patch).then(|| vec![id]),
            Cmd::InsertAfter { anchor, block } => {
                let id = block.id;
                self.tree.insert_after(anchor, block).then(|| vec![id])
            }
            Cmd::Delete { id } => self.tree.delete(id).then(|| vec![id]),
            Cmd::Indent { id } => self.tree.indent(id).then(|| vec![id]),
            Cmd::Outdent { id } => self.tree.outdent(id).then(|| vec![id]),
            Cmd::MergeWithPrevious { id } => {
                let previous = self.previous_sibling(id);
                self.tree
                    .merge_with_previous(id)
                    .then(|| previous.into_iter().chain([id]).collect())
            }
            Cmd::Move {
                ids,
                target,
                placement,
            } => self.tree.move_blocks(&ids, target, placement).then_some(ids),
            Cmd::CreateChild { parent, block } => {
                let id = block.id;
                self.tree.create_child(parent, block).then(|| vec![parent, id])
            }
            Cmd::Split { id, at } => self.tree.split(id, at).map(|new_id| vec![id, new_id]),
        };

        let changed = changed.unwrap_or_default();
        if !changed.is_empty() {
            self.version += 1;
            debug!("document {} now at version {}", self.metadata.id, self.version);
        }
        Patch {
            changed,
            version: self.version,
        }
    }

    /// Splits a block at byte offset `at`, as when pressing Enter mid-text.
    pub fn split_block(&mut self, id: BlockId, at: usize) -> Patch {
        self.apply(Cmd::Split { id, at })
    }

    fn previous_sibling(&self, id: BlockId) -> Option<BlockId> {
        let position = self.tree.find(id)?;
        let index = position.index().checked_sub(1)?;
        self.tree.siblings(position).get(index).map(|b| b.id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Metadata::fresh(), BlockTree::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{BlockPatch, Placement};
    use crate::models::BlockKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn version_bumps_only_on_change() {
        let mut doc = Document::from_bytes(b"- one\n- two\n");
        let first = doc.blocks()[0].id;

        let patch = doc.apply(Cmd::Outdent { id: first });
        assert!(patch.is_noop());
        assert_eq!(patch.version, 0);

        let patch = doc.apply(Cmd::Indent { id: first });
        assert_eq!(patch.changed, vec![first]);
        assert_eq!(patch.version, 1);
        assert_eq!(doc.version(), 1);

        let patch = doc.apply(Cmd::Delete { id: BlockId::new() });
        assert!(patch.is_noop());
        assert_eq!(doc.version(), 1);
    }

    #[rstest]
    #[case::update(|id| Cmd::Update { id, patch: BlockPatch::text("x") })]
    #[case::insert_after(|anchor| Cmd::InsertAfter { anchor, block: Block::text("x") })]
    #[case::delete(|id| Cmd::Delete { id })]
    #[case::indent(|id| Cmd::Indent { id })]
    #[case::outdent(|id| Cmd::Outdent { id })]
    #[case::merge(|id| Cmd::MergeWithPrevious { id })]
    #[case::move_blocks(|target| Cmd::Move { ids: vec![BlockId::new()], target, placement: Placement::After })]
    #[case::create_child(|parent| Cmd::CreateChild { parent, block: Block::text("x") })]
    #[case::split(|id| Cmd::Split { id, at: 0 })]
    fn unknown_id_is_a_silent_noop(#[case] cmd: fn(BlockId) -> Cmd) {
        let mut doc = Document::from_bytes(b">> Section\n\tchild\n- a\n- b\n");
        let before = doc.tree().clone();

        let patch = doc.apply(cmd(BlockId::new()));

        assert!(patch.is_noop());
        assert_eq!(patch.version, 0);
        assert_eq!(doc.tree(), &before);
    }

    #[test]
    fn merge_reports_both_blocks() {
        let mut doc = Document::from_bytes(b"# Title\n- item\n");
        let title = doc.blocks()[0].id;
        let item = doc.blocks()[1].id;

        let patch = doc.apply(Cmd::MergeWithPrevious { id: item });
        assert_eq!(patch.changed, vec![title, item]);
        assert_eq!(doc.blocks()[0].text, "Titleitem");
    }

    #[test]
    fn split_block_inserts_list_sibling() {
        let mut doc = Document::from_bytes(b"1. first second\n");
        let id = doc.blocks()[0].id;

        let patch = doc.split_block(id, 5);
        assert_eq!(patch.changed.len(), 2);
        assert_eq!(doc.blocks()[1].kind, BlockKind::Ordered);
        assert_eq!(doc.blocks()[1].text, " second");
        assert_eq!(doc.number_of(doc.blocks()[1].id).unwrap().label, "2");
    }

    #[test]
    fn commands_keep_tree_valid() {
        let mut doc = Document::from_bytes(b">> Section\n\tchild\n- a\n- b\n---\n");
        let ids: Vec<BlockId> = doc.blocks().iter().map(|b| b.id).collect();

        doc.apply(Cmd::Move {
            ids: vec![ids[2]],
            target: ids[0],
            placement: Placement::Before,
        });
        doc.apply(Cmd::Update {
            id: ids[0],
            patch: BlockPatch::kind(BlockKind::Bullet),
        });
        doc.apply(Cmd::MergeWithPrevious { id: ids[3] });
        doc.apply(Cmd::Delete { id: ids[1] });

        assert!(doc.is_valid());
        assert_eq!(doc.version(), 4);
    }
}
