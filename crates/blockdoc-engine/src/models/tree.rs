use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockId, BlockKind};

/// Where a block lives in the tree.
///
/// Only toggle sections own children, so a position is at most two levels deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Index into the top-level sequence.
    Top(usize),
    /// `index` into the children of the toggle at top-level index `parent`.
    Child { parent: usize, index: usize },
}

impl Position {
    pub fn index(self) -> usize {
        match self {
            Position::Top(index) | Position::Child { index, .. } => index,
        }
    }

    pub fn is_child(self) -> bool {
        matches!(self, Position::Child { .. })
    }
}

/// The ordered body of a document.
///
/// # Invariants
///
/// - never empty: construction and deletion substitute an empty text block
/// - block ids are unique across top level and children
/// - only toggles have children, and children are never toggles
/// - tables are rectangular
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTree {
    pub(crate) blocks: Vec<Block>,
}

impl BlockTree {
    /// Builds a tree, substituting a single empty block for an empty input.
    pub fn new(blocks: Vec<Block>) -> Self {
        let mut tree = Self { blocks };
        tree.ensure_not_empty();
        tree
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false for trees built through the public API.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn find(&self, id: BlockId) -> Option<Position> {
        for (i, block) in self.blocks.iter().enumerate() {
            if block.id == id {
                return Some(Position::Top(i));
            }
        }
        for (parent, block) in self.blocks.iter().enumerate() {
            if let Some(index) = block.children().iter().position(|c| c.id == id) {
                return Some(Position::Child { parent, index });
            }
        }
        None
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        match self.find(id)? {
            Position::Top(i) => self.blocks.get(i),
            Position::Child { parent, index } => self.blocks.get(parent)?.children().get(index),
        }
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        match self.find(id)? {
            Position::Top(i) => self.blocks.get_mut(i),
            Position::Child { parent, index } => {
                self.blocks.get_mut(parent)?.children_mut()?.get_mut(index)
            }
        }
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.find(id).is_some()
    }

    /// Walks every block in document order, each toggle followed by its children.
    pub fn iter_all(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks
            .iter()
            .flat_map(|b| std::iter::once(b).chain(b.children().iter()))
    }

    pub fn is_valid(&self) -> bool {
        if self.blocks.is_empty() {
            return false;
        }

        let mut seen = HashSet::new();
        if !self.iter_all().all(|b| seen.insert(b.id)) {
            return false;
        }

        self.iter_all().all(|b| match &b.kind {
            BlockKind::Table(table) => table.is_rectangular(),
            BlockKind::Toggle { children, .. } => children.iter().all(|c| !c.kind.is_toggle()),
            _ => true,
        })
    }

    /// The sibling list a position refers to.
    pub(crate) fn siblings_mut(&mut self, position: Position) -> Option<&mut Vec<Block>> {
        match position {
            Position::Top(_) => Some(&mut self.blocks),
            Position::Child { parent, .. } => self.blocks.get_mut(parent)?.children_mut(),
        }
    }

    pub(crate) fn siblings(&self, position: Position) -> &[Block] {
        match position {
            Position::Top(_) => &self.blocks,
            Position::Child { parent, .. } => self
                .blocks
                .get(parent)
                .map(Block::children)
                .unwrap_or(&[]),
        }
    }

    pub(crate) fn ensure_not_empty(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::empty());
        }
    }
}

impl Default for BlockTree {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Block>> for BlockTree {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableData;

    fn toggle(children: Vec<Block>) -> Block {
        Block::new(
            BlockKind::Toggle {
                collapsed: false,
                children,
            },
            "toggle",
        )
    }

    #[test]
    fn empty_tree_gets_placeholder_block() {
        let tree = BlockTree::new(vec![]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.blocks()[0].kind, BlockKind::Text);
        assert!(tree.blocks()[0].text.is_empty());
        assert!(tree.is_valid());
    }

    #[test]
    fn find_locates_top_level_and_children() {
        let child = Block::text("child");
        let child_id = child.id;
        let first = Block::text("first");
        let first_id = first.id;
        let tree = BlockTree::new(vec![first, toggle(vec![Block::text("a"), child])]);

        assert_eq!(tree.find(first_id), Some(Position::Top(0)));
        assert_eq!(
            tree.find(child_id),
            Some(Position::Child {
                parent: 1,
                index: 1
            })
        );
        assert_eq!(tree.get(child_id).map(|b| b.text.as_str()), Some("child"));
        assert_eq!(tree.find(BlockId::new()), None);
    }

    #[test]
    fn iter_all_visits_children_after_their_toggle() {
        let tree = BlockTree::new(vec![
            toggle(vec![Block::text("a"), Block::text("b")]),
            Block::text("c"),
        ]);
        let texts: Vec<_> = tree.iter_all().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["toggle", "a", "b", "c"]);
    }

    #[test]
    fn duplicate_ids_are_invalid() {
        let block = Block::text("x");
        let tree = BlockTree::new(vec![block.clone(), block]);
        assert!(!tree.is_valid());
    }

    #[test]
    fn duplicate_id_between_child_and_top_level_is_invalid() {
        let block = Block::text("x");
        let tree = BlockTree::new(vec![block.clone(), toggle(vec![block])]);
        assert!(!tree.is_valid());
    }

    #[test]
    fn nested_toggle_is_invalid() {
        let tree = BlockTree::new(vec![toggle(vec![toggle(vec![])])]);
        assert!(!tree.is_valid());
    }

    #[test]
    fn ragged_table_cannot_be_built() {
        let table = TableData::new(vec![vec!["a".into(), "b".into()], vec![]]);
        let tree = BlockTree::new(vec![Block::new(BlockKind::Table(table), "")]);
        assert!(tree.is_valid());
    }

    #[test]
    fn hand_emptied_tree_is_invalid() {
        let mut tree = BlockTree::default();
        tree.blocks.clear();
        assert!(!tree.is_valid());
    }
}
