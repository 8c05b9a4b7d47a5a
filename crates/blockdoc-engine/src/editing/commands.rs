use std::collections::HashSet;

use log::trace;

use crate::models::{Block, BlockId, BlockKind, BlockTree, Position, TableData};

/// Field-level changes for [`BlockTree::update`]. `None` leaves a field alone.
///
/// `checked`, `language`, `collapsed` and `table` only apply when the block
/// (after any kind change) is of the matching kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub kind: Option<BlockKind>,
    pub text: Option<String>,
    pub indent: Option<usize>,
    pub checked: Option<bool>,
    pub language: Option<String>,
    pub collapsed: Option<bool>,
    pub table: Option<TableData>,
}

impl BlockPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn kind(kind: BlockKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Which side of the target moved blocks land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    Update {
        id: BlockId,
        patch: BlockPatch,
    },
    InsertAfter {
        anchor: BlockId,
        block: Block,
    },
    Delete {
        id: BlockId,
    },
    Indent {
        id: BlockId,
    },
    Outdent {
        id: BlockId,
    },
    MergeWithPrevious {
        id: BlockId,
    },
    Move {
        ids: Vec<BlockId>,
        target: BlockId,
        placement: Placement,
    },
    CreateChild {
        parent: BlockId,
        block: Block,
    },
    /// Splits a block's text at a byte offset (the Enter key).
    Split {
        id: BlockId,
        at: usize,
    },
}

impl BlockTree {
    pub fn update(&mut self, id: BlockId, patch: BlockPatch) -> bool {
        let Some(position) = self.find(id) else {
            trace!("update: no block {id}");
            return false;
        };
        if position.is_child() && patch.kind.as_ref().is_some_and(BlockKind::is_toggle) {
            trace!("update: child {id} cannot become a toggle");
            return false;
        }
        // A toggle keeps its own children on a kind change, so only a
        // non-toggle adopts the incoming ones.
        if let Some(BlockKind::Toggle { children, .. }) = &patch.kind
            && self.get(id).is_some_and(|b| !b.kind.is_toggle())
            && self.clashes(children)
        {
            trace!("update: children for {id} reuse existing ids");
            return false;
        }
        let Some(block) = self.get_mut(id) else {
            return false;
        };

        let before = block.clone();
        let released = match patch.kind {
            Some(kind) => change_kind(block, kind),
            None => Vec::new(),
        };
        if let Some(text) = patch.text {
            block.text = text;
        }
        if let Some(indent) = patch.indent {
            block.indent = indent;
        }
        match &mut block.kind {
            BlockKind::Checklist { checked } => {
                if let Some(value) = patch.checked {
                    *checked = value;
                }
            }
            BlockKind::Code { language } => {
                if let Some(value) = patch.language {
                    *language = value;
                }
            }
            BlockKind::Toggle { collapsed, .. } => {
                if let Some(value) = patch.collapsed {
                    *collapsed = value;
                }
            }
            BlockKind::Table(table) => {
                if let Some(value) = patch.table {
                    *table = TableData::new(value.rows().to_vec());
                }
            }
            _ => {}
        }

        let changed = *block != before || !released.is_empty();
        let indent = block.indent;
        self.release_after(position, indent, released);
        changed
    }

    pub fn insert_after(&mut self, anchor: BlockId, block: Block) -> bool {
        if self.clashes(std::iter::once(&block).chain(block.children())) {
            trace!("insert_after: block {} already present", block.id);
            return false;
        }
        let Some(position) = self.find(anchor) else {
            trace!("insert_after: no anchor {anchor}");
            return false;
        };
        if position.is_child() && block.kind.is_toggle() {
            trace!("insert_after: toggles cannot be children");
            return false;
        }
        let Some(siblings) = self.siblings_mut(position) else {
            return false;
        };
        siblings.insert(position.index() + 1, without_nested_toggles(block));
        true
    }

    pub fn delete(&mut self, id: BlockId) -> bool {
        let Some(position) = self.find(id) else {
            trace!("delete: no block {id}");
            return false;
        };
        let removed = self.remove_at(position).is_some();
        self.ensure_not_empty();
        removed
    }

    pub fn indent(&mut self, id: BlockId) -> bool {
        match self.get_mut(id) {
            Some(block) => {
                block.indent += 1;
                true
            }
            None => {
                trace!("indent: no block {id}");
                false
            }
        }
    }

    pub fn outdent(&mut self, id: BlockId) -> bool {
        match self.get_mut(id) {
            Some(block) if block.indent > 0 => {
                block.indent -= 1;
                true
            }
            Some(_) => false,
            None => {
                trace!("outdent: no block {id}");
                false
            }
        }
    }

    /// Appends the block's text to its previous sibling and removes it.
    pub fn merge_with_previous(&mut self, id: BlockId) -> bool {
        let Some(position) = self.find(id) else {
            trace!("merge: no block {id}");
            return false;
        };
        let index = position.index();
        if index == 0 {
            return false;
        }
        if self.siblings(position)[index - 1].kind.is_divider() {
            trace!("merge: previous sibling of {id} is a divider");
            return false;
        }

        let Some(mut removed) = self.remove_at(position) else {
            return false;
        };
        let released = removed.take_children();
        let Some(previous) = self
            .siblings_mut(position)
            .and_then(|siblings| siblings.get_mut(index - 1))
        else {
            return false;
        };
        previous.text.push_str(&removed.text);

        let previous_position = match position {
            Position::Top(_) => Position::Top(index - 1),
            Position::Child { parent, .. } => Position::Child {
                parent,
                index: index - 1,
            },
        };
        self.release_after(previous_position, removed.indent, released);
        true
    }

    /// Moves blocks as one contiguous run next to `target`, keeping their
    /// document order. Children of a moved toggle travel with it.
    pub fn move_blocks(&mut self, ids: &[BlockId], target: BlockId, placement: Placement) -> bool {
        if ids.contains(&target) {
            trace!("move: target {target} is itself being moved");
            return false;
        }
        let Some(target_position) = self.find(target) else {
            trace!("move: no target {target}");
            return false;
        };
        if let Position::Child { parent, .. } = target_position {
            let parent_id = self.blocks[parent].id;
            if ids.contains(&parent_id) {
                trace!("move: target {target} sits inside a moved toggle");
                return false;
            }
        }

        // Document order; a child whose toggle also moves goes along with it.
        let mut moving: Vec<BlockId> = Vec::new();
        for block in &self.blocks {
            if ids.contains(&block.id) {
                moving.push(block.id);
                continue;
            }
            moving.extend(
                block
                    .children()
                    .iter()
                    .filter(|c| ids.contains(&c.id))
                    .map(|c| c.id),
            );
        }
        if moving.is_empty() {
            trace!("move: none of the blocks exist");
            return false;
        }
        if target_position.is_child()
            && moving
                .iter()
                .any(|id| self.get(*id).is_some_and(|b| b.kind.is_toggle()))
        {
            trace!("move: toggles cannot land among children");
            return false;
        }

        let before = self.blocks.clone();
        let mut run = Vec::with_capacity(moving.len());
        for id in moving {
            if let Some(position) = self.find(id)
                && let Some(block) = self.remove_at(position)
            {
                run.push(block);
            }
        }

        let Some(position) = self.find(target) else {
            self.blocks = before;
            return false;
        };
        let at = match placement {
            Placement::Before => position.index(),
            Placement::After => position.index() + 1,
        };
        let Some(siblings) = self.siblings_mut(position) else {
            self.blocks = before;
            return false;
        };
        siblings.splice(at..at, run);
        self.blocks != before
    }

    /// Appends a child to a toggle and expands it.
    pub fn create_child(&mut self, toggle: BlockId, block: Block) -> bool {
        if block.kind.is_toggle() {
            trace!("create_child: toggles cannot be children");
            return false;
        }
        if self.contains(block.id) {
            trace!("create_child: block {} already present", block.id);
            return false;
        }
        let Some(parent) = self.get_mut(toggle) else {
            trace!("create_child: no block {toggle}");
            return false;
        };
        match &mut parent.kind {
            BlockKind::Toggle {
                collapsed,
                children,
            } => {
                children.push(block);
                *collapsed = false;
                true
            }
            _ => {
                trace!("create_child: {toggle} is not a toggle");
                false
            }
        }
    }

    /// Splits the block's text at byte offset `at` (clamped to the text and
    /// moved back to a char boundary). The tail goes into a new sibling that
    /// continues list kinds and is plain text otherwise. Returns the new id.
    ///
    /// Code, tables and embeds are not split.
    pub fn split(&mut self, id: BlockId, at: usize) -> Option<BlockId> {
        let Some(block) = self.get_mut(id) else {
            trace!("split: no block {id}");
            return None;
        };
        let kind = match &block.kind {
            BlockKind::Bullet => BlockKind::Bullet,
            BlockKind::Ordered => BlockKind::Ordered,
            BlockKind::Checklist { .. } => BlockKind::Checklist { checked: false },
            BlockKind::Code { .. }
            | BlockKind::Table(_)
            | BlockKind::ImageEmbed { .. }
            | BlockKind::FileEmbed { .. } => {
                trace!("split: {} blocks are not split", block.kind.name());
                return None;
            }
            _ => BlockKind::Text,
        };

        let mut at = at.min(block.text.len());
        while !block.text.is_char_boundary(at) {
            at -= 1;
        }
        let tail = block.text.split_off(at);
        let next = Block::new(kind, tail).with_indent(block.indent);
        let next_id = next.id;
        self.insert_after(id, next).then_some(next_id)
    }

    /// Whether any incoming block reuses an id from the tree or from
    /// another incoming block.
    fn clashes<'a>(&self, incoming: impl IntoIterator<Item = &'a Block>) -> bool {
        let mut seen = HashSet::new();
        incoming
            .into_iter()
            .any(|b| !seen.insert(b.id) || self.contains(b.id))
    }

    fn remove_at(&mut self, position: Position) -> Option<Block> {
        let siblings = self.siblings_mut(position)?;
        let index = position.index();
        (index < siblings.len()).then(|| siblings.remove(index))
    }

    /// Reinserts children taken out of a toggle as top-level blocks following
    /// `position`, keeping the depth they were written at.
    fn release_after(&mut self, position: Position, toggle_indent: usize, released: Vec<Block>) {
        if released.is_empty() {
            return;
        }
        let at = match position {
            Position::Top(index) => index + 1,
            Position::Child { parent, .. } => parent + 1,
        };
        let released = released.into_iter().map(|child| {
            let indent = toggle_indent + 1 + child.indent;
            child.with_indent(indent)
        });
        self.blocks.splice(at..at, released);
    }
}

/// Replaces the kind, returning children that no longer have a toggle to
/// live in. A toggle turned into a toggle keeps its existing children.
fn change_kind(block: &mut Block, mut kind: BlockKind) -> Vec<Block> {
    let old_children = block.take_children();
    match &mut kind {
        BlockKind::Toggle { children, .. } => {
            if block.kind.is_toggle() {
                *children = old_children;
            } else {
                children.retain(|c| !c.kind.is_toggle());
            }
            block.kind = kind;
            Vec::new()
        }
        _ => {
            block.kind = kind;
            old_children
        }
    }
}

fn without_nested_toggles(mut block: Block) -> Block {
    if let Some(children) = block.children_mut() {
        children.retain(|c| !c.kind.is_toggle());
    }
    block
}
