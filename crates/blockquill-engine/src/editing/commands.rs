//! Edit commands and how they change a [`Value`].
//!
//! Every command is applied atomically by [`crate::editing::Editor::apply`],
//! which normalizes the document and repairs the selection afterwards.

use std::collections::BTreeMap;

use crate::editing::{
    Block, BlockKind, Content, DEFAULT_BLOCK, EditError, Key, Leaf, MarkKind, Point, Selection,
    Text, Value,
};

/// Properties of a block created by [`Cmd::InsertBlock`]
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDescriptor {
    pub kind: BlockKind,
    pub data: BTreeMap<String, String>,
}

impl BlockDescriptor {
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Image,
            data: BTreeMap::from([("src".to_string(), src.into())]),
        }
    }

    fn build(&self) -> Block {
        let mut block = Block::leaf(self.kind.clone(), Text::default());
        block.data = self.data.clone();
        block
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Re-tag every selected leaf block
    SetBlocks(BlockKind),
    /// Wrap the selected blocks in a new container of this kind
    WrapBlock(BlockKind),
    /// Lift the selected blocks out of their closest container of this kind
    UnwrapBlock(BlockKind),
    ToggleMark(MarkKind),
    InsertBlock(BlockDescriptor),
    InsertText(String),
    /// Default Enter
    SplitBlock,
    /// Default Backspace
    DeleteBackward,
    /// Default Delete
    DeleteForward,
    Select(Selection),
    /// Arrow keys: move the focus one step, dragging the anchor along
    /// unless `extend` is set
    MoveFocus { direction: Direction, extend: bool },
}

/// Caret movement: by character left and right, by block up and down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

pub(crate) fn apply_command(value: &mut Value, cmd: &Cmd) -> Result<(), EditError> {
    match cmd {
        Cmd::SetBlocks(kind) => set_blocks(value, kind),
        Cmd::WrapBlock(kind) => wrap_block(value, kind),
        Cmd::UnwrapBlock(kind) => unwrap_block(value, kind),
        Cmd::ToggleMark(mark) => toggle_mark(value, mark),
        Cmd::InsertBlock(descriptor) => insert_block(value, descriptor),
        Cmd::InsertText(text) => insert_text(value, text),
        Cmd::SplitBlock => split_block(value),
        Cmd::DeleteBackward => delete_backward(value),
        Cmd::DeleteForward => delete_forward(value),
        Cmd::Select(selection) => select(value, *selection)?,
        Cmd::MoveFocus { direction, extend } => move_focus(value, *direction, *extend),
    }
    Ok(())
}

fn selected_keys(value: &Value) -> Vec<Key> {
    value.selected_blocks().iter().map(|b| b.key).collect()
}

fn set_blocks(value: &mut Value, kind: &BlockKind) {
    for key in selected_keys(value) {
        if let Some(block) = value.document.block_mut(key) {
            block.kind = kind.clone();
        }
    }
}

fn wrap_block(value: &mut Value, kind: &BlockKind) {
    let keys = selected_keys(value);
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return;
    };
    let (Some(first), Some(last)) = (
        value.document.path_of(*first),
        value.document.path_of(*last),
    ) else {
        return;
    };

    // Deepest node containing both ends, and the child range under it
    let mut shared = 0;
    while shared + 1 < first.len().min(last.len()) && first[shared] == last[shared] {
        shared += 1;
    }
    let (parent_path, start, end) = if first == last {
        (&first[..first.len() - 1], first[first.len() - 1], first[first.len() - 1])
    } else {
        (&first[..shared], first[shared], last[shared])
    };

    let Some(children) = value.document.children_at_mut(parent_path) else {
        return;
    };
    let wrapped: Vec<Block> = children.drain(start..=end).collect();
    children.insert(start, Block::container(kind.clone(), wrapped));
}

fn unwrap_block(value: &mut Value, kind: &BlockKind) {
    let keys = selected_keys(value);
    let mut wrappers: Vec<Key> = Vec::new();
    for key in &keys {
        if let Some(wrapper) = value.document.closest(*key, |b| &b.kind == kind)
            && !wrappers.contains(&wrapper.key)
        {
            wrappers.push(wrapper.key);
        }
    }

    for wrapper_key in wrappers {
        let Some(path) = value.document.path_of(wrapper_key) else {
            continue;
        };
        let Some(wrapper) = value.document.node_at(&path) else {
            continue;
        };
        let touched: Vec<usize> = wrapper
            .children()
            .iter()
            .enumerate()
            .filter(|(_, child)| {
                keys.iter()
                    .any(|key| child.key == *key || child.leaf_blocks().iter().any(|l| l.key == *key))
            })
            .map(|(index, _)| index)
            .collect();
        let (Some(&first), Some(&last)) = (touched.first(), touched.last()) else {
            continue;
        };

        let Some((&index, parent_path)) = path.split_last() else {
            continue;
        };
        let Some(parent) = value.document.children_at_mut(parent_path) else {
            continue;
        };
        let Block {
            key: wrapper_key,
            kind: wrapper_kind,
            data,
            content,
        } = parent.remove(index);
        let mut before = match content {
            Content::Nodes(nodes) => nodes,
            leaves @ Content::Leaves(_) => {
                parent.insert(
                    index,
                    Block {
                        key: wrapper_key,
                        kind: wrapper_kind,
                        data,
                        content: leaves,
                    },
                );
                continue;
            }
        };
        let after = before.split_off(last + 1);
        let lifted = before.split_off(first);

        // The wrapper's identity stays with whichever half survives first
        let mut replacement = Vec::with_capacity(lifted.len() + 2);
        let keep_key = before.is_empty();
        if !before.is_empty() {
            replacement.push(Block {
                key: wrapper_key,
                kind: wrapper_kind.clone(),
                data: data.clone(),
                content: Content::Nodes(before),
            });
        }
        replacement.extend(lifted);
        if !after.is_empty() {
            replacement.push(Block {
                key: if keep_key { wrapper_key } else { Key::generate() },
                kind: wrapper_kind,
                data,
                content: Content::Nodes(after),
            });
        }
        parent.splice(index..index, replacement);
    }
}

fn toggle_mark(value: &mut Value, mark: &MarkKind) {
    let mut active = value.active_marks();
    let on = !active.contains(mark);

    if value.selection.is_collapsed() {
        if on {
            active.insert(mark.clone());
        } else {
            active.remove(mark);
        }
        value.pending_marks = Some(active);
        return;
    }

    let (start, end) = value.ordered_points();
    for key in selected_keys(value) {
        let Some(block) = value.document.block_mut(key) else {
            continue;
        };
        if block.is_void() {
            continue;
        }
        let Some(text) = block.text_mut() else {
            continue;
        };
        let from = if key == start.key { start.offset } else { 0 };
        let to = if key == end.key { end.offset } else { text.len() };
        text.set_mark(from..to, mark, on);
    }
}

fn insert_block(value: &mut Value, descriptor: &BlockDescriptor) {
    delete_expanded(value);
    let point = value.selection.focus;
    let Some(current) = value.document.block(point.key) else {
        return;
    };

    let block = descriptor.build();
    let new_key = block.key;
    let len = current.text_len();
    let inserted = if current.is_void() || len == 0 || point.offset >= len {
        value.document.insert_after(point.key, block)
    } else if point.offset == 0 {
        value.document.insert_before(point.key, block)
    } else {
        split_at(value, point);
        value.document.insert_after(point.key, block)
    };

    if inserted {
        let end = value.document.block(new_key).map_or(0, Block::text_len);
        value.selection = Selection::collapsed(Point::new(new_key, end));
    }
}

fn insert_text(value: &mut Value, text: &str) {
    if text.is_empty() {
        return;
    }
    delete_expanded(value);
    let point = value.selection.focus;
    let pending = value.pending_marks.clone();
    let Some(block) = value.document.block_mut(point.key) else {
        return;
    };

    if block.is_void() {
        let paragraph = Block::leaf(
            DEFAULT_BLOCK,
            Text::from_leaves(vec![Leaf {
                text: text.to_string(),
                marks: pending.unwrap_or_default(),
            }]),
        );
        let key = paragraph.key;
        if value.document.insert_after(point.key, paragraph) {
            value.selection = Selection::collapsed(Point::new(key, text.chars().count()));
        }
        return;
    }

    let Some(content) = block.text_mut() else {
        return;
    };
    let marks = pending.unwrap_or_else(|| content.marks_at(point.offset));
    content.insert(point.offset, text, marks);
    value.selection = Selection::collapsed(Point::new(
        point.key,
        point.offset + text.chars().count(),
    ));
}

fn split_block(value: &mut Value) {
    delete_expanded(value);
    let point = value.selection.focus;
    let Some(block) = value.document.block(point.key) else {
        return;
    };

    if block.is_void() {
        let paragraph = Block::paragraph("");
        let key = paragraph.key;
        if value.document.insert_after(point.key, paragraph) {
            value.selection = Selection::at_start_of(key);
        }
        return;
    }

    if let Some(key) = split_at(value, point) {
        value.selection = Selection::at_start_of(key);
    }
}

/// Split the leaf at `point`, returning the key of the new second half
fn split_at(value: &mut Value, point: Point) -> Option<Key> {
    let block = value.document.block_mut(point.key)?;
    let tail = block.text_mut()?.split_off(point.offset);
    let mut second = Block::leaf(block.kind.clone(), tail);
    second.data = block.data.clone();
    let key = second.key;
    value.document.insert_after(point.key, second).then_some(key)
}

fn delete_backward(value: &mut Value) {
    if delete_expanded(value) {
        return;
    }
    let point = value.selection.focus;
    let Some(block) = value.document.block(point.key) else {
        return;
    };
    let leaves = value.document.leaf_keys();
    let Some(index) = leaves.iter().position(|k| *k == point.key) else {
        return;
    };

    if block.is_void() {
        let target = match index.checked_sub(1).map(|i| leaves[i]) {
            Some(prev) => Point::new(prev, text_len(value, prev)),
            None => leaves
                .get(index + 1)
                .map_or(point, |next| Point::new(*next, 0)),
        };
        value.document.remove(point.key);
        value.selection = Selection::collapsed(target);
        return;
    }

    if point.offset > 0 {
        if let Some(text) = value.document.block_mut(point.key).and_then(Block::text_mut) {
            text.remove(point.offset - 1..point.offset);
        }
        value.selection = Selection::collapsed(Point::new(point.key, point.offset - 1));
        return;
    }

    let Some(prev) = index.checked_sub(1).map(|i| leaves[i]) else {
        return;
    };
    if value.document.block(prev).is_some_and(Block::is_void) {
        value.document.remove(prev);
        return;
    }
    let joint = text_len(value, prev);
    merge_into(value, point.key, prev);
    value.selection = Selection::collapsed(Point::new(prev, joint));
}

fn delete_forward(value: &mut Value) {
    if delete_expanded(value) {
        return;
    }
    let point = value.selection.focus;
    let Some(block) = value.document.block(point.key) else {
        return;
    };
    let leaves = value.document.leaf_keys();
    let Some(index) = leaves.iter().position(|k| *k == point.key) else {
        return;
    };

    if block.is_void() {
        let target = match leaves.get(index + 1) {
            Some(next) => Point::new(*next, 0),
            None => index
                .checked_sub(1)
                .map_or(point, |i| Point::new(leaves[i], text_len(value, leaves[i]))),
        };
        value.document.remove(point.key);
        value.selection = Selection::collapsed(target);
        return;
    }

    if point.offset < block.text_len() {
        if let Some(text) = value.document.block_mut(point.key).and_then(Block::text_mut) {
            text.remove(point.offset..point.offset + 1);
        }
        return;
    }

    let Some(next) = leaves.get(index + 1).copied() else {
        return;
    };
    if value.document.block(next).is_some_and(Block::is_void) {
        value.document.remove(next);
        return;
    }
    merge_into(value, next, point.key);
}

/// Move the text of `from` onto the end of `into` and drop `from`
fn merge_into(value: &mut Value, from: Key, into: Key) {
    let Some(removed) = value.document.remove(from) else {
        return;
    };
    let Content::Leaves(text) = removed.content else {
        return;
    };
    if let Some(target) = value.document.block_mut(into).and_then(Block::text_mut) {
        target.append(text);
    }
}

fn text_len(value: &Value, key: Key) -> usize {
    value.document.block(key).map_or(0, Block::text_len)
}

/// Delete the selected range if it is expanded; returns whether it was
fn delete_expanded(value: &mut Value) -> bool {
    if value.selection.is_collapsed() {
        return false;
    }
    let (start, end) = value.ordered_points();
    value.selection = Selection::collapsed(start);

    if start.key == end.key {
        if let Some(text) = value.document.block_mut(start.key).and_then(Block::text_mut) {
            text.remove(start.offset..end.offset);
        }
        return true;
    }

    let leaves = value.document.leaf_keys();
    let (Some(first), Some(last)) = (
        leaves.iter().position(|k| *k == start.key),
        leaves.iter().position(|k| *k == end.key),
    ) else {
        return true;
    };
    for key in &leaves[first + 1..last] {
        value.document.remove(*key);
    }

    let start_void = value.document.block(start.key).is_some_and(Block::is_void);
    let end_void = value.document.block(end.key).is_some_and(Block::is_void);
    match (start_void, end_void) {
        (false, _) => {
            if let Some(text) = value.document.block_mut(start.key).and_then(Block::text_mut) {
                text.split_off(start.offset);
            }
            if end_void {
                value.document.remove(end.key);
            } else {
                if let Some(text) = value.document.block_mut(end.key).and_then(Block::text_mut) {
                    text.remove(0..end.offset);
                }
                merge_into(value, end.key, start.key);
            }
        }
        (true, false) => {
            value.document.remove(start.key);
            if let Some(text) = value.document.block_mut(end.key).and_then(Block::text_mut) {
                text.remove(0..end.offset);
            }
            value.selection = Selection::at_start_of(end.key);
        }
        (true, true) => {
            let next = leaves.get(last + 1).copied();
            value.document.remove(start.key);
            value.document.remove(end.key);
            if let Some(next) = next {
                value.selection = Selection::at_start_of(next);
            }
        }
    }
    true
}

fn move_focus(value: &mut Value, direction: Direction, extend: bool) {
    let selection = value.selection;
    if !extend
        && !selection.is_collapsed()
        && matches!(direction, Direction::Left | Direction::Right)
    {
        // Collapse onto the edge the arrow points at
        let (start, end) = value.ordered_points();
        let edge = if direction == Direction::Left { start } else { end };
        value.selection = Selection::collapsed(edge);
        value.pending_marks = None;
        return;
    }

    let focus = selection.focus;
    let leaves = value.document.leaf_keys();
    let Some(index) = leaves.iter().position(|k| *k == focus.key) else {
        return;
    };
    let len = text_len(value, focus.key);
    let target = match direction {
        Direction::Left if focus.offset > 0 => Point::new(focus.key, focus.offset - 1),
        Direction::Left => index
            .checked_sub(1)
            .map_or(focus, |i| Point::new(leaves[i], text_len(value, leaves[i]))),
        Direction::Right if focus.offset < len => Point::new(focus.key, focus.offset + 1),
        Direction::Right => leaves.get(index + 1).map_or(focus, |next| Point::new(*next, 0)),
        Direction::Up => index.checked_sub(1).map_or(Point::new(focus.key, 0), |i| {
            Point::new(leaves[i], focus.offset.min(text_len(value, leaves[i])))
        }),
        Direction::Down => leaves.get(index + 1).map_or(Point::new(focus.key, len), |next| {
            Point::new(*next, focus.offset.min(text_len(value, *next)))
        }),
    };

    value.selection = if extend {
        Selection::range(selection.anchor, target)
    } else {
        Selection::collapsed(target)
    };
    value.pending_marks = None;
}

fn select(value: &mut Value, selection: Selection) -> Result<(), EditError> {
    for point in [selection.anchor, selection.focus] {
        if !value.contains_leaf(point.key) {
            return Err(EditError::UnknownKey(point.key));
        }
    }
    value.selection = selection;
    value.pending_marks = None;
    Ok(())
}
