use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::editing::{Block, BlockKind, Document, Key, MarkKind, Point, Selection};

const INITIAL_VALUE_JSON: &str = include_str!("../../assets/initial_value.json");

/// Persisted shape of a value: the document only. Selection and pending
/// marks are session state and are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct StoredValue {
    document: Document,
}

/// Current editor value: document, selection and pending marks.
///
/// The editor replaces its `Value` wholesale on every change; nothing
/// outside `editing` mutates a value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub(crate) document: Document,
    pub(crate) selection: Selection,
    /// Marks the next insertion uses while the selection is collapsed.
    /// `None` means "take them from the text at the caret".
    pub(crate) pending_marks: Option<BTreeSet<MarkKind>>,
}

impl Value {
    /// Wrap a document, placing the caret at the start of its first block
    pub fn new(mut document: Document) -> Self {
        document.normalize();
        let first = document.leaf_keys()[0];
        Self {
            document,
            selection: Selection::at_start_of(first),
            pending_marks: None,
        }
    }

    /// Deserialize a persisted snapshot. Fresh keys are generated.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let stored: StoredValue = serde_json::from_str(json)?;
        let mut document = stored.document;
        document.fresh_keys();
        Ok(Self::new(document))
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        let stored = StoredValue {
            document: self.document.clone(),
        };
        Ok(serde_json::to_string(&stored)?)
    }

    /// Built-in document used when nothing has been saved yet
    pub fn initial() -> Self {
        Self::from_json(INITIAL_VALUE_JSON).unwrap_or_else(|e| {
            log::error!("Bundled initial value is invalid: {e}");
            Self::new(Document::default())
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Selection endpoints in document order
    pub fn ordered_points(&self) -> (Point, Point) {
        let Selection { anchor, focus } = self.selection;
        let position = |point: Point| {
            (
                self.document.leaf_index(point.key).unwrap_or(usize::MAX),
                point.offset,
            )
        };
        if position(anchor) <= position(focus) {
            (anchor, focus)
        } else {
            (focus, anchor)
        }
    }

    /// Leaf blocks touched by the selection, in document order
    pub fn selected_blocks(&self) -> Vec<&Block> {
        let (start, end) = self.ordered_points();
        let leaves = self.document.leaf_blocks();
        let first = leaves.iter().position(|b| b.key == start.key);
        let last = leaves.iter().position(|b| b.key == end.key);
        match (first, last) {
            (Some(first), Some(last)) => leaves[first..=last].to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn first_block(&self) -> Option<&Block> {
        self.selected_blocks().into_iter().next()
    }

    /// Marks common to the whole selection, or the pending set at a caret
    pub fn active_marks(&self) -> BTreeSet<MarkKind> {
        if self.selection.is_collapsed() {
            if let Some(pending) = &self.pending_marks {
                return pending.clone();
            }
            let point = self.selection.focus;
            return self
                .document
                .block(point.key)
                .and_then(Block::text)
                .map(|text| text.marks_at(point.offset))
                .unwrap_or_default();
        }

        let (start, end) = self.ordered_points();
        let mut shared: Option<BTreeSet<MarkKind>> = None;
        for block in self.selected_blocks() {
            if block.is_void() {
                continue;
            }
            let Some(text) = block.text() else {
                continue;
            };
            let from = if block.key == start.key { start.offset } else { 0 };
            let to = if block.key == end.key { end.offset } else { text.len() };
            if let Some(marks) = text.marks_across(from..to) {
                shared = Some(match shared {
                    None => marks,
                    Some(acc) => acc.intersection(&marks).cloned().collect(),
                });
            }
        }
        shared.unwrap_or_default()
    }

    pub fn has_mark(&self, mark: &MarkKind) -> bool {
        self.active_marks().contains(mark)
    }

    pub fn has_block(&self, kind: &BlockKind) -> bool {
        self.selected_blocks().iter().any(|b| &b.kind == kind)
    }

    /// Every leaf block in the document
    pub fn block_count(&self) -> usize {
        self.document.leaf_blocks().len()
    }

    /// Leaf blocks under the parent of the first selected block.
    ///
    /// Differs from [`Value::block_count`] inside containers; list-aware
    /// toolbar controls use this one.
    pub fn list_scope_block_count(&self) -> usize {
        self.first_block()
            .and_then(|block| self.document.parent_of(block.key))
            .map(|parent| parent.leaf_block_count())
            .unwrap_or_else(|| self.block_count())
    }

    /// Restore a valid caret after a structural edit removed its block
    pub(crate) fn repair_selection(&mut self) {
        let leaves = self.document.leaf_keys();
        let clamp = |point: Point, document: &Document| -> Option<Point> {
            let block = document.block(point.key)?;
            block
                .is_leaf()
                .then(|| Point::new(point.key, point.offset.min(block.text_len())))
        };
        match (
            clamp(self.selection.anchor, &self.document),
            clamp(self.selection.focus, &self.document),
        ) {
            (Some(anchor), Some(focus)) => self.selection = Selection::range(anchor, focus),
            (Some(point), None) | (None, Some(point)) => {
                self.selection = Selection::collapsed(point)
            }
            (None, None) => {
                self.selection = Selection::at_start_of(leaves[0]);
                self.pending_marks = None;
            }
        }
    }

    pub(crate) fn contains_leaf(&self, key: Key) -> bool {
        self.document.block(key).is_some_and(Block::is_leaf)
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::initial()
    }
}
