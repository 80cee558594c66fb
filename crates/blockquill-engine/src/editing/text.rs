use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

use crate::editing::MarkKind;

/// A run of text sharing one mark set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub marks: BTreeSet<MarkKind>,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: BTreeSet::new(),
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: impl IntoIterator<Item = MarkKind>) -> Self {
        Self {
            text: text.into(),
            marks: marks.into_iter().collect(),
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Text content of a leaf block.
///
/// All offsets are char offsets. After every mutation the leaves are
/// normalized: empty leaves dropped, neighbours with equal marks merged,
/// and at least one (possibly empty) leaf kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Text(Vec<Leaf>);

impl Default for Text {
    fn default() -> Self {
        Self(vec![Leaf::default()])
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(vec![Leaf::new(text)])
    }

    pub fn from_leaves(leaves: Vec<Leaf>) -> Self {
        let mut text = Self(leaves);
        text.normalize();
        text
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(Leaf::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|leaf| leaf.text.is_empty())
    }

    pub fn plain(&self) -> String {
        self.0.iter().map(|leaf| leaf.text.as_str()).collect()
    }

    /// Insert `text` at `offset` carrying exactly `marks`
    pub fn insert(&mut self, offset: usize, text: &str, marks: BTreeSet<MarkKind>) {
        let offset = offset.min(self.len());
        let index = self.ensure_boundary(offset);
        self.0.insert(
            index,
            Leaf {
                text: text.to_string(),
                marks,
            },
        );
        self.normalize();
    }

    pub fn remove(&mut self, range: Range<usize>) {
        let Some(range) = self.clamp(range) else {
            return;
        };
        let start = self.ensure_boundary(range.start);
        let end = self.ensure_boundary(range.end);
        self.0.drain(start..end);
        self.normalize();
    }

    /// Split at `offset`, keeping the head and returning the tail
    pub fn split_off(&mut self, offset: usize) -> Text {
        let offset = offset.min(self.len());
        let index = self.ensure_boundary(offset);
        let tail = self.0.split_off(index);
        self.normalize();
        Text::from_leaves(tail)
    }

    pub fn append(&mut self, other: Text) {
        self.0.extend(other.0);
        self.normalize();
    }

    /// Add (`on = true`) or remove a mark across `range`
    pub fn set_mark(&mut self, range: Range<usize>, mark: &MarkKind, on: bool) {
        let Some(range) = self.clamp(range) else {
            return;
        };
        let start = self.ensure_boundary(range.start);
        let end = self.ensure_boundary(range.end);
        for leaf in &mut self.0[start..end] {
            if on {
                leaf.marks.insert(mark.clone());
            } else {
                leaf.marks.remove(mark);
            }
        }
        self.normalize();
    }

    /// Marks a caret at `offset` would type with: those of the char before
    /// it, or of the first leaf at offset 0.
    pub fn marks_at(&self, offset: usize) -> BTreeSet<MarkKind> {
        if offset == 0 {
            return self.0.first().map(|l| l.marks.clone()).unwrap_or_default();
        }
        let mut pos = 0;
        for leaf in &self.0 {
            let len = leaf.char_len();
            if offset <= pos + len {
                return leaf.marks.clone();
            }
            pos += len;
        }
        self.0.last().map(|l| l.marks.clone()).unwrap_or_default()
    }

    /// Marks shared by every char in a non-empty `range`
    pub fn marks_across(&self, range: Range<usize>) -> Option<BTreeSet<MarkKind>> {
        let range = self.clamp(range)?;
        let mut shared: Option<BTreeSet<MarkKind>> = None;
        let mut pos = 0;
        for leaf in &self.0 {
            let len = leaf.char_len();
            let overlaps = pos < range.end && range.start < pos + len;
            if overlaps {
                shared = Some(match shared {
                    None => leaf.marks.clone(),
                    Some(acc) => acc.intersection(&leaf.marks).cloned().collect(),
                });
            }
            pos += len;
        }
        shared
    }

    fn clamp(&self, range: Range<usize>) -> Option<Range<usize>> {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        (start < end).then_some(start..end)
    }

    /// Make sure a leaf starts exactly at `offset`; returns that leaf's index
    fn ensure_boundary(&mut self, offset: usize) -> usize {
        let mut pos = 0;
        for index in 0..self.0.len() {
            let len = self.0[index].char_len();
            if offset == pos {
                return index;
            }
            if offset < pos + len {
                let leaf = &mut self.0[index];
                let byte = byte_index(&leaf.text, offset - pos);
                let tail = leaf.text.split_off(byte);
                let marks = leaf.marks.clone();
                self.0.insert(index + 1, Leaf { text: tail, marks });
                return index + 1;
            }
            pos += len;
        }
        self.0.len()
    }

    fn normalize(&mut self) {
        let mut merged: Vec<Leaf> = Vec::with_capacity(self.0.len());
        for leaf in self.0.drain(..) {
            if leaf.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(prev) if prev.marks == leaf.marks => prev.text.push_str(&leaf.text),
                _ => merged.push(leaf),
            }
        }
        if merged.is_empty() {
            merged.push(Leaf::default());
        }
        self.0 = merged;
    }
}

fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bold() -> BTreeSet<MarkKind> {
        [MarkKind::Bold].into_iter().collect()
    }

    #[test]
    fn test_insert_with_marks_splits_leaf() {
        let mut text = Text::new("hello world");
        text.insert(5, ",", bold());

        assert_eq!(text.plain(), "hello, world");
        assert_eq!(
            text.leaves(),
            &[
                Leaf::new("hello"),
                Leaf::with_marks(",", [MarkKind::Bold]),
                Leaf::new(" world"),
            ]
        );
    }

    #[test]
    fn test_set_mark_then_unset_merges_back() {
        let mut text = Text::new("abcdef");
        text.set_mark(1..4, &MarkKind::Italic, true);
        assert_eq!(text.leaves().len(), 3);

        text.set_mark(1..4, &MarkKind::Italic, false);
        assert_eq!(text.leaves(), &[Leaf::new("abcdef")]);
    }

    #[test]
    fn test_offsets_are_chars_not_bytes() {
        let mut text = Text::new("héllo");
        text.remove(1..2);
        assert_eq!(text.plain(), "hllo");

        let tail = text.split_off(2);
        assert_eq!(text.plain(), "hl");
        assert_eq!(tail.plain(), "lo");
    }

    #[test]
    fn test_removing_everything_keeps_one_empty_leaf() {
        let mut text = Text::new("gone");
        text.remove(0..10);
        assert!(text.is_empty());
        assert_eq!(text.leaves(), &[Leaf::default()]);
    }

    #[test]
    fn test_marks_at_uses_char_before_caret() {
        let text = Text::from_leaves(vec![
            Leaf::with_marks("bold", [MarkKind::Bold]),
            Leaf::new("plain"),
        ]);
        assert_eq!(text.marks_at(0), bold());
        assert_eq!(text.marks_at(4), bold());
        assert!(text.marks_at(5).is_empty());
    }

    #[test]
    fn test_marks_across_is_intersection() {
        let text = Text::from_leaves(vec![
            Leaf::with_marks("ab", [MarkKind::Bold, MarkKind::Code]),
            Leaf::with_marks("cd", [MarkKind::Bold]),
        ]);
        assert_eq!(text.marks_across(0..4), Some(bold()));
        assert_eq!(text.marks_across(2..2), None);
    }
}
