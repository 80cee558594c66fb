use crate::editing::Key;

/// A caret position: a leaf block and a char offset into its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub key: Key,
    pub offset: usize,
}

impl Point {
    pub fn new(key: Key, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// Anchor is where the selection started, focus where it ends; either may
/// come first in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn range(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Caret at the start of the block with `key`
    pub fn at_start_of(key: Key) -> Self {
        Self::collapsed(Point::new(key, 0))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}
