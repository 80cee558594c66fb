/*!
 * # Editing Core Module
 *
 * The document model every other part of the editor reads from and writes
 * through.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: `Value`
 * - A [`Value`] is the document tree plus the selection and pending marks
 * - Only [`Editor`] mutates a value; everything else reads snapshots of it
 * - Persisting writes the document as JSON; keys and selection are runtime-only
 *
 * ### 2. Block Tree
 * - Container blocks (lists) hold child blocks; leaf blocks hold [`Text`]
 * - Text is a run of [`Leaf`]s, each with its own mark set
 * - Image blocks are *void*: a leaf with no editable text and a `src`
 * - Queries mirror what the toolbar and key handlers need: parent, depth,
 *   closest matching ancestor, selected leaf blocks, active marks
 *
 * ### 3. Command-Based Editing
 * - All edits are [`Cmd`]s applied by [`Editor::apply`]
 * - Each command runs to completion against a copy of the value which is
 *   then normalized and swapped in, so a failed command changes nothing
 * - Structural commands (`SetBlocks`, `WrapBlock`, `UnwrapBlock`) never
 *   change the number of leaf blocks; text commands may
 *
 * ## Module Structure
 *
 * - **`kinds`**: closed `BlockKind` / `MarkKind` enums with an unknown fallback
 * - **`text`**: leaves and char-offset text operations
 * - **`document`**: block tree, keys and tree queries
 * - **`selection`**: points and selections
 * - **`value`**: document + selection, active state queries, JSON load/save
 * - **`commands`**: the `Cmd` enum and how each command edits a value
 * - **`editor`**: versioned command application
 * - **`patch`**: edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blockquill_engine::editing::*;
 *
 * let item = Block::leaf(BlockKind::ListItem, Text::new("first"));
 * let key = item.key;
 * let document = Document::new(vec![Block::container(BlockKind::BulletedList, vec![item])]);
 *
 * let mut editor = Editor::new(Value::new(document));
 * editor.apply(Cmd::Select(Selection::at_start_of(key))).unwrap();
 * editor.apply(Cmd::WrapBlock(BlockKind::BulletedList)).unwrap();
 *
 * assert_eq!(editor.value().document().depth_of(key), Some(3));
 * ```
 */

pub mod commands;
pub mod document;
pub mod editor;
pub mod kinds;
pub mod patch;
pub mod selection;
pub mod text;
pub mod value;

pub use commands::{BlockDescriptor, Cmd, Direction};
pub use document::{Block, Content, Document, Key, Parent};
pub use editor::{EditError, Editor};
pub use kinds::{BlockKind, DEFAULT_BLOCK, MarkKind};
pub use patch::Patch;
pub use selection::{Point, Selection};
pub use text::{Leaf, Text};
pub use value::Value;

#[cfg(test)]
mod tests;
