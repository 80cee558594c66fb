use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::editing::{BlockKind, DEFAULT_BLOCK, Text};

/// Stable block identity used for parent/depth lookup and selection points.
///
/// Keys are runtime-only: they are generated on creation and on every load,
/// and never written into a persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub Uuid);

impl Key {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a block holds: child blocks, or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    Nodes(Vec<Block>),
    Leaves(Text),
}

/// A structural node of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(skip)]
    pub key: Key,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    #[serde(flatten)]
    pub content: Content,
}

impl Block {
    pub fn leaf(kind: BlockKind, text: Text) -> Self {
        Self {
            key: Key::generate(),
            kind,
            data: BTreeMap::new(),
            content: Content::Leaves(text),
        }
    }

    pub fn container(kind: BlockKind, children: Vec<Block>) -> Self {
        Self {
            key: Key::generate(),
            kind,
            data: BTreeMap::new(),
            content: Content::Nodes(children),
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Self::leaf(DEFAULT_BLOCK, Text::new(text))
    }

    pub fn image(src: impl Into<String>) -> Self {
        let mut block = Self::leaf(BlockKind::Image, Text::default());
        block.data.insert("src".to_string(), src.into());
        block
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Leaves(_))
    }

    pub fn is_void(&self) -> bool {
        self.kind.is_void()
    }

    pub fn text(&self) -> Option<&Text> {
        match &self.content {
            Content::Leaves(text) => Some(text),
            Content::Nodes(_) => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.content {
            Content::Leaves(text) => Some(text),
            Content::Nodes(_) => None,
        }
    }

    /// Editable length in chars; void blocks have none
    pub fn text_len(&self) -> usize {
        match (&self.content, self.is_void()) {
            (Content::Leaves(text), false) => text.len(),
            _ => 0,
        }
    }

    /// Concatenated text of this block and all descendants
    pub fn plain_text(&self) -> String {
        match &self.content {
            Content::Leaves(text) => text.plain(),
            Content::Nodes(children) => children.iter().map(Block::plain_text).collect(),
        }
    }

    pub fn children(&self) -> &[Block] {
        match &self.content {
            Content::Nodes(children) => children,
            Content::Leaves(_) => &[],
        }
    }

    pub fn src(&self) -> Option<&str> {
        self.data.get("src").map(String::as_str)
    }

    /// Leaf blocks below this one, in document order. Empty for a leaf.
    pub fn leaf_blocks(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        collect_leaves(self.children(), &mut out);
        out
    }

    fn fresh_keys(&mut self) {
        self.key = Key::generate();
        if let Content::Nodes(children) = &mut self.content {
            children.iter_mut().for_each(Block::fresh_keys);
        }
    }
}

/// The node a block hangs off: another block, or the document root
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    Document(&'a Document),
    Block(&'a Block),
}

impl Parent<'_> {
    pub fn kind(&self) -> Option<&BlockKind> {
        match self {
            Parent::Document(_) => None,
            Parent::Block(block) => Some(&block.kind),
        }
    }

    pub fn leaf_block_count(&self) -> usize {
        match self {
            Parent::Document(document) => document.leaf_blocks().len(),
            Parent::Block(block) => block.leaf_blocks().len(),
        }
    }
}

/// Block tree. An index path addresses a block from the root: `[]` is the
/// document itself, `[i]` its i-th child and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: vec![Block::paragraph("")],
        }
    }
}

impl Document {
    pub fn new(nodes: Vec<Block>) -> Self {
        let mut document = Self { nodes };
        document.normalize();
        document
    }

    /// Leaf blocks in document order
    pub fn leaf_blocks(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        collect_leaves(&self.nodes, &mut out);
        out
    }

    pub fn leaf_keys(&self) -> Vec<Key> {
        self.leaf_blocks().into_iter().map(|b| b.key).collect()
    }

    pub fn leaf_index(&self, key: Key) -> Option<usize> {
        self.leaf_blocks().iter().position(|b| b.key == key)
    }

    pub fn path_of(&self, key: Key) -> Option<Vec<usize>> {
        fn walk(nodes: &[Block], key: Key, path: &mut Vec<usize>) -> bool {
            for (index, block) in nodes.iter().enumerate() {
                path.push(index);
                if block.key == key || walk(block.children(), key, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(&self.nodes, key, &mut path).then_some(path)
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&Block> {
        let (first, rest) = path.split_first()?;
        let mut block = self.nodes.get(*first)?;
        for index in rest {
            block = block.children().get(*index)?;
        }
        Some(block)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Block> {
        let (first, rest) = path.split_first()?;
        let mut block = self.nodes.get_mut(*first)?;
        for index in rest {
            block = match &mut block.content {
                Content::Nodes(children) => children.get_mut(*index)?,
                Content::Leaves(_) => return None,
            };
        }
        Some(block)
    }

    /// Child list of the node at `path` (`[]` for the root)
    pub fn children_at_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Block>> {
        if path.is_empty() {
            return Some(&mut self.nodes);
        }
        match &mut self.node_at_mut(path)?.content {
            Content::Nodes(children) => Some(children),
            Content::Leaves(_) => None,
        }
    }

    pub fn block(&self, key: Key) -> Option<&Block> {
        self.node_at(&self.path_of(key)?)
    }

    pub fn block_mut(&mut self, key: Key) -> Option<&mut Block> {
        let path = self.path_of(key)?;
        self.node_at_mut(&path)
    }

    pub fn parent_of(&self, key: Key) -> Option<Parent<'_>> {
        let path = self.path_of(key)?;
        let parent_path = &path[..path.len() - 1];
        if parent_path.is_empty() {
            Some(Parent::Document(self))
        } else {
            self.node_at(parent_path).map(Parent::Block)
        }
    }

    /// Top-level blocks sit at depth 1
    pub fn depth_of(&self, key: Key) -> Option<usize> {
        self.path_of(key).map(|path| path.len())
    }

    /// Ancestor blocks of `key`, nearest first
    pub fn ancestors_of(&self, key: Key) -> Vec<&Block> {
        let Some(path) = self.path_of(key) else {
            return Vec::new();
        };
        (1..path.len())
            .rev()
            .filter_map(|len| self.node_at(&path[..len]))
            .collect()
    }

    /// Nearest ancestor matching `predicate`; the block itself is not a candidate
    pub fn closest(&self, key: Key, predicate: impl Fn(&Block) -> bool) -> Option<&Block> {
        self.ancestors_of(key).into_iter().find(|block| predicate(block))
    }

    /// Detach the block with `key`, returning it
    pub fn remove(&mut self, key: Key) -> Option<Block> {
        let path = self.path_of(key)?;
        let (index, parent_path) = path.split_last()?;
        let children = self.children_at_mut(parent_path)?;
        Some(children.remove(*index))
    }

    /// Insert `block` right after the block with `key`
    pub fn insert_after(&mut self, key: Key, block: Block) -> bool {
        self.insert_relative(key, block, 1)
    }

    pub fn insert_before(&mut self, key: Key, block: Block) -> bool {
        self.insert_relative(key, block, 0)
    }

    fn insert_relative(&mut self, key: Key, block: Block, shift: usize) -> bool {
        let Some(path) = self.path_of(key) else {
            return false;
        };
        let Some((index, parent_path)) = path.split_last() else {
            return false;
        };
        match self.children_at_mut(parent_path) {
            Some(children) => {
                children.insert(index + shift, block);
                true
            }
            None => false,
        }
    }

    /// Drop empty containers and keep the document non-empty
    pub fn normalize(&mut self) {
        fn prune(nodes: &mut Vec<Block>) {
            for block in nodes.iter_mut() {
                if let Content::Nodes(children) = &mut block.content {
                    prune(children);
                }
            }
            nodes.retain(|block| !matches!(&block.content, Content::Nodes(c) if c.is_empty()));
        }

        prune(&mut self.nodes);
        if self.nodes.is_empty() {
            self.nodes.push(Block::paragraph(""));
        }
    }

    /// Give every block a new key; used after deserializing
    pub(crate) fn fresh_keys(&mut self) {
        self.nodes.iter_mut().for_each(Block::fresh_keys);
    }
}

fn collect_leaves<'a>(nodes: &'a [Block], out: &mut Vec<&'a Block>) {
    for block in nodes {
        match &block.content {
            Content::Leaves(_) => out.push(block),
            Content::Nodes(children) => collect_leaves(children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested_list() -> (Document, Key, Key) {
        let inner = Block::leaf(BlockKind::ListItem, Text::new("inner"));
        let inner_key = inner.key;
        let outer = Block::leaf(BlockKind::ListItem, Text::new("outer"));
        let outer_key = outer.key;
        let document = Document::new(vec![
            Block::paragraph("intro"),
            Block::container(
                BlockKind::BulletedList,
                vec![
                    outer,
                    Block::container(BlockKind::NumberedList, vec![inner]),
                ],
            ),
        ]);
        (document, outer_key, inner_key)
    }

    #[test]
    fn test_depth_counts_from_one_at_top_level() {
        let (document, outer, inner) = nested_list();
        let intro = document.nodes[0].key;

        assert_eq!(document.depth_of(intro), Some(1));
        assert_eq!(document.depth_of(outer), Some(2));
        assert_eq!(document.depth_of(inner), Some(3));
    }

    #[test]
    fn test_leaf_blocks_skip_containers() {
        let (document, _, _) = nested_list();
        let texts: Vec<_> = document
            .leaf_blocks()
            .iter()
            .map(|b| b.plain_text())
            .collect();
        assert_eq!(texts, vec!["intro", "outer", "inner"]);
    }

    #[test]
    fn test_parent_and_closest() {
        let (document, outer, inner) = nested_list();

        let parent = document.parent_of(inner).unwrap();
        assert_eq!(parent.kind(), Some(&BlockKind::NumberedList));
        assert_eq!(parent.leaf_block_count(), 1);

        let closest = document
            .closest(inner, |b| b.kind == BlockKind::BulletedList)
            .unwrap();
        assert_eq!(closest.leaf_blocks().len(), 2);

        assert!(document.closest(outer, |b| b.kind == BlockKind::ListItem).is_none());
    }

    #[test]
    fn test_top_level_parent_is_document() {
        let (document, _, _) = nested_list();
        let intro = document.nodes[0].key;
        let parent = document.parent_of(intro).unwrap();

        assert!(matches!(parent, Parent::Document(_)));
        assert_eq!(parent.leaf_block_count(), 3);
    }

    #[test]
    fn test_normalize_prunes_empty_containers() {
        let mut document = Document::new(vec![Block::container(
            BlockKind::BulletedList,
            vec![Block::container(BlockKind::BulletedList, vec![])],
        )]);
        document.normalize();

        assert_eq!(document.nodes.len(), 1);
        assert_eq!(document.nodes[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_block_json_shape() {
        let block = Block::container(BlockKind::BulletedList, vec![Block::paragraph("a")]);
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(
            json,
            r#"{"type":"bulleted-list","nodes":[{"type":"paragraph","leaves":[{"text":"a"}]}]}"#
        );

        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back.plain_text(), "a");
        assert_eq!(back.children().len(), 1);
    }
}
