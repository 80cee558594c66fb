//! Read-only projection of a [`Value`] for frontends.
//!
//! A [`Snapshot`] mirrors the block tree with everything a renderer needs
//! resolved up front: element tags, depth, image sources, caret position.
//! The Dioxus UI walks it through per-kind components; [`Snapshot::to_html`]
//! produces the same markup as a string.

use crate::editing::{Block, BlockKind, Content, Key, MarkKind, Value};

/// How a block or mark kind appears as an element
pub trait RenderContract {
    fn tag(&self) -> &'static str;

    /// Void elements have no children and no closing tag
    fn is_void(&self) -> bool {
        false
    }
}

impl RenderContract for BlockKind {
    fn tag(&self) -> &'static str {
        match self {
            BlockKind::BlockQuote => "blockquote",
            BlockKind::BulletedList => "ul",
            BlockKind::NumberedList => "ol",
            BlockKind::HeadingOne => "h1",
            BlockKind::HeadingTwo => "h2",
            BlockKind::ListItem => "li",
            BlockKind::Image => "img",
            BlockKind::Paragraph | BlockKind::Unknown(_) => "div",
        }
    }

    fn is_void(&self) -> bool {
        BlockKind::is_void(self)
    }
}

impl RenderContract for MarkKind {
    fn tag(&self) -> &'static str {
        match self {
            MarkKind::Bold => "strong",
            MarkKind::Code => "code",
            MarkKind::Italic => "em",
            MarkKind::Underlined => "u",
            MarkKind::Unknown(_) => "span",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLeaf {
    pub text: String,
    /// Outermost first
    pub marks: Vec<MarkKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderBody {
    Children(Vec<RenderBlock>),
    Leaves(Vec<RenderLeaf>),
    Void,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderBlock {
    pub key: Key,
    pub kind: BlockKind,
    /// Top-level blocks are at 1
    pub depth: usize,
    pub src: Option<String>,
    /// Part of the current selection
    pub selected: bool,
    /// Char offset of a collapsed caret inside this block
    pub caret: Option<usize>,
    pub body: RenderBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Editor version the snapshot was taken at
    pub version: u64,
    pub blocks: Vec<RenderBlock>,
    pub block_count: usize,
}

impl Snapshot {
    pub fn from_value(value: &Value, version: u64) -> Self {
        let selected: Vec<Key> = value.selected_blocks().iter().map(|b| b.key).collect();
        let selection = value.selection();
        let caret = selection
            .is_collapsed()
            .then_some((selection.focus.key, selection.focus.offset));

        let view = View { selected, caret };
        Self {
            version,
            blocks: value
                .document()
                .nodes
                .iter()
                .map(|block| view.block(block, 1))
                .collect(),
            block_count: value.block_count(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            write_block(&mut out, block);
        }
        out
    }
}

struct View {
    selected: Vec<Key>,
    caret: Option<(Key, usize)>,
}

impl View {
    fn block(&self, block: &Block, depth: usize) -> RenderBlock {
        let body = match &block.content {
            _ if block.is_void() => RenderBody::Void,
            Content::Nodes(children) => RenderBody::Children(
                children
                    .iter()
                    .map(|child| self.block(child, depth + 1))
                    .collect(),
            ),
            Content::Leaves(text) => RenderBody::Leaves(
                text.leaves()
                    .iter()
                    .map(|leaf| RenderLeaf {
                        text: leaf.text.clone(),
                        marks: leaf.marks.iter().cloned().collect(),
                    })
                    .collect(),
            ),
        };

        RenderBlock {
            key: block.key,
            kind: block.kind.clone(),
            depth,
            src: block.src().map(str::to_string),
            selected: self.selected.contains(&block.key),
            caret: self
                .caret
                .and_then(|(key, offset)| (key == block.key).then_some(offset)),
            body,
        }
    }
}

fn write_block(out: &mut String, block: &RenderBlock) {
    let tag = block.kind.tag();
    if block.kind.is_void() {
        let src = block.src.as_deref().unwrap_or_default();
        out.push_str(&format!(
            "<{tag} src=\"{}\"/>",
            html_escape::encode_double_quoted_attribute(src)
        ));
        return;
    }

    out.push_str(&format!("<{tag}>"));
    match &block.body {
        RenderBody::Children(children) => children.iter().for_each(|c| write_block(out, c)),
        RenderBody::Leaves(leaves) => leaves.iter().for_each(|l| write_leaf(out, l)),
        RenderBody::Void => {}
    }
    out.push_str(&format!("</{tag}>"));
}

fn write_leaf(out: &mut String, leaf: &RenderLeaf) {
    for mark in &leaf.marks {
        out.push_str(&format!("<{}>", mark.tag()));
    }
    out.push_str(&html_escape::encode_text(&leaf.text));
    for mark in leaf.marks.iter().rev() {
        out.push_str(&format!("</{}>", mark.tag()));
    }
}
