use blockquill_engine::{MarkKind, RenderLeaf};
use dioxus::prelude::*;

/// A piece of a block's text line: a run of marked text, or the caret
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(RenderLeaf),
    Caret,
}

/// Split leaves so the caret (a char offset) lands between two segments
pub fn segments_with_caret(leaves: &[RenderLeaf], caret: Option<usize>) -> Vec<Segment> {
    let Some(mut remaining) = caret else {
        return leaves.iter().cloned().map(Segment::Text).collect();
    };

    let mut out = Vec::with_capacity(leaves.len() + 2);
    let mut placed = false;
    for leaf in leaves {
        let len = leaf.text.chars().count();
        if placed || remaining > len {
            remaining = remaining.saturating_sub(len);
            out.push(Segment::Text(leaf.clone()));
            continue;
        }
        let split = leaf
            .text
            .char_indices()
            .nth(remaining)
            .map_or(leaf.text.len(), |(i, _)| i);
        let (head, tail) = leaf.text.split_at(split);
        if !head.is_empty() {
            out.push(Segment::Text(RenderLeaf {
                text: head.to_string(),
                marks: leaf.marks.clone(),
            }));
        }
        out.push(Segment::Caret);
        if !tail.is_empty() {
            out.push(Segment::Text(RenderLeaf {
                text: tail.to_string(),
                marks: leaf.marks.clone(),
            }));
        }
        placed = true;
    }
    if !placed {
        out.push(Segment::Caret);
    }
    out
}

#[component]
pub fn Leaves(leaves: Vec<RenderLeaf>, caret: Option<usize>) -> Element {
    let segments = segments_with_caret(&leaves, caret);
    rsx! {
        for segment in segments.into_iter() {
            {render_segment(segment)}
        }
    }
}

fn render_segment(segment: Segment) -> Element {
    match segment {
        Segment::Text(leaf) => rsx! {
            MarkedText { text: leaf.text, marks: leaf.marks }
        },
        Segment::Caret => rsx! { span { class: "caret" } },
    }
}

/// Text wrapped in one element per mark, outermost first
#[component]
pub fn MarkedText(text: String, marks: Vec<MarkKind>) -> Element {
    let Some((mark, rest)) = marks.split_first() else {
        return rsx! { span { "{text}" } };
    };
    let inner = rsx! {
        MarkedText { text, marks: rest.to_vec() }
    };

    match mark {
        MarkKind::Bold => rsx! { strong { {inner} } },
        MarkKind::Code => rsx! { code { {inner} } },
        MarkKind::Italic => rsx! { em { {inner} } },
        MarkKind::Underlined => rsx! { u { {inner} } },
        MarkKind::Unknown(name) => rsx! { span { class: "mark-{name}", {inner} } },
    }
}
