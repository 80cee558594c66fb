use crate::ui::components::leaf::Leaves;
use blockquill_engine::editing::Key as BlockKey;
use blockquill_engine::{BlockKind, RenderBlock, RenderBody};
use dioxus::prelude::*;

/// One block of the document, rendered by kind. Containers recurse.
#[component]
pub fn Block(block: RenderBlock, on_select: Callback<BlockKey>) -> Element {
    let key = block.key;
    let mut class = format!("block depth-{}", block.depth);
    if block.selected {
        class.push_str(" selected");
    }
    let onclick = move |evt: MouseEvent| {
        evt.stop_propagation();
        on_select.call(key);
    };

    let body = rsx! {
        BlockBody { body: block.body.clone(), caret: block.caret, on_select }
    };

    match &block.kind {
        BlockKind::BlockQuote => rsx! { blockquote { class: "{class}", onclick: onclick, {body} } },
        BlockKind::BulletedList => rsx! { ul { class: "{class}", {body} } },
        BlockKind::NumberedList => rsx! { ol { class: "{class}", {body} } },
        BlockKind::HeadingOne => rsx! { h1 { class: "{class}", onclick: onclick, {body} } },
        BlockKind::HeadingTwo => rsx! { h2 { class: "{class}", onclick: onclick, {body} } },
        BlockKind::ListItem => rsx! { li { class: "{class}", onclick: onclick, {body} } },
        BlockKind::Image => {
            let src = block.src.clone().unwrap_or_default();
            rsx! {
                img {
                    class: "{class} image",
                    src: "{src}",
                    onclick: onclick,
                }
            }
        }
        BlockKind::Paragraph | BlockKind::Unknown(_) => rsx! { div { class: "{class}", onclick: onclick, {body} } },
    }
}

#[component]
fn BlockBody(body: RenderBody, caret: Option<usize>, on_select: Callback<BlockKey>) -> Element {
    match body {
        RenderBody::Children(children) => rsx! {
            for child in children.iter() {
                Block { key: "{child.key}", block: child.clone(), on_select }
            }
        },
        RenderBody::Leaves(leaves) => rsx! { Leaves { leaves, caret } },
        RenderBody::Void => rsx! {},
    }
}
