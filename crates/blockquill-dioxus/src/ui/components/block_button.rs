use blockquill_engine::{BlockKind, ButtonState};
use dioxus::prelude::*;

pub fn block_label(kind: &BlockKind) -> &str {
    match kind {
        BlockKind::HeadingOne => "H1",
        BlockKind::HeadingTwo => "H2",
        BlockKind::BlockQuote => "❝",
        BlockKind::NumberedList => "1.",
        BlockKind::BulletedList => "•",
        BlockKind::Image => "🖼",
        BlockKind::Paragraph => "¶",
        BlockKind::ListItem => "-",
        BlockKind::Unknown(name) => name,
    }
}

#[component]
pub fn BlockButton(kind: BlockKind, state: ButtonState, on_click: Callback<BlockKind>) -> Element {
    let label = block_label(&kind).to_string();
    let title = format!("Toggle {kind}");
    rsx! {
        button {
            class: "tooltip-icon-button",
            title: "{title}",
            "data-active": "{state.active}",
            disabled: !state.enabled,
            onmousedown: move |evt: MouseEvent| {
                evt.prevent_default();
                on_click.call(kind.clone());
            },
            i { "{label}" }
        }
    }
}
