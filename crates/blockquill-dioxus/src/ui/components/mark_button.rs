use blockquill_engine::{ButtonState, MarkKind};
use dioxus::prelude::*;

pub fn mark_label(mark: &MarkKind) -> &str {
    match mark {
        MarkKind::Bold => "B",
        MarkKind::Italic => "I",
        MarkKind::Underlined => "U",
        MarkKind::Code => "</>",
        MarkKind::Unknown(name) => name,
    }
}

#[component]
pub fn MarkButton(mark: MarkKind, state: ButtonState, on_click: Callback<MarkKind>) -> Element {
    let label = mark_label(&mark).to_string();
    let title = format!("Toggle {mark}");
    rsx! {
        button {
            class: "tooltip-icon-button",
            title: "{title}",
            "data-active": "{state.active}",
            disabled: !state.enabled,
            // Mouse down rather than click so the editor keeps its selection
            onmousedown: move |evt: MouseEvent| {
                evt.prevent_default();
                on_click.call(mark.clone());
            },
            i { "{label}" }
        }
    }
}
