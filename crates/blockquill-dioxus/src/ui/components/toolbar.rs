use crate::ui::components::{BlockButton, ImageButton, LimitInput, MarkButton};
use blockquill_engine::{BlockKind, MarkKind, ToolbarState};
use dioxus::prelude::*;

#[component]
pub fn Toolbar(
    state: ToolbarState,
    on_mark: Callback<MarkKind>,
    on_block: Callback<BlockKind>,
    on_image: Callback<FormEvent>,
    on_limit: Callback<String>,
) -> Element {
    rsx! {
        div {
            class: "toolbar",
            for (mark, button) in state.marks.iter() {
                MarkButton { key: "{mark}", mark: mark.clone(), state: *button, on_click: on_mark }
            }
            for (kind, button) in state.blocks.iter() {
                BlockButton { key: "{kind}", kind: kind.clone(), state: *button, on_click: on_block }
            }
            ImageButton { state: state.image, on_pick: on_image }
            LimitInput { on_change: on_limit }
        }
    }
}
