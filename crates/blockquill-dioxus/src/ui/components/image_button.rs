use blockquill_engine::{BlockKind, ButtonState};
use dioxus::prelude::*;

use crate::ui::components::block_button::block_label;

/// File picker styled as a toolbar button
#[component]
pub fn ImageButton(state: ButtonState, on_pick: Callback<FormEvent>) -> Element {
    let icon = block_label(&BlockKind::Image).to_string();
    rsx! {
        label {
            class: "tooltip-icon-button imgBtn",
            title: "Insert image",
            "data-active": "{state.active}",
            input {
                r#type: "file",
                accept: "image/*",
                onchange: move |evt: FormEvent| on_pick.call(evt),
            }
            b { "{icon}" }
        }
    }
}
