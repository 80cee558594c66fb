use blockquill_engine::Notice;
use dioxus::prelude::*;

/// Modal message; nothing else is clickable until it is dismissed
#[component]
pub fn NoticeDialog(notice: Notice, on_dismiss: Callback<()>) -> Element {
    rsx! {
        div {
            class: "notice-backdrop",
            div {
                class: "notice-dialog",
                role: "alertdialog",
                p { "{notice}" }
                button {
                    class: "button primary",
                    onclick: move |_| on_dismiss.call(()),
                    "OK"
                }
            }
        }
    }
}
