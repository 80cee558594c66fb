use dioxus::prelude::*;

/// Numeric block limit entry; every change is reported as typed
#[component]
pub fn LimitInput(on_change: Callback<String>) -> Element {
    rsx! {
        input {
            class: "input-field",
            r#type: "number",
            min: "0",
            placeholder: "Set Block limit",
            name: "blockLimit",
            oninput: move |evt: FormEvent| on_change.call(evt.value()),
        }
    }
}
