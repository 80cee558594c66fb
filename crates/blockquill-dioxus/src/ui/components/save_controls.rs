use dioxus::prelude::*;

#[component]
pub fn SaveControls(save_enabled: bool, on_save: Callback<()>, on_cancel: Callback<()>) -> Element {
    rsx! {
        div {
            class: "save-controls",
            button {
                class: "button primary",
                disabled: !save_enabled,
                onclick: move |_| on_save.call(()),
                "Save"
            }
            button {
                class: "button",
                onclick: move |_| on_cancel.call(()),
                "Cancel"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[component]
    fn Harness(save_enabled: bool) -> Element {
        rsx! {
            SaveControls { save_enabled, on_save: move |_| {}, on_cancel: move |_| {} }
        }
    }

    fn render_controls(save_enabled: bool) -> String {
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { save_enabled });
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_save_disabled_over_limit() {
        let html = render_controls(false);
        assert!(html.contains("disabled"));
        assert!(html.contains("Save"));
        assert!(html.contains("Cancel"));
    }

    #[test]
    fn test_save_enabled() {
        assert!(!render_controls(true).contains("disabled"));
    }
}
