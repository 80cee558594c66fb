use crate::ui::components::Block;
use blockquill_engine::Snapshot;
use blockquill_engine::editing::Key as BlockKey;
use dioxus::prelude::*;

/// Focusable editing area; all keystrokes are handed up unfiltered
#[component]
pub fn EditorSurface(
    snapshot: Snapshot,
    on_key: Callback<KeyboardEvent>,
    on_select: Callback<BlockKey>,
) -> Element {
    rsx! {
        div {
            class: "editor-field",
            tabindex: "0",
            autofocus: true,
            "data-version": "{snapshot.version}",
            onkeydown: move |evt: KeyboardEvent| on_key.call(evt),
            for block in snapshot.blocks.iter() {
                Block { key: "{block.key}", block: block.clone(), on_select }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockquill_engine::Value;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[component]
    fn Harness(snapshot: Snapshot) -> Element {
        rsx! {
            EditorSurface { snapshot, on_key: move |_| {}, on_select: move |_| {} }
        }
    }

    #[test]
    fn test_surface_renders_all_blocks() {
        let snapshot = Snapshot::from_value(&Value::initial(), 7);
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { snapshot });
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("class=\"editor-field\""));
        assert!(html.contains("data-version=\"7\""));
        assert!(html.contains("Welcome to blockquill"));
        assert!(html.contains("Set a block limit to cap"));
    }
}
