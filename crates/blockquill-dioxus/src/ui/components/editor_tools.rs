use blockquill_engine::BlockLimit;
use dioxus::prelude::*;

/// Counter strip under the editor
#[component]
pub fn EditorTools(block_count: usize, list_scope_count: usize, limit: BlockLimit) -> Element {
    rsx! {
        div {
            class: "editor-tools",
            h3 { "Block Count: {block_count}" }
            if list_scope_count != block_count {
                h3 { "List Block Count: {list_scope_count}" }
            }
            h3 { "Max block limit: {limit}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_tools(block_count: usize, list_scope_count: usize, limit: BlockLimit) -> String {
        let mut dom = VirtualDom::new_with_props(
            EditorTools,
            EditorToolsProps {
                block_count,
                list_scope_count,
                limit,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_unset_limit_shows_none() {
        let html = render_tools(4, 4, BlockLimit::unset());
        assert!(html.contains("Block Count: 4"));
        assert!(html.contains("Max block limit: None"));
    }

    #[test]
    fn test_set_limit_shows_number() {
        let html = render_tools(2, 2, BlockLimit::new(10));
        assert!(html.starts_with(r#"<div class="editor-tools"><h3>Block Count: 2</h3>"#));
        assert!(html.contains("<h3>Max block limit: 10</h3>"));
    }

    #[test]
    fn test_list_scope_count_shown_when_it_differs() {
        let html = render_tools(5, 2, BlockLimit::new(3));
        assert!(html.contains("Block Count: 5"));
        assert!(html.contains("List Block Count: 2"));
        assert!(!render_tools(5, 5, BlockLimit::new(3)).contains("List Block Count"));
    }
}
