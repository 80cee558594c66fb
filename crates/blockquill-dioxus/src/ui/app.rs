use crate::ui::components::{EditorSurface, EditorTools, NoticeDialog, SaveControls, Toolbar};
use crate::ui::keys;
use blockquill_engine::editing::Key as BlockKey;
use blockquill_engine::{
    BlockKind, BlockLimit, DataUrl, EditorSession, FileContentStore, ImageError, ImageOutcome,
    MarkKind, Point, Selection,
};
use dioxus::prelude::*;
use std::path::PathBuf;

const EDITOR_CSS: &str = include_str!("../assets/editor.css");

type Session = EditorSession<FileContentStore>;

#[component]
pub fn App(storage_path: PathBuf, block_limit: Option<usize>) -> Element {
    let mut session = use_signal(|| {
        EditorSession::open(
            FileContentStore::new(&storage_path),
            BlockLimit::from(block_limit),
        )
    });

    let (snapshot, toolbar, notice) = {
        let session = session.read();
        (session.snapshot(), session.toolbar_state(), session.notice())
    };
    let block_count = toolbar.block_count;
    let list_scope_count = toolbar.list_scope_count;
    let limit = toolbar.limit;
    let save_enabled = toolbar.save_enabled;

    rsx! {
        style { {EDITOR_CSS} }
        div {
            class: "app-container",
            Toolbar {
                state: toolbar,
                on_mark: move |mark: MarkKind| {
                    session.write().click_mark(&mark);
                },
                on_block: move |kind: BlockKind| {
                    session.write().click_block(&kind);
                },
                on_image: move |evt: FormEvent| pick_image(session, evt),
                on_limit: move |input: String| {
                    session.write().set_block_limit_input(&input);
                },
            }
            EditorSurface {
                snapshot,
                on_key: move |evt: KeyboardEvent| {
                    let outcome = session.write().key_down(&keys::key_press(&evt));
                    if outcome.prevents_default() {
                        evt.prevent_default();
                    }
                },
                on_select: move |key: BlockKey| select_block_end(session, key),
            }
            EditorTools { block_count, list_scope_count, limit }
            SaveControls {
                save_enabled,
                on_save: move |_| {
                    if let Err(e) = session.write().save() {
                        log::error!("Save failed: {e}");
                    }
                },
                on_cancel: move |_| {
                    if let Err(e) = session.write().cancel() {
                        log::error!("Failed to reload saved content: {e}");
                    }
                },
            }
            if let Some(notice) = notice {
                NoticeDialog {
                    notice,
                    on_dismiss: move |_| session.write().dismiss_notice(),
                }
            }
        }
    }
}

fn select_block_end(mut session: Signal<Session>, key: BlockKey) {
    let offset = session
        .read()
        .value()
        .document()
        .block(key)
        .map_or(0, |block| block.text_len());
    if let Err(e) = session.write().select(Selection::collapsed(Point::new(key, offset))) {
        log::warn!("Ignoring click on block {key}: {e}");
    }
}

/// Start reading the chosen file; the block lands once the bytes arrive
fn pick_image(mut session: Signal<Session>, evt: FormEvent) {
    let Some(file) = evt.files().into_iter().next() else {
        return;
    };
    let ticket = match session.write().begin_image_insert() {
        Ok(ticket) => ticket,
        Err(notice) => {
            log::info!("Image insert refused: {notice}");
            return;
        }
    };

    spawn(async move {
        let name = file.name();
        let content_type = file.content_type();
        let result = match file.read_bytes().await {
            Ok(bytes) => DataUrl::for_file(&name, content_type.as_deref(), &bytes),
            Err(e) => Err(ImageError::Read(e.to_string())),
        };
        match session.write().complete_image_insert(ticket, result) {
            ImageOutcome::Inserted(patch) => {
                log::info!("Inserted image {name} at version {}", patch.version)
            }
            ImageOutcome::Blocked(notice) => log::info!("Image {name} blocked: {notice}"),
            ImageOutcome::Dropped => {}
        }
    });
}
