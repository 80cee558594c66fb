//! Command behaviour through the public `Editor` API

use pretty_assertions::assert_eq;

use crate::editing::*;

fn editor_with(nodes: Vec<Block>) -> Editor {
    Editor::new(Value::new(Document::new(nodes)))
}

fn key_of(editor: &Editor, text: &str) -> Key {
    editor
        .value()
        .document()
        .leaf_blocks()
        .into_iter()
        .find(|b| b.plain_text() == text)
        .map(|b| b.key)
        .unwrap_or_else(|| panic!("no block with text {text:?}"))
}

fn caret(editor: &mut Editor, text: &str, offset: usize) {
    let key = key_of(editor, text);
    editor
        .apply(Cmd::Select(Selection::collapsed(Point::new(key, offset))))
        .unwrap();
}

fn texts(editor: &Editor) -> Vec<String> {
    editor
        .value()
        .document()
        .leaf_blocks()
        .iter()
        .map(|b| b.plain_text())
        .collect()
}

fn item(text: &str) -> Block {
    Block::leaf(BlockKind::ListItem, Text::new(text))
}

fn bulleted(items: Vec<Block>) -> Block {
    Block::container(BlockKind::BulletedList, items)
}

#[test]
fn test_wrap_block_nests_single_item_inside_its_list() {
    let mut editor = editor_with(vec![bulleted(vec![item("a"), item("b")])]);
    caret(&mut editor, "b", 0);

    editor.apply(Cmd::WrapBlock(BlockKind::BulletedList)).unwrap();

    let document = editor.value().document();
    let list = &document.nodes[0];
    assert_eq!(list.children().len(), 2);
    assert_eq!(list.children()[1].kind, BlockKind::BulletedList);
    assert_eq!(document.depth_of(key_of(&editor, "b")), Some(3));
    assert_eq!(document.depth_of(key_of(&editor, "a")), Some(2));
}

#[test]
fn test_wrap_block_over_range_wraps_common_siblings() {
    let mut editor = editor_with(vec![
        Block::paragraph("one"),
        Block::paragraph("two"),
        Block::paragraph("three"),
    ]);
    let (one, two) = (key_of(&editor, "one"), key_of(&editor, "two"));
    editor
        .apply(Cmd::Select(Selection::range(
            Point::new(one, 0),
            Point::new(two, 3),
        )))
        .unwrap();

    editor.apply(Cmd::SetBlocks(BlockKind::ListItem)).unwrap();
    editor.apply(Cmd::WrapBlock(BlockKind::NumberedList)).unwrap();

    let nodes = &editor.value().document().nodes;
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].kind, BlockKind::NumberedList);
    assert_eq!(nodes[0].children().len(), 2);
    assert_eq!(nodes[1].kind, BlockKind::Paragraph);
}

#[test]
fn test_unwrap_block_from_middle_splits_wrapper() {
    let mut editor = editor_with(vec![bulleted(vec![item("a"), item("b"), item("c")])]);
    caret(&mut editor, "b", 0);

    editor.apply(Cmd::UnwrapBlock(BlockKind::BulletedList)).unwrap();

    let nodes = &editor.value().document().nodes;
    let kinds: Vec<_> = nodes.iter().map(|b| b.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::BulletedList,
            BlockKind::ListItem,
            BlockKind::BulletedList
        ]
    );
    assert_eq!(texts(&editor), vec!["a", "b", "c"]);
}

#[test]
fn test_unwrap_only_child_removes_wrapper() {
    let mut editor = editor_with(vec![bulleted(vec![item("solo")])]);
    caret(&mut editor, "solo", 0);

    editor.apply(Cmd::UnwrapBlock(BlockKind::BulletedList)).unwrap();

    let nodes = &editor.value().document().nodes;
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind, BlockKind::ListItem);
}

#[test]
fn test_unwrap_with_no_matching_wrapper_is_noop() {
    let mut editor = editor_with(vec![bulleted(vec![item("solo")])]);
    caret(&mut editor, "solo", 0);
    let before = editor.value().to_json().unwrap();

    editor.apply(Cmd::UnwrapBlock(BlockKind::NumberedList)).unwrap();

    assert_eq!(editor.value().to_json().unwrap(), before);
}

#[test]
fn test_toggle_mark_at_caret_sets_pending_marks() {
    let mut editor = editor_with(vec![Block::paragraph("ab")]);
    caret(&mut editor, "ab", 1);

    editor.apply(Cmd::ToggleMark(MarkKind::Bold)).unwrap();
    assert!(editor.value().has_mark(&MarkKind::Bold));

    editor.apply(Cmd::InsertText("X".to_string())).unwrap();

    let block = editor.value().document().leaf_blocks()[0];
    let leaves = block.text().unwrap().leaves();
    assert_eq!(
        leaves,
        &[
            Leaf::new("a"),
            Leaf::with_marks("X", [MarkKind::Bold]),
            Leaf::new("b"),
        ]
    );
}

#[test]
fn test_toggle_mark_over_range_adds_then_removes() {
    let mut editor = editor_with(vec![Block::paragraph("hello world")]);
    let key = key_of(&editor, "hello world");
    editor
        .apply(Cmd::Select(Selection::range(
            Point::new(key, 0),
            Point::new(key, 5),
        )))
        .unwrap();

    editor.apply(Cmd::ToggleMark(MarkKind::Italic)).unwrap();
    assert!(editor.value().has_mark(&MarkKind::Italic));
    assert_eq!(
        editor.value().document().leaf_blocks()[0]
            .text()
            .unwrap()
            .leaves()
            .len(),
        2
    );

    editor.apply(Cmd::ToggleMark(MarkKind::Italic)).unwrap();
    assert!(!editor.value().has_mark(&MarkKind::Italic));
    assert_eq!(
        editor.value().document().leaf_blocks()[0]
            .text()
            .unwrap()
            .leaves(),
        &[Leaf::new("hello world")]
    );
}

#[test]
fn test_insert_block_in_middle_splits_text() {
    let mut editor = editor_with(vec![Block::paragraph("before after")]);
    caret(&mut editor, "before after", 6);

    editor
        .apply(Cmd::InsertBlock(BlockDescriptor::image("data:image/png;base64,AA==")))
        .unwrap();

    assert_eq!(texts(&editor), vec!["before", "", " after"]);
    let value = editor.value();
    let image = value.document().leaf_blocks()[1];
    assert_eq!(image.kind, BlockKind::Image);
    assert_eq!(image.src(), Some("data:image/png;base64,AA=="));
    assert_eq!(value.selection().focus.key, image.key);
}

#[test]
fn test_insert_block_into_empty_block_goes_after() {
    let mut editor = editor_with(vec![Block::paragraph("")]);
    caret(&mut editor, "", 0);

    editor
        .apply(Cmd::InsertBlock(BlockDescriptor::image("x")))
        .unwrap();

    let kinds: Vec<_> = editor
        .value()
        .document()
        .leaf_blocks()
        .iter()
        .map(|b| b.kind.clone())
        .collect();
    assert_eq!(kinds, vec![BlockKind::Paragraph, BlockKind::Image]);
}

#[test]
fn test_insert_block_at_start_goes_before() {
    let mut editor = editor_with(vec![Block::paragraph("text")]);
    caret(&mut editor, "text", 0);

    editor
        .apply(Cmd::InsertBlock(BlockDescriptor::image("x")))
        .unwrap();

    assert_eq!(
        editor.value().document().leaf_blocks()[0].kind,
        BlockKind::Image
    );
}

#[test]
fn test_typing_on_image_starts_paragraph_after_it() {
    let mut editor = editor_with(vec![Block::paragraph("top"), Block::image("x")]);
    let image = editor.value().document().leaf_blocks()[1].key;
    editor
        .apply(Cmd::Select(Selection::at_start_of(image)))
        .unwrap();

    editor.apply(Cmd::InsertText("hi".to_string())).unwrap();

    assert_eq!(texts(&editor), vec!["top", "", "hi"]);
    let value = editor.value();
    assert_eq!(value.document().leaf_blocks()[2].kind, BlockKind::Paragraph);
    assert_eq!(value.selection().focus.offset, 2);
}

#[test]
fn test_split_block_keeps_kind() {
    let mut editor = editor_with(vec![bulleted(vec![item("onetwo")])]);
    caret(&mut editor, "onetwo", 3);

    editor.apply(Cmd::SplitBlock).unwrap();

    let list = &editor.value().document().nodes[0];
    assert_eq!(list.children().len(), 2);
    assert!(list.children().iter().all(|b| b.kind == BlockKind::ListItem));
    assert_eq!(texts(&editor), vec!["one", "two"]);
    assert_eq!(editor.value().selection().focus.offset, 0);
}

#[test]
fn test_delete_backward_inside_text_removes_char() {
    let mut editor = editor_with(vec![Block::paragraph("abc")]);
    caret(&mut editor, "abc", 2);

    editor.apply(Cmd::DeleteBackward).unwrap();

    assert_eq!(texts(&editor), vec!["ac"]);
    assert_eq!(editor.value().selection().focus.offset, 1);
}

#[test]
fn test_delete_backward_at_start_merges_with_previous() {
    let mut editor = editor_with(vec![Block::paragraph("ab"), Block::paragraph("cd")]);
    caret(&mut editor, "cd", 0);

    editor.apply(Cmd::DeleteBackward).unwrap();

    assert_eq!(texts(&editor), vec!["abcd"]);
    assert_eq!(editor.value().selection().focus.offset, 2);
}

#[test]
fn test_delete_backward_removes_previous_image() {
    let mut editor = editor_with(vec![Block::image("x"), Block::paragraph("text")]);
    caret(&mut editor, "text", 0);

    editor.apply(Cmd::DeleteBackward).unwrap();

    assert_eq!(editor.value().block_count(), 1);
    assert_eq!(texts(&editor), vec!["text"]);
}

#[test]
fn test_delete_backward_on_last_item_drops_empty_list() {
    let mut editor = editor_with(vec![Block::paragraph("p"), bulleted(vec![item("")])]);
    caret(&mut editor, "", 0);

    editor.apply(Cmd::DeleteBackward).unwrap();

    let nodes = &editor.value().document().nodes;
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind, BlockKind::Paragraph);
}

#[test]
fn test_delete_forward_at_end_merges_next() {
    let mut editor = editor_with(vec![Block::paragraph("ab"), Block::paragraph("cd")]);
    caret(&mut editor, "ab", 2);

    editor.apply(Cmd::DeleteForward).unwrap();

    assert_eq!(texts(&editor), vec!["abcd"]);
}

#[test]
fn test_delete_expanded_across_blocks_joins_ends() {
    let mut editor = editor_with(vec![
        Block::paragraph("keep this"),
        Block::paragraph("gone"),
        Block::paragraph("and that"),
    ]);
    let (first, last) = (key_of(&editor, "keep this"), key_of(&editor, "and that"));
    editor
        .apply(Cmd::Select(Selection::range(
            Point::new(first, 4),
            Point::new(last, 3),
        )))
        .unwrap();

    editor.apply(Cmd::DeleteBackward).unwrap();

    assert_eq!(texts(&editor), vec!["keep that"]);
}

#[test]
fn test_select_unknown_key_fails_without_change() {
    let mut editor = editor_with(vec![Block::paragraph("a")]);
    let version = editor.version();

    let result = editor.apply(Cmd::Select(Selection::at_start_of(Key::generate())));

    assert!(matches!(result, Err(EditError::UnknownKey(_))));
    assert_eq!(editor.version(), version);
}

#[test]
fn test_patch_reports_block_count() {
    let mut editor = editor_with(vec![Block::paragraph("ab")]);
    caret(&mut editor, "ab", 1);

    let patch = editor.apply(Cmd::SplitBlock).unwrap();

    assert_eq!(patch.block_count, 2);
    assert_eq!(patch.version, editor.version());
}

fn move_focus(editor: &mut Editor, direction: Direction, extend: bool) {
    editor
        .apply(Cmd::MoveFocus { direction, extend })
        .unwrap();
}

#[test]
fn test_arrows_move_by_char_and_cross_blocks() {
    let mut editor = editor_with(vec![Block::paragraph("ab"), Block::paragraph("cd")]);
    let first = key_of(&editor, "ab");
    let second = key_of(&editor, "cd");
    caret(&mut editor, "ab", 1);

    move_focus(&mut editor, Direction::Right, false);
    assert_eq!(editor.value().selection(), Selection::collapsed(Point::new(first, 2)));

    move_focus(&mut editor, Direction::Right, false);
    assert_eq!(editor.value().selection(), Selection::at_start_of(second));

    move_focus(&mut editor, Direction::Left, false);
    assert_eq!(editor.value().selection(), Selection::collapsed(Point::new(first, 2)));
}

#[test]
fn test_arrows_stop_at_document_edges() {
    let mut editor = editor_with(vec![Block::paragraph("ab")]);
    let key = key_of(&editor, "ab");
    caret(&mut editor, "ab", 1);

    move_focus(&mut editor, Direction::Up, false);
    assert_eq!(editor.value().selection(), Selection::at_start_of(key));
    move_focus(&mut editor, Direction::Left, false);
    assert_eq!(editor.value().selection(), Selection::at_start_of(key));

    move_focus(&mut editor, Direction::Down, false);
    assert_eq!(editor.value().selection(), Selection::collapsed(Point::new(key, 2)));
}

#[test]
fn test_up_and_down_keep_offset_clamped_to_target() {
    let mut editor = editor_with(vec![Block::paragraph("long text"), Block::paragraph("ab")]);
    let first = key_of(&editor, "long text");
    let second = key_of(&editor, "ab");
    caret(&mut editor, "long text", 6);

    move_focus(&mut editor, Direction::Down, false);
    assert_eq!(editor.value().selection(), Selection::collapsed(Point::new(second, 2)));

    move_focus(&mut editor, Direction::Up, false);
    assert_eq!(editor.value().selection(), Selection::collapsed(Point::new(first, 2)));
}

#[test]
fn test_shift_arrows_extend_then_plain_arrow_collapses() {
    let mut editor = editor_with(vec![Block::paragraph("abc")]);
    let key = key_of(&editor, "abc");
    caret(&mut editor, "abc", 3);

    move_focus(&mut editor, Direction::Left, true);
    move_focus(&mut editor, Direction::Left, true);
    assert_eq!(
        editor.value().selection(),
        Selection::range(Point::new(key, 3), Point::new(key, 1))
    );

    move_focus(&mut editor, Direction::Right, false);
    assert_eq!(editor.value().selection(), Selection::collapsed(Point::new(key, 3)));
}

#[test]
fn test_extended_selection_reaches_range_commands() {
    let mut editor = editor_with(vec![Block::paragraph("abc")]);
    caret(&mut editor, "abc", 0);
    move_focus(&mut editor, Direction::Right, true);
    move_focus(&mut editor, Direction::Right, true);

    editor.apply(Cmd::ToggleMark(MarkKind::Bold)).unwrap();

    let block = editor.value().document().leaf_blocks()[0].clone();
    let leaves = block.text().unwrap().leaves();
    assert_eq!(leaves[0].text, "ab");
    assert!(leaves[0].marks.contains(&MarkKind::Bold));
    assert_eq!(leaves[1].text, "c");
    assert!(leaves[1].marks.is_empty());
}
