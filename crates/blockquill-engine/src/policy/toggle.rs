use crate::editing::{BlockKind, Cmd, DEFAULT_BLOCK, MarkKind, Value};
use crate::policy::list_nesting::is_in_list_of;
use crate::policy::{BlockLimit, BlockLimitGate};

/// Mark buttons, in toolbar order
pub const TOOLBAR_MARKS: [MarkKind; 4] = [
    MarkKind::Bold,
    MarkKind::Italic,
    MarkKind::Underlined,
    MarkKind::Code,
];

/// Block buttons, in toolbar order
pub const TOOLBAR_BLOCKS: [BlockKind; 5] = [
    BlockKind::HeadingOne,
    BlockKind::HeadingTwo,
    BlockKind::BlockQuote,
    BlockKind::NumberedList,
    BlockKind::BulletedList,
];

pub fn toggle_mark_commands(mark: &MarkKind) -> Vec<Cmd> {
    vec![Cmd::ToggleMark(mark.clone())]
}

/// Commands a block button click expands to for the current value
pub fn toggle_block_commands(value: &Value, kind: &BlockKind) -> Vec<Cmd> {
    let in_list = value.has_block(&BlockKind::ListItem);
    let unwrap_lists = [
        Cmd::UnwrapBlock(BlockKind::BulletedList),
        Cmd::UnwrapBlock(BlockKind::NumberedList),
    ];

    let Some(other_list) = kind.other_list() else {
        let target = if value.has_block(kind) {
            DEFAULT_BLOCK
        } else {
            kind.clone()
        };
        let mut commands = vec![Cmd::SetBlocks(target)];
        if in_list {
            commands.extend(unwrap_lists);
        }
        return commands;
    };

    let in_this_list = value.selected_blocks().iter().any(|block| {
        value
            .document()
            .closest(block.key, |parent| &parent.kind == kind)
            .is_some()
    });

    if in_list && in_this_list {
        let mut commands = vec![Cmd::SetBlocks(DEFAULT_BLOCK)];
        commands.extend(unwrap_lists);
        commands
    } else if in_list {
        vec![Cmd::UnwrapBlock(other_list), Cmd::WrapBlock(kind.clone())]
    } else {
        vec![
            Cmd::SetBlocks(BlockKind::ListItem),
            Cmd::WrapBlock(kind.clone()),
        ]
    }
}

pub fn is_mark_active(value: &Value, mark: &MarkKind) -> bool {
    value.has_mark(mark)
}

/// A list button is active when a list item is selected and the first
/// selected block sits directly in a list of that kind
pub fn is_block_button_active(value: &Value, kind: &BlockKind) -> bool {
    if !kind.is_list() {
        return value.has_block(kind);
    }
    match value.first_block() {
        Some(first) => {
            value.has_block(&BlockKind::ListItem) && is_in_list_of(value, first, kind)
        }
        None => value.has_block(kind),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub active: bool,
    pub enabled: bool,
}

/// Everything the toolbar and tools strip display, derived from one value
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarState {
    pub marks: Vec<(MarkKind, ButtonState)>,
    pub blocks: Vec<(BlockKind, ButtonState)>,
    pub image: ButtonState,
    pub save_enabled: bool,
    pub block_count: usize,
    /// Leaf blocks next to the focused one, inside its list when it has one
    pub list_scope_count: usize,
    pub limit: BlockLimit,
}

impl ToolbarState {
    pub fn from_value(value: &Value, limit: BlockLimit) -> Self {
        let block_count = value.block_count();
        let list_scope_count = value.list_scope_block_count();

        let marks = TOOLBAR_MARKS
            .iter()
            .map(|mark| {
                let state = ButtonState {
                    active: is_mark_active(value, mark),
                    enabled: true,
                };
                (mark.clone(), state)
            })
            .collect();

        // Re-tagging, wrapping and unwrapping never add leaf blocks, so no
        // block button is ever gated
        let blocks = TOOLBAR_BLOCKS
            .iter()
            .map(|kind| {
                let state = ButtonState {
                    active: is_block_button_active(value, kind),
                    enabled: true,
                };
                (kind.clone(), state)
            })
            .collect();

        Self {
            marks,
            blocks,
            image: ButtonState {
                active: value.has_block(&BlockKind::Image),
                enabled: !limit.is_reached(block_count),
            },
            save_enabled: BlockLimitGate::save_enabled(block_count, limit),
            block_count,
            list_scope_count,
            limit,
        }
    }

    pub fn block(&self, kind: &BlockKind) -> Option<ButtonState> {
        self.blocks
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, state)| *state)
    }

    pub fn mark(&self, mark: &MarkKind) -> Option<ButtonState> {
        self.marks
            .iter()
            .find(|(m, _)| m == mark)
            .map(|(_, state)| *state)
    }
}
