use crate::editing::{Block, BlockKind, Cmd, DEFAULT_BLOCK, Value};
use crate::input::{Key, KeyPress};

/// Deepest level Tab will still indent from
pub const MAX_INDENT_DEPTH: usize = 3;
/// Shallowest level Shift+Tab will outdent from
pub const MIN_OUTDENT_DEPTH: usize = 3;

/// What the controller reads from the value on each key event
#[derive(Debug, Clone, PartialEq)]
pub struct ListContext {
    /// Depth of the first selected block; top-level blocks are at 1
    pub depth: usize,
    pub is_list: bool,
    /// Kind of the nearest list ancestor, bulleted when there is none
    pub parent_type: BlockKind,
    pub has_list_ancestor: bool,
    /// List ancestors of the first selected block, nearest first
    pub list_ancestors: Vec<BlockKind>,
    pub is_empty: bool,
}

impl ListContext {
    pub fn from_value(value: &Value) -> Option<Self> {
        let block = value.first_block()?;
        let document = value.document();
        let list_ancestors: Vec<BlockKind> = document
            .ancestors_of(block.key)
            .into_iter()
            .filter(|b| b.kind.is_list())
            .map(|b| b.kind.clone())
            .collect();

        Some(Self {
            depth: document.depth_of(block.key).unwrap_or(1),
            is_list: block.kind == BlockKind::ListItem,
            parent_type: list_ancestors
                .first()
                .cloned()
                .unwrap_or(BlockKind::BulletedList),
            has_list_ancestor: !list_ancestors.is_empty(),
            is_empty: !block.is_void() && block.text().is_none_or(|t| t.is_empty()),
            list_ancestors,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NestingOutcome {
    /// Not a list event; carry on with hotkeys and default handling
    Inert,
    /// A list event the controller declines; default handling applies
    Deferred,
    Apply {
        suppress_default: bool,
        commands: Vec<Cmd>,
    },
}

/// Interpret Tab, Shift+Tab and Enter inside a list. Keeps no state.
pub fn handle_key(press: &KeyPress, value: &Value) -> NestingOutcome {
    let Some(context) = ListContext::from_value(value) else {
        return NestingOutcome::Inert;
    };
    let outcome = decide(press, &context);
    if outcome != NestingOutcome::Inert {
        log::debug!(
            "list nesting {:?} at depth {}: {outcome:?}",
            press.key,
            context.depth
        );
    }
    outcome
}

fn decide(press: &KeyPress, context: &ListContext) -> NestingOutcome {
    if !context.is_list {
        return NestingOutcome::Inert;
    }

    match press.key {
        Key::Tab if !press.modifiers.shift => {
            if context.depth > MAX_INDENT_DEPTH || !context.has_list_ancestor {
                return NestingOutcome::Deferred;
            }
            NestingOutcome::Apply {
                suppress_default: true,
                commands: vec![
                    Cmd::SetBlocks(BlockKind::ListItem),
                    Cmd::WrapBlock(context.parent_type.clone()),
                ],
            }
        }
        Key::Tab => {
            if context.depth < MIN_OUTDENT_DEPTH {
                return NestingOutcome::Deferred;
            }
            NestingOutcome::Apply {
                suppress_default: true,
                commands: vec![
                    Cmd::SetBlocks(BlockKind::ListItem),
                    Cmd::UnwrapBlock(context.parent_type.clone()),
                ],
            }
        }
        Key::Enter if context.is_empty => {
            let mut commands: Vec<Cmd> = context
                .list_ancestors
                .iter()
                .cloned()
                .map(Cmd::UnwrapBlock)
                .collect();
            commands.push(Cmd::SetBlocks(DEFAULT_BLOCK));
            // The default split still follows, opening a fresh paragraph
            NestingOutcome::Apply {
                suppress_default: false,
                commands,
            }
        }
        _ => NestingOutcome::Inert,
    }
}

/// True when `block` sits directly in a list of `kind`
pub fn is_in_list_of(value: &Value, block: &Block, kind: &BlockKind) -> bool {
    value
        .document()
        .parent_of(block.key)
        .and_then(|parent| parent.kind().cloned())
        .is_some_and(|parent| &parent == kind)
}
