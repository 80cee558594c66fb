//! Rules layered on top of the document model.
//!
//! Nothing here owns or mutates document state. Each piece reads a
//! [`crate::editing::Value`] and answers with a decision or a list of
//! commands for the editor to apply.

pub mod gate;
pub mod list_nesting;
pub mod toggle;

pub use gate::{BlockLimit, BlockLimitGate, GateDecision, GateInput, Notice};
pub use list_nesting::{ListContext, MAX_INDENT_DEPTH, MIN_OUTDENT_DEPTH, NestingOutcome};
pub use toggle::{
    ButtonState, TOOLBAR_BLOCKS, TOOLBAR_MARKS, ToolbarState, is_block_button_active,
    is_mark_active, toggle_block_commands, toggle_mark_commands,
};
