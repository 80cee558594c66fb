use std::fmt;

use crate::input::KeyPress;

/// User-set ceiling on the document block count; `None` when unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockLimit(Option<usize>);

impl BlockLimit {
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn new(limit: usize) -> Self {
        Self(Some(limit))
    }

    /// Read the numeric limit input. Empty or unparseable text unsets it.
    pub fn parse_input(input: &str) -> Self {
        Self(input.trim().parse().ok())
    }

    pub fn get(&self) -> Option<usize> {
        self.0
    }

    /// Growth is blocked from here on
    pub fn is_reached(&self, count: usize) -> bool {
        self.0.is_some_and(|limit| count >= limit)
    }

    /// Saving is blocked from here on
    pub fn is_exceeded(&self, count: usize) -> bool {
        self.0.is_some_and(|limit| count > limit)
    }
}

impl From<Option<usize>> for BlockLimit {
    fn from(limit: Option<usize>) -> Self {
        Self(limit)
    }
}

impl fmt::Display for BlockLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(limit) => write!(f, "{limit}"),
            None => write!(f, "None"),
        }
    }
}

/// Message the UI must show the user before they carry on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    BlockLimitExceeded,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::BlockLimitExceeded => write!(f, "Block limit exceeded"),
        }
    }
}

/// Something that wants to change the document
#[derive(Debug, Clone, Copy)]
pub enum GateInput<'a> {
    Keystroke(&'a KeyPress),
    ImageInsert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Prevent default handling; nothing reaches the document
    Suppress,
    SuppressWithNotice(Notice),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Decides whether an input may reach the document given the block count.
///
/// Never mutates anything. Deletions always pass so an over-limit document
/// can be brought back under.
pub struct BlockLimitGate;

impl BlockLimitGate {
    pub fn evaluate(count: usize, limit: BlockLimit, input: GateInput<'_>) -> GateDecision {
        if !limit.is_reached(count) {
            return GateDecision::Allow;
        }
        let decision = match input {
            GateInput::Keystroke(press) if press.is_deletion() => GateDecision::Allow,
            GateInput::Keystroke(_) => GateDecision::Suppress,
            GateInput::ImageInsert => GateDecision::SuppressWithNotice(Notice::BlockLimitExceeded),
        };
        log::debug!("block limit {limit} reached at {count} blocks: {input:?} -> {decision:?}");
        decision
    }

    pub fn save_enabled(count: usize, limit: BlockLimit) -> bool {
        !limit.is_exceeded(count)
    }
}
