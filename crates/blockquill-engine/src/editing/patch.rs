/// Result of applying one or more commands
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Editor version after the edit
    pub version: u64,
    /// Leaf blocks in the document after the edit
    pub block_count: usize,
}
