use serde::{Deserialize, Serialize};
use std::fmt;

/// Block kinds understood by the editor.
///
/// The wire name (`"heading-one"`, `"bulleted-list"`, ...) is what gets
/// persisted. Anything not recognised is carried as `Unknown` so a stored
/// document never loses a block it cannot render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
    Image,
    Unknown(String),
}

/// Block kind that every reset ("revert to default") lands on.
pub const DEFAULT_BLOCK: BlockKind = BlockKind::Paragraph;

impl BlockKind {
    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::HeadingOne => "heading-one",
            BlockKind::HeadingTwo => "heading-two",
            BlockKind::BlockQuote => "block-quote",
            BlockKind::BulletedList => "bulleted-list",
            BlockKind::NumberedList => "numbered-list",
            BlockKind::ListItem => "list-item",
            BlockKind::Image => "image",
            BlockKind::Unknown(name) => name,
        }
    }

    /// Bulleted or numbered list container
    pub fn is_list(&self) -> bool {
        matches!(self, BlockKind::BulletedList | BlockKind::NumberedList)
    }

    /// Void blocks hold no editable text
    pub fn is_void(&self) -> bool {
        matches!(self, BlockKind::Image)
    }

    /// The list kind a list button would swap away from
    pub fn other_list(&self) -> Option<BlockKind> {
        match self {
            BlockKind::BulletedList => Some(BlockKind::NumberedList),
            BlockKind::NumberedList => Some(BlockKind::BulletedList),
            _ => None,
        }
    }
}

impl From<&str> for BlockKind {
    fn from(name: &str) -> Self {
        match name {
            "paragraph" => BlockKind::Paragraph,
            "heading-one" => BlockKind::HeadingOne,
            "heading-two" => BlockKind::HeadingTwo,
            "block-quote" => BlockKind::BlockQuote,
            "bulleted-list" => BlockKind::BulletedList,
            "numbered-list" => BlockKind::NumberedList,
            "list-item" => BlockKind::ListItem,
            "image" => BlockKind::Image,
            other => BlockKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for BlockKind {
    fn from(name: String) -> Self {
        BlockKind::from(name.as_str())
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline formatting applied over a text range
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarkKind {
    Bold,
    Italic,
    Underlined,
    Code,
    Unknown(String),
}

impl MarkKind {
    pub fn as_str(&self) -> &str {
        match self {
            MarkKind::Bold => "bold",
            MarkKind::Italic => "italic",
            MarkKind::Underlined => "underlined",
            MarkKind::Code => "code",
            MarkKind::Unknown(name) => name,
        }
    }
}

impl From<&str> for MarkKind {
    fn from(name: &str) -> Self {
        match name {
            "bold" => MarkKind::Bold,
            "italic" => MarkKind::Italic,
            "underlined" => MarkKind::Underlined,
            "code" => MarkKind::Code,
            other => MarkKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for MarkKind {
    fn from(name: String) -> Self {
        MarkKind::from(name.as_str())
    }
}

impl From<MarkKind> for String {
    fn from(mark: MarkKind) -> Self {
        mark.as_str().to_string()
    }
}

impl fmt::Display for MarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("paragraph", BlockKind::Paragraph)]
    #[case("heading-one", BlockKind::HeadingOne)]
    #[case("heading-two", BlockKind::HeadingTwo)]
    #[case("block-quote", BlockKind::BlockQuote)]
    #[case("bulleted-list", BlockKind::BulletedList)]
    #[case("numbered-list", BlockKind::NumberedList)]
    #[case("list-item", BlockKind::ListItem)]
    #[case("image", BlockKind::Image)]
    fn test_block_kind_wire_names(#[case] name: &str, #[case] kind: BlockKind) {
        assert_eq!(BlockKind::from(name), kind);
        assert_eq!(kind.as_str(), name);
    }

    #[test]
    fn test_unknown_block_kind_is_preserved() {
        let kind = BlockKind::from("check-list-item");
        assert_eq!(kind, BlockKind::Unknown("check-list-item".to_string()));

        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"check-list-item\"");
    }

    #[test]
    fn test_only_lists_swap_to_other_list() {
        assert_eq!(
            BlockKind::BulletedList.other_list(),
            Some(BlockKind::NumberedList)
        );
        assert_eq!(
            BlockKind::NumberedList.other_list(),
            Some(BlockKind::BulletedList)
        );
        assert_eq!(BlockKind::ListItem.other_list(), None);
    }

    #[test]
    fn test_mark_kind_serializes_as_wire_name() {
        let json = serde_json::to_string(&vec![MarkKind::Bold, MarkKind::Code]).unwrap();
        assert_eq!(json, r#"["bold","code"]"#);

        let marks: Vec<MarkKind> = serde_json::from_str(r#"["italic","strike"]"#).unwrap();
        assert_eq!(
            marks,
            vec![MarkKind::Italic, MarkKind::Unknown("strike".to_string())]
        );
    }
}
