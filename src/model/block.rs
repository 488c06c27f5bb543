use crate::types::RichText;
use serde::{Deserialize, Serialize};

/// A unit of page content produced from a local document.
///
/// Blocks are written to Notion immediately after conversion and are never
/// read back; the sync keeps no record of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// Heading with a level in `1..=3`.
    Heading { level: u8, text: RichText },
    Paragraph { text: RichText },
    BulletItem { text: RichText, children: Vec<Block> },
    NumberedItem { text: RichText, children: Vec<Block> },
    ToDo {
        text: RichText,
        checked: bool,
        children: Vec<Block>,
    },
    Quote { text: RichText },
    /// Code with a language from Notion's vocabulary (`"plain text"` when unknown).
    Code { language: String, text: String },
    Divider,
    /// Externally hosted image.
    Image { url: String, caption: RichText },
    Table {
        has_column_header: bool,
        rows: Vec<Vec<RichText>>,
    },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: RichText::plain(text),
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: RichText::plain(text),
        }
    }

    /// The Notion block type this block is written as.
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Heading { level: 1, .. } => "heading_1",
            Block::Heading { level: 2, .. } => "heading_2",
            Block::Heading { .. } => "heading_3",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletItem { .. } => "bulleted_list_item",
            Block::NumberedItem { .. } => "numbered_list_item",
            Block::ToDo { .. } => "to_do",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::Divider => "divider",
            Block::Image { .. } => "image",
            Block::Table { .. } => "table",
        }
    }

    /// Nested blocks, for the list-like variants that carry them.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::BulletItem { children, .. }
            | Block::NumberedItem { children, .. }
            | Block::ToDo { children, .. } => children,
            _ => &[],
        }
    }

    /// Mutable access to nested blocks; `None` for variants that cannot nest.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            Block::BulletItem { children, .. }
            | Block::NumberedItem { children, .. }
            | Block::ToDo { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Text content without styling, for logging and assertions.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::BulletItem { text, .. }
            | Block::NumberedItem { text, .. }
            | Block::ToDo { text, .. }
            | Block::Quote { text } => text.plain_text(),
            Block::Code { text, .. } => text.clone(),
            Block::Divider => String::new(),
            Block::Image { caption, .. } => caption.plain_text(),
            Block::Table { rows, .. } => rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(RichText::plain_text)
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_types_follow_notion_names() {
        assert_eq!(Block::heading(1, "a").block_type(), "heading_1");
        assert_eq!(Block::heading(2, "a").block_type(), "heading_2");
        assert_eq!(Block::heading(3, "a").block_type(), "heading_3");
        assert_eq!(Block::paragraph("a").block_type(), "paragraph");
        assert_eq!(Block::Divider.block_type(), "divider");
    }

    #[test]
    fn only_list_like_blocks_nest() {
        let mut item = Block::BulletItem {
            text: RichText::plain("parent"),
            children: vec![],
        };
        item.children_mut().unwrap().push(Block::paragraph("child"));
        assert_eq!(item.children().len(), 1);

        let mut para = Block::paragraph("flat");
        assert!(para.children_mut().is_none());
        assert!(para.children().is_empty());
    }

    #[test]
    fn table_plain_text_joins_cells() {
        let table = Block::Table {
            has_column_header: true,
            rows: vec![
                vec![RichText::plain("a"), RichText::plain("b")],
                vec![RichText::plain("1"), RichText::plain("2")],
            ],
        };
        assert_eq!(table.plain_text(), "a | b\n1 | 2");
    }
}
