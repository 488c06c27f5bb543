//! Document → block conversion.
//!
//! Markdown is parsed with `pulldown-cmark`; plain text is split into
//! paragraphs on blank lines.

mod languages;
mod markdown;

pub use languages::notion_language;
pub use markdown::{convert_markdown, strip_front_matter};

use crate::model::{Block, DocumentKind};

/// Converts file content into the blocks of its page.
pub fn convert_document(content: &str, kind: DocumentKind) -> Vec<Block> {
    match kind {
        DocumentKind::Markdown => convert_markdown(content),
        DocumentKind::PlainText => convert_plain_text(content),
    }
}

/// One paragraph per blank-line separated section; line breaks inside a section are kept.
pub fn convert_plain_text(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut section: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            push_section(&mut blocks, &mut section);
        } else {
            section.push(line.trim_end());
        }
    }
    push_section(&mut blocks, &mut section);

    blocks
}

fn push_section(blocks: &mut Vec<Block>, section: &mut Vec<&str>) {
    if section.is_empty() {
        return;
    }
    blocks.push(Block::paragraph(section.join("\n")));
    section.clear();
}
