//! Domain model: the local document tree and the blocks written to Notion.

mod block;
mod document;

pub use block::Block;
pub use document::{file_stem, page_title, DirectoryNode, DocumentKind, DocumentNode, FileNode};
