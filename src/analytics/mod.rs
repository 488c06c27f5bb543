// src/analytics/mod.rs
//! Content measurement for walked documentation trees.

use crate::model::{DocumentKind, DocumentNode};

/// Quick statistics for user-facing progress messages.
///
/// Use this for lightweight summaries shown to the user (e.g., "Found 12 files in 4 directories").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSummary {
    /// Directories including the root.
    pub directories: usize,
    pub files: usize,
    pub markdown_files: usize,
    pub plain_text_files: usize,
    /// Files that populate their directory's page instead of getting their own.
    pub index_files: usize,
    /// Depth of the deepest node; the root's children are at depth 1.
    pub deepest_nesting: usize,
    pub total_bytes: usize,
}

impl TreeSummary {
    /// Number of pages a sync of this tree maps to, root page excluded.
    pub fn page_count(&self) -> usize {
        self.directories.saturating_sub(1) + self.files - self.index_files
    }
}

/// Measures a walked tree.
pub fn measure_tree(root: &DocumentNode) -> TreeSummary {
    let mut summary = TreeSummary::default();
    let mut pending = vec![(root, 0usize)];

    while let Some((node, depth)) = pending.pop() {
        summary.deepest_nesting = summary.deepest_nesting.max(depth);
        match node {
            DocumentNode::Directory(dir) => {
                summary.directories += 1;
                pending.extend(dir.children.iter().map(|child| (child, depth + 1)));
            }
            DocumentNode::File(file) => {
                summary.files += 1;
                summary.total_bytes += file.content.len();
                if file.is_index() {
                    summary.index_files += 1;
                }
                match file.kind {
                    DocumentKind::Markdown => summary.markdown_files += 1,
                    DocumentKind::PlainText => summary.plain_text_files += 1,
                }
            }
        }
    }

    summary
}
