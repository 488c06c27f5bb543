use crate::constants::INDEX_FILE_STEM;
use std::path::{Path, PathBuf};

/// How a file's content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Markdown,
    PlainText,
}

/// A node of the local documentation tree.
///
/// Every node except index files becomes exactly one Notion page: directories
/// hold child pages, files hold content blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Directory(DirectoryNode),
    File(FileNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryNode {
    pub name: String,
    /// Path relative to the synced root; empty for the root itself.
    pub path: PathBuf,
    /// Children ordered by name.
    pub children: Vec<DocumentNode>,
    /// Page titles of children that exist on disk but could not be read.
    pub unreadable: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    pub name: String,
    /// Path relative to the synced root.
    pub path: PathBuf,
    pub content: String,
    pub kind: DocumentKind,
}

impl DocumentNode {
    pub fn name(&self) -> &str {
        match self {
            DocumentNode::Directory(dir) => &dir.name,
            DocumentNode::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DocumentNode::Directory(dir) => &dir.path,
            DocumentNode::File(file) => &file.path,
        }
    }

    /// The title of the Notion page this node maps to.
    pub fn title(&self) -> String {
        match self {
            DocumentNode::Directory(dir) => page_title(&dir.name),
            DocumentNode::File(file) => page_title(file.stem()),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, DocumentNode::File(file) if file.is_index())
    }

    /// Path for log and error messages; the root shows as `.`.
    pub fn display_path(&self) -> String {
        let path = self.path();
        if path.as_os_str().is_empty() {
            ".".to_string()
        } else {
            path.display().to_string()
        }
    }
}

impl DirectoryNode {
    /// The `index` file whose content belongs to this directory's own page.
    pub fn index_file(&self) -> Option<&FileNode> {
        self.children.iter().find_map(|child| match child {
            DocumentNode::File(file) if file.is_index() => Some(file),
            _ => None,
        })
    }

    /// Children that get a page of their own.
    pub fn page_children(&self) -> impl Iterator<Item = &DocumentNode> {
        self.children.iter().filter(|child| !child.is_index())
    }
}

impl FileNode {
    /// File name without its extension.
    pub fn stem(&self) -> &str {
        file_stem(&self.name)
    }

    pub fn is_index(&self) -> bool {
        self.stem() == INDEX_FILE_STEM
    }
}

/// Strips the extension from a file name; dotfiles keep their name.
pub fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Derives a page title from a file or directory name.
///
/// Dashes and underscores become spaces, the first letter is upper-cased and
/// the rest lower-cased, so `API-Reference` becomes `Api reference`.
pub fn page_title(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let trimmed = spaced.trim();

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => name.to_string(),
    }
}
