//! Directory walking. Turns the docs directory into a [`DocumentNode`] tree.
//!
//! Only the root is allowed to fail the walk. A subdirectory or file that
//! cannot be read is reported as a [`WalkWarning`] and left out, so one bad
//! entry costs its own subtree and nothing else. Its parent remembers the
//! page title it would have had, so the sync leaves that page alone.

use crate::constants::{INDEX_FILE_STEM, MARKDOWN_EXTENSIONS, PLAIN_TEXT_EXTENSIONS};
use crate::error::AppError;
use crate::model::{file_stem, page_title, DirectoryNode, DocumentKind, DocumentNode, FileNode};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An entry that was skipped because it could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkWarning {
    /// Path relative to the walked root.
    pub path: PathBuf,
    pub kind: io::ErrorKind,
    pub reason: String,
}

impl WalkWarning {
    fn new(path: PathBuf, error: &io::Error) -> Self {
        Self {
            path,
            kind: error.kind(),
            reason: error.to_string(),
        }
    }

    /// The filesystem error this warning stands for.
    pub fn to_error(&self) -> AppError {
        AppError::file_system(&self.path, io::Error::new(self.kind, self.reason.clone()))
    }
}

impl fmt::Display for WalkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// The walked tree plus everything that had to be left out.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Always a [`DocumentNode::Directory`].
    pub root: DocumentNode,
    pub warnings: Vec<WalkWarning>,
}

/// Walks `root` and builds the document tree.
///
/// Fails with a filesystem error when `root` does not exist, is not a
/// directory, or cannot be listed.
pub fn walk_directory(root: &Path) -> Result<WalkOutcome, AppError> {
    let metadata = fs::metadata(root).map_err(|e| AppError::file_system(root, e))?;
    if !metadata.is_dir() {
        return Err(AppError::file_system(
            root,
            io::Error::other("not a directory"),
        ));
    }

    let entries = sorted_entries(root).map_err(|e| AppError::file_system(root, e))?;

    let mut walker = Walker {
        warnings: Vec::new(),
    };
    let (children, unreadable) = walker.collect_children(entries, Path::new(""));

    let name = root
        .canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    for warning in &walker.warnings {
        log::debug!("Skipped {}", warning);
    }

    Ok(WalkOutcome {
        root: DocumentNode::Directory(DirectoryNode {
            name,
            path: PathBuf::new(),
            children,
            unreadable,
        }),
        warnings: walker.warnings,
    })
}

/// Decides how a file is interpreted from its name; `None` means it is not documentation.
pub fn classify_file(name: &str) -> Option<DocumentKind> {
    let extension = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return Some(DocumentKind::PlainText),
    };

    if MARKDOWN_EXTENSIONS.contains(&extension.as_str()) {
        Some(DocumentKind::Markdown)
    } else if PLAIN_TEXT_EXTENSIONS.contains(&extension.as_str()) {
        Some(DocumentKind::PlainText)
    } else {
        None
    }
}

struct Walker {
    warnings: Vec<WalkWarning>,
}

enum Visit {
    Node(DocumentNode),
    Skipped,
    /// Could not be read; carries the page title when the entry has a page.
    Unreadable(Option<String>),
}

impl Walker {
    /// Returns the readable children and the titles of unreadable ones.
    fn collect_children(
        &mut self,
        entries: Vec<fs::DirEntry>,
        parent: &Path,
    ) -> (Vec<DocumentNode>, Vec<String>) {
        let mut children = Vec::new();
        let mut unreadable = Vec::new();
        for entry in entries {
            match self.visit(entry, parent) {
                Visit::Node(node) => children.push(node),
                Visit::Unreadable(Some(title)) => unreadable.push(title),
                Visit::Unreadable(None) | Visit::Skipped => {}
            }
        }
        (children, unreadable)
    }

    fn visit(&mut self, entry: fs::DirEntry, parent: &Path) -> Visit {
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = parent.join(&name);

        if name.starts_with('.') {
            log::debug!("Skipping hidden entry {}", relative.display());
            return Visit::Skipped;
        }

        // DirEntry::file_type does not follow symlinks, so links land in the
        // "neither" branch below.
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                self.warn(relative, &e);
                return Visit::Unreadable(file_page_title(&name));
            }
        };

        if file_type.is_dir() {
            self.visit_directory(&entry.path(), name, relative)
        } else if file_type.is_file() {
            self.visit_file(&entry.path(), name, relative)
        } else {
            log::debug!("Skipping non-regular entry {}", relative.display());
            Visit::Skipped
        }
    }

    fn visit_directory(&mut self, absolute: &Path, name: String, relative: PathBuf) -> Visit {
        let entries = match sorted_entries(absolute) {
            Ok(entries) => entries,
            Err(e) => {
                self.warn(relative, &e);
                return Visit::Unreadable(Some(page_title(&name)));
            }
        };

        let (children, unreadable) = self.collect_children(entries, &relative);
        Visit::Node(DocumentNode::Directory(DirectoryNode {
            name,
            path: relative,
            children,
            unreadable,
        }))
    }

    fn visit_file(&mut self, absolute: &Path, name: String, relative: PathBuf) -> Visit {
        let Some(kind) = classify_file(&name) else {
            log::debug!("Skipping non-documentation file {}", relative.display());
            return Visit::Skipped;
        };

        match fs::read_to_string(absolute) {
            Ok(content) => Visit::Node(DocumentNode::File(FileNode {
                name,
                path: relative,
                content,
                kind,
            })),
            Err(e) => {
                self.warn(relative, &e);
                Visit::Unreadable(file_page_title(&name))
            }
        }
    }

    fn warn(&mut self, path: PathBuf, error: &io::Error) {
        self.warnings.push(WalkWarning::new(path, error));
    }
}

/// Title of the page a file maps to; index files have none.
fn file_page_title(name: &str) -> Option<String> {
    let stem = file_stem(name);
    (stem != INDEX_FILE_STEM).then(|| page_title(stem))
}

/// Lists a directory with entries ordered by file name.
fn sorted_entries(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}
