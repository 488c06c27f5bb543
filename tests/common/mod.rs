// tests/common/mod.rs
//! Shared fixtures: an in-memory Notion workspace and docs-tree builders.

#![allow(dead_code)]

use notion_docs_sync::{
    AppError, Block, BlockId, NotionErrorCode, NotionRepository, NotionToken, PageIcon, PageId,
    RemoteBlock, RemoteBlockKind, RemotePage, RemotePageRef, SyncConfig, MAX_BLOCKS_PER_APPEND,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Every call the sync made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RetrievePage(String),
    ListChildren(String),
    CreatePage { parent: String, title: String },
    AppendBlocks { page: String, count: usize },
    ArchiveBlock(String),
    SetPageIcon { page: String, emoji: String },
}

#[derive(Debug, Clone)]
enum EntryKind {
    Page { title: String, icon: Option<String> },
    Content(Block),
}

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    parent: Option<String>,
    kind: EntryKind,
    archived: bool,
}

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    calls: Vec<Call>,
    reject_token: bool,
    failing_titles: HashSet<String>,
    failing_appends: HashSet<String>,
}

/// A Notion workspace held in memory.
///
/// Pages and content blocks live in one list; children keep insertion order
/// like the block-children endpoint does.
pub struct FakeNotion {
    state: Mutex<State>,
    root: PageId,
}

impl FakeNotion {
    /// A workspace with one page titled "Docs".
    pub fn new() -> Self {
        let root = PageId::new_v4();
        let state = State {
            entries: vec![Entry {
                id: root.as_str().to_string(),
                parent: None,
                kind: EntryKind::Page {
                    title: "Docs".to_string(),
                    icon: None,
                },
                archived: false,
            }],
            ..State::default()
        };
        Self {
            state: Mutex::new(state),
            root,
        }
    }

    pub fn root(&self) -> PageId {
        self.root.clone()
    }

    /// Makes every call fail as if the token were revoked.
    pub fn reject_token(&self) {
        self.state.lock().reject_token = true;
    }

    /// Page creation fails for this title.
    pub fn fail_creating(&self, title: &str) {
        self.state.lock().failing_titles.insert(title.to_string());
    }

    /// Appending content fails for the page with this title.
    pub fn fail_appending_to(&self, title: &str) {
        self.state.lock().failing_appends.insert(title.to_string());
    }

    pub fn seed_page(&self, parent: &PageId, title: &str) -> PageId {
        let id = PageId::new_v4();
        self.state.lock().entries.push(Entry {
            id: id.as_str().to_string(),
            parent: Some(parent.as_str().to_string()),
            kind: EntryKind::Page {
                title: title.to_string(),
                icon: None,
            },
            archived: false,
        });
        id
    }

    pub fn seed_icon(&self, page: &PageId, emoji: &str) {
        let mut state = self.state.lock();
        if let Some(entry) = state.entries.iter_mut().find(|entry| entry.id == page.as_str()) {
            if let EntryKind::Page { icon, .. } = &mut entry.kind {
                *icon = Some(emoji.to_string());
            }
        }
    }

    pub fn seed_content(&self, page: &PageId, block: Block) {
        self.state.lock().entries.push(Entry {
            id: BlockId::new_v4().as_str().to_string(),
            parent: Some(page.as_str().to_string()),
            kind: EntryKind::Content(block),
            archived: false,
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Titles of the live child pages of `parent`, in order.
    pub fn page_titles(&self, parent: &PageId) -> Vec<String> {
        self.live_children(parent)
            .into_iter()
            .filter_map(|entry| match entry.kind {
                EntryKind::Page { title, .. } => Some(title),
                EntryKind::Content(_) => None,
            })
            .collect()
    }

    /// The live child page of `parent` titled `title`.
    pub fn child_page(&self, parent: &PageId, title: &str) -> Option<PageId> {
        self.live_children(parent)
            .into_iter()
            .find(|entry| matches!(&entry.kind, EntryKind::Page { title: t, .. } if t == title))
            .map(|entry| PageId::parse(&entry.id).unwrap())
    }

    /// Follows a chain of titles down from the root page.
    pub fn page_at(&self, titles: &[&str]) -> Option<PageId> {
        titles
            .iter()
            .try_fold(self.root(), |page, title| self.child_page(&page, title))
    }

    /// The live content blocks of `page`, in order.
    pub fn content(&self, page: &PageId) -> Vec<Block> {
        self.live_children(page)
            .into_iter()
            .filter_map(|entry| match entry.kind {
                EntryKind::Content(block) => Some(block),
                EntryKind::Page { .. } => None,
            })
            .collect()
    }

    pub fn icon(&self, page: &PageId) -> Option<String> {
        let state = self.state.lock();
        state
            .entries
            .iter()
            .find(|entry| entry.id == page.as_str())
            .and_then(|entry| match &entry.kind {
                EntryKind::Page { icon, .. } => icon.clone(),
                EntryKind::Content(_) => None,
            })
    }

    pub fn is_archived(&self, id: &PageId) -> bool {
        let state = self.state.lock();
        state
            .entries
            .iter()
            .any(|entry| entry.id == id.as_str() && entry.archived)
    }

    pub fn created_pages(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::CreatePage { .. }))
            .count()
    }

    /// Largest number of blocks sent in one append call.
    pub fn largest_append(&self) -> usize {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::AppendBlocks { count, .. } => Some(*count),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    fn live_children(&self, parent: &PageId) -> Vec<Entry> {
        let state = self.state.lock();
        state
            .entries
            .iter()
            .filter(|entry| entry.parent.as_deref() == Some(parent.as_str()) && !entry.archived)
            .cloned()
            .collect()
    }

    /// Records the call and applies the token check every endpoint shares.
    fn begin(&self, state: &mut State, call: Call) -> Result<(), AppError> {
        state.calls.push(call);
        if state.reject_token {
            return Err(AppError::Authentication {
                message: "API token is invalid.".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound {
        resource: "object".to_string(),
        message: format!("Could not find block with ID: {}", id),
    }
}

fn page_title_of(state: &State, id: &str) -> Option<String> {
    state.entries.iter().find_map(|entry| match &entry.kind {
        EntryKind::Page { title, .. } if entry.id == id && !entry.archived => Some(title.clone()),
        _ => None,
    })
}

#[async_trait::async_trait]
impl NotionRepository for FakeNotion {
    async fn retrieve_page(&self, id: &PageId) -> Result<RemotePage, AppError> {
        let mut state = self.state.lock();
        self.begin(&mut state, Call::RetrievePage(id.as_str().to_string()))?;
        let entry = state
            .entries
            .iter()
            .find(|entry| entry.id == id.as_str())
            .ok_or_else(|| not_found(id.as_str()))?;
        match &entry.kind {
            EntryKind::Page { title, icon } => Ok(RemotePage {
                id: id.clone(),
                title: title.clone(),
                icon: icon.clone().map(PageIcon::Emoji),
                archived: entry.archived,
            }),
            EntryKind::Content(_) => Err(not_found(id.as_str())),
        }
    }

    async fn list_children(&self, parent: &PageId) -> Result<Vec<RemoteBlock>, AppError> {
        let mut state = self.state.lock();
        self.begin(&mut state, Call::ListChildren(parent.as_str().to_string()))?;
        if page_title_of(&state, parent.as_str()).is_none() {
            return Err(not_found(parent.as_str()));
        }
        Ok(state
            .entries
            .iter()
            .filter(|entry| entry.parent.as_deref() == Some(parent.as_str()) && !entry.archived)
            .map(|entry| RemoteBlock {
                id: BlockId::parse(&entry.id).unwrap(),
                kind: match &entry.kind {
                    EntryKind::Page { title, .. } => RemoteBlockKind::ChildPage {
                        title: title.clone(),
                    },
                    EntryKind::Content(block) => {
                        RemoteBlockKind::Content(block.block_type().to_string())
                    }
                },
            })
            .collect())
    }

    async fn create_page(
        &self,
        parent: &PageId,
        title: &str,
        icon: Option<&str>,
    ) -> Result<RemotePageRef, AppError> {
        let mut state = self.state.lock();
        self.begin(
            &mut state,
            Call::CreatePage {
                parent: parent.as_str().to_string(),
                title: title.to_string(),
            },
        )?;
        if state.failing_titles.contains(title) {
            return Err(AppError::NotionService {
                code: NotionErrorCode::ValidationFailed,
                message: format!("cannot create '{}'", title),
                status: reqwest::StatusCode::BAD_REQUEST,
            });
        }
        if page_title_of(&state, parent.as_str()).is_none() {
            return Err(not_found(parent.as_str()));
        }

        let id = PageId::new_v4();
        state.entries.push(Entry {
            id: id.as_str().to_string(),
            parent: Some(parent.as_str().to_string()),
            kind: EntryKind::Page {
                title: title.to_string(),
                icon: icon.map(str::to_string),
            },
            archived: false,
        });
        Ok(RemotePageRef {
            id,
            title: title.to_string(),
        })
    }

    async fn append_blocks(&self, page: &PageId, blocks: &[Block]) -> Result<(), AppError> {
        let mut state = self.state.lock();
        self.begin(
            &mut state,
            Call::AppendBlocks {
                page: page.as_str().to_string(),
                count: blocks.len(),
            },
        )?;
        let title = page_title_of(&state, page.as_str()).ok_or_else(|| not_found(page.as_str()))?;
        if state.failing_appends.contains(&title) || blocks.len() > MAX_BLOCKS_PER_APPEND {
            return Err(AppError::NotionService {
                code: NotionErrorCode::ValidationFailed,
                message: format!("cannot append {} block(s) to '{}'", blocks.len(), title),
                status: reqwest::StatusCode::BAD_REQUEST,
            });
        }

        for block in blocks {
            state.entries.push(Entry {
                id: BlockId::new_v4().as_str().to_string(),
                parent: Some(page.as_str().to_string()),
                kind: EntryKind::Content(block.clone()),
                archived: false,
            });
        }
        Ok(())
    }

    async fn archive_block(&self, id: &BlockId) -> Result<(), AppError> {
        let mut state = self.state.lock();
        self.begin(&mut state, Call::ArchiveBlock(id.as_str().to_string()))?;
        let entry = state
            .entries
            .iter_mut()
            .find(|entry| entry.id == id.as_str() && !entry.archived)
            .ok_or_else(|| not_found(id.as_str()))?;
        entry.archived = true;
        Ok(())
    }

    async fn set_page_icon(&self, page: &PageId, emoji: &str) -> Result<(), AppError> {
        let mut state = self.state.lock();
        self.begin(
            &mut state,
            Call::SetPageIcon {
                page: page.as_str().to_string(),
                emoji: emoji.to_string(),
            },
        )?;
        let entry = state
            .entries
            .iter_mut()
            .find(|entry| entry.id == page.as_str() && !entry.archived)
            .ok_or_else(|| not_found(page.as_str()))?;
        match &mut entry.kind {
            EntryKind::Page { icon, .. } => {
                *icon = Some(emoji.to_string());
                Ok(())
            }
            EntryKind::Content(_) => Err(not_found(page.as_str())),
        }
    }
}

/// Writes `files` (relative path, content) under `root`, creating directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

pub fn config(docs_path: &Path, root_page: PageId) -> SyncConfig {
    SyncConfig {
        docs_path: docs_path.to_path_buf(),
        root_page,
        token: NotionToken::new("secret_test_token").unwrap(),
        prune: true,
        icons: true,
        verbose: false,
    }
}
