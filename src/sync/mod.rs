// src/sync/mod.rs
//! One-way sync of a walked documentation tree into Notion.
//!
//! Directories are processed one level at a time from an explicit work
//! stack. For each directory the child pages of its Notion page are listed
//! once; every local child is matched by title or created, files get their
//! content replaced, and subdirectories are pushed for a later visit.
//!
//! A failing node is recorded and its subtree skipped while siblings carry
//! on. Authentication failures end the run at once.

mod icons;
mod mapper;
mod report;

pub use icons::random_icon;
pub use mapper::{ChildPages, PageMapper, Resolution};
pub use report::{SyncFailure, SyncReport};

use crate::api::{NotionRepository, RemotePage};
use crate::constants::MAX_BLOCKS_PER_APPEND;
use crate::convert::convert_document;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{DirectoryNode, DocumentNode, FileNode};
use crate::types::PageId;
use std::collections::HashSet;
use std::sync::Arc;

/// Behaviour switches for a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Archive child pages that no longer have a local counterpart.
    pub prune: bool,
    /// Give new pages, and existing file pages without an icon, a random emoji.
    pub icons: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            prune: true,
            icons: true,
        }
    }
}

pub struct SyncOrchestrator {
    repository: Arc<dyn NotionRepository>,
    mapper: PageMapper,
    options: SyncOptions,
}

impl SyncOrchestrator {
    pub fn new(repository: Arc<dyn NotionRepository>, options: SyncOptions) -> Self {
        let mapper = PageMapper::new(Arc::clone(&repository));
        Self {
            repository,
            mapper,
            options,
        }
    }

    /// Syncs `root` (a directory) into the page `root_page`.
    ///
    /// Returns `Err` only when the run could not proceed at all: the root
    /// page is unreachable or the token was rejected. Per-node failures are
    /// collected in the report.
    pub async fn run(
        &self,
        root: &DocumentNode,
        root_page: &PageId,
    ) -> Result<SyncReport, AppError> {
        let DocumentNode::Directory(root_dir) = root else {
            return Err(AppError::InternalError {
                message: format!("sync root {} is not a directory", root.display_path()),
                source: None,
            });
        };

        let page = self.resolve_root(root_page).await?;
        log::info!("Syncing into root page '{}' ({})", page.title, page.id);

        let mut report = SyncReport::new();
        let mut stack: Vec<(&DirectoryNode, PageId)> = vec![(root_dir, page.id)];

        while let Some((directory, page_id)) = stack.pop() {
            match self.sync_directory(directory, &page_id, &mut report).await {
                Ok(subdirectories) => {
                    // Reversed so siblings are visited in name order
                    stack.extend(subdirectories.into_iter().rev());
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => report.record_failure(directory_path(directory), err),
            }
        }

        log::info!("Sync finished: {}", report);
        Ok(report)
    }

    async fn resolve_root(&self, root_page: &PageId) -> Result<RemotePage, AppError> {
        let page = self
            .repository
            .retrieve_page(root_page)
            .await
            .map_err(|err| match err {
                AppError::NotFound { message, .. } => root_not_found(root_page, message),
                AppError::NotionService {
                    code: NotionErrorCode::RestrictedResource,
                    message,
                    ..
                } => root_not_found(root_page, message),
                other => other,
            })?;

        if page.archived {
            return Err(root_not_found(root_page, "the page is archived".to_string()));
        }
        Ok(page)
    }

    /// Syncs the direct children of one directory and returns the
    /// subdirectories still to visit, paired with their pages.
    async fn sync_directory<'a>(
        &self,
        directory: &'a DirectoryNode,
        page: &PageId,
        report: &mut SyncReport,
    ) -> Result<Vec<(&'a DirectoryNode, PageId)>, AppError> {
        log::debug!("Syncing directory {}", directory_path(directory));

        if let Some(index) = directory.index_file() {
            if let Err(err) = self.populate(page, index, false, report).await {
                if err.is_fatal() {
                    return Err(err);
                }
                report.record_failure(index.path.display().to_string(), err);
            }
        }

        let existing = self.mapper.existing_children(page).await?;
        let mut kept: HashSet<PageId> = HashSet::new();
        let mut subdirectories = Vec::new();

        for child in directory.page_children() {
            let title = child.title();
            let icon = self.options.icons.then(random_icon);

            let resolution = match self.mapper.resolve(page, &existing, &title, icon).await {
                Ok(resolution) => resolution,
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    report.record_failure(child.display_path(), err);
                    continue;
                }
            };

            if resolution.was_created() {
                report.pages_created += 1;
            } else {
                report.pages_matched += 1;
            }
            let child_page = resolution.page().id.clone();
            kept.insert(child_page.clone());

            match child {
                DocumentNode::Directory(dir) => subdirectories.push((dir, child_page)),
                DocumentNode::File(file) => {
                    let fresh = resolution.was_created();
                    if let Err(err) = self.populate(&child_page, file, fresh, report).await {
                        if err.is_fatal() {
                            return Err(err);
                        }
                        report.record_failure(child.display_path(), err);
                    }
                }
            }
        }

        // Pages of unreadable entries stay; the walk reports those entries
        for title in &directory.unreadable {
            if let Some(page) = existing.find(title) {
                log::warn!("Leaving page '{}' untouched: its source could not be read", title);
                kept.insert(page.id.clone());
            }
        }

        if self.options.prune {
            self.prune(directory, &existing, &kept, report).await?;
        }

        Ok(subdirectories)
    }

    /// Replaces the content of `page` with the converted content of `file`.
    ///
    /// Child pages are left alone. A freshly created page has nothing to
    /// clear and already has its icon, so both lookups are skipped.
    async fn populate(
        &self,
        page: &PageId,
        file: &FileNode,
        fresh: bool,
        report: &mut SyncReport,
    ) -> Result<(), AppError> {
        let blocks = convert_document(&file.content, file.kind);

        if self.options.icons && !fresh {
            self.ensure_icon(page).await?;
        }

        if !fresh {
            let children = self.repository.list_children(page).await?;
            for block in children.iter().filter(|block| !block.is_child_page()) {
                self.repository.archive_block(&block.id).await?;
            }
        }

        for batch in blocks.chunks(MAX_BLOCKS_PER_APPEND) {
            self.repository.append_blocks(page, batch).await?;
        }

        log::info!(
            "Wrote {} block(s) from {}",
            blocks.len(),
            file.path.display()
        );
        report.files_populated += 1;
        report.blocks_written += blocks.len();
        Ok(())
    }

    /// Gives an existing page without any icon a random emoji.
    async fn ensure_icon(&self, page: &PageId) -> Result<(), AppError> {
        let current = self.repository.retrieve_page(page).await?;
        if current.icon.is_none() {
            let icon = random_icon();
            log::debug!("Setting icon {} on '{}'", icon, current.title);
            self.repository.set_page_icon(page, icon).await?;
        }
        Ok(())
    }

    /// Archives child pages of this level that no local node resolved to.
    async fn prune(
        &self,
        directory: &DirectoryNode,
        existing: &ChildPages,
        kept: &HashSet<PageId>,
        report: &mut SyncReport,
    ) -> Result<(), AppError> {
        for stale in existing.iter().filter(|page| !kept.contains(&page.id)) {
            let block = stale.id.clone().cast();
            match self.repository.archive_block(&block).await {
                Ok(()) => {
                    log::info!("Archived stale page '{}' ({})", stale.title, stale.id);
                    report.pages_archived += 1;
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => report.record_failure(
                    format!("{}/{}", directory_path(directory), stale.title),
                    err,
                ),
            }
        }
        Ok(())
    }
}

fn root_not_found(root_page: &PageId, message: String) -> AppError {
    AppError::NotFound {
        resource: format!("root page {}", root_page),
        message,
    }
}

fn directory_path(directory: &DirectoryNode) -> String {
    if directory.path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        directory.path.display().to_string()
    }
}
