// src/api/mod.rs
//! Notion API interaction: the ability to read and write pages in a workspace.
//!
//! Business logic depends on the [`NotionRepository`] trait, never on HTTP
//! details; [`NotionHttpClient`] is the production implementation.

pub mod client;
pub mod parser;
pub mod requests;
mod responses;
mod simple_pagination;

use crate::error::AppError;
use crate::model::Block;
use crate::types::{BlockId, PageId};

/// A page as returned by the retrieve-page endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePage {
    pub id: PageId,
    pub title: String,
    pub icon: Option<PageIcon>,
    pub archived: bool,
}

/// The icon shown next to a page title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageIcon {
    Emoji(String),
    /// An uploaded or external image.
    Image,
}

/// An existing child page, identified by title for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePageRef {
    pub id: PageId,
    pub title: String,
}

/// What a child block of a page is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteBlockKind {
    ChildPage { title: String },
    /// Any content block; carries the Notion block type.
    Content(String),
}

/// A direct child of a page as listed by the block-children endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBlock {
    pub id: BlockId,
    pub kind: RemoteBlockKind,
}

impl RemoteBlock {
    pub fn is_child_page(&self) -> bool {
        matches!(self.kind, RemoteBlockKind::ChildPage { .. })
    }

    /// The page reference for child-page blocks.
    pub fn as_page_ref(&self) -> Option<RemotePageRef> {
        match &self.kind {
            RemoteBlockKind::ChildPage { title } => Some(RemotePageRef {
                id: self.id.clone().cast(),
                title: title.clone(),
            }),
            RemoteBlockKind::Content(_) => None,
        }
    }
}

/// The ability to publish content into a Notion workspace.
///
/// This is the fundamental algebra for API interaction: the calls the sync
/// needs (list, create, append, archive, set icon) plus page lookup.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    async fn retrieve_page(&self, id: &PageId) -> Result<RemotePage, AppError>;

    /// All direct children of a page, in display order.
    async fn list_children(&self, parent: &PageId) -> Result<Vec<RemoteBlock>, AppError>;

    async fn create_page(
        &self,
        parent: &PageId,
        title: &str,
        icon: Option<&str>,
    ) -> Result<RemotePageRef, AppError>;

    /// Appends blocks at the end of the page. Callers pass at most
    /// [`crate::constants::MAX_BLOCKS_PER_APPEND`] blocks per call.
    async fn append_blocks(&self, page: &PageId, blocks: &[Block]) -> Result<(), AppError>;

    /// Archives a block; archiving a child-page block archives the page.
    async fn archive_block(&self, id: &BlockId) -> Result<(), AppError>;

    /// Replaces the icon of a page with an emoji.
    async fn set_page_icon(&self, page: &PageId, emoji: &str) -> Result<(), AppError>;

    /// Child pages of `parent`, in display order.
    async fn list_child_pages(&self, parent: &PageId) -> Result<Vec<RemotePageRef>, AppError> {
        let children = self.list_children(parent).await?;
        Ok(children.iter().filter_map(RemoteBlock::as_page_ref).collect())
    }
}

pub use client::NotionHttpClient;
