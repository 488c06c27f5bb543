// src/sync/mapper.rs
//! Maps local nodes onto existing Notion pages by title.

use crate::api::{NotionRepository, RemotePageRef};
use crate::error::AppError;
use crate::types::PageId;
use std::sync::Arc;

/// The child pages of one remote page, as listed at the start of a level.
#[derive(Debug, Clone, Default)]
pub struct ChildPages {
    pages: Vec<RemotePageRef>,
}

impl ChildPages {
    pub fn new(pages: Vec<RemotePageRef>) -> Self {
        Self { pages }
    }

    /// The first page whose title matches exactly.
    pub fn find(&self, title: &str) -> Option<&RemotePageRef> {
        self.pages.iter().find(|page| page.title == title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemotePageRef> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// How a local node found its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Existing(RemotePageRef),
    Created(RemotePageRef),
}

impl Resolution {
    pub fn page(&self) -> &RemotePageRef {
        match self {
            Resolution::Existing(page) | Resolution::Created(page) => page,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolution::Created(_))
    }
}

pub struct PageMapper {
    repository: Arc<dyn NotionRepository>,
}

impl PageMapper {
    pub fn new(repository: Arc<dyn NotionRepository>) -> Self {
        Self { repository }
    }

    /// Lists the child pages of `parent` (one paginated listing).
    pub async fn existing_children(&self, parent: &PageId) -> Result<ChildPages, AppError> {
        let pages = self.repository.list_child_pages(parent).await?;
        log::debug!("Page {} has {} child page(s)", parent, pages.len());
        Ok(ChildPages::new(pages))
    }

    /// Finds the page titled `title` among `existing`, creating it under `parent` when absent.
    pub async fn resolve(
        &self,
        parent: &PageId,
        existing: &ChildPages,
        title: &str,
        icon: Option<&str>,
    ) -> Result<Resolution, AppError> {
        if let Some(page) = existing.find(title) {
            log::debug!("Matched '{}' to page {}", title, page.id);
            return Ok(Resolution::Existing(page.clone()));
        }

        let page = self.repository.create_page(parent, title, icon).await?;
        log::info!("Created page '{}' ({})", title, page.id);
        Ok(Resolution::Created(page))
    }
}
