//! Wire types for the subset of Notion API responses the sync reads.
//!
//! Only the fields the sync needs are modelled; serde ignores the rest, so
//! new fields in Notion's responses do not break parsing.

use super::{PageIcon, RemoteBlock, RemoteBlockKind, RemotePage, RemotePageRef};
use crate::error::AppError;
use crate::types::{BlockId, PageId};
use serde::Deserialize;
use std::collections::HashMap;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlainTextItem {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyObject {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Vec<PlainTextItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageObject {
    pub id: PageId,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
    #[serde(default)]
    pub properties: HashMap<String, PropertyObject>,
    pub icon: Option<IconObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildPageObject {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockObject {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: String,
    pub child_page: Option<ChildPageObject>,
}

pub type BlockChildrenResponse = PaginatedResponse<BlockObject>;

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl PageObject {
    /// Text of the page's title property, whatever it is named.
    fn title_text(&self) -> String {
        self.properties
            .values()
            .find(|property| property.kind == "title")
            .map(|property| {
                property
                    .title
                    .iter()
                    .map(|item| item.plain_text.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ToDomain<RemotePage> for PageObject {
    fn to_domain(self) -> Result<RemotePage, AppError> {
        let title = self.title_text();
        let icon = self.icon.map(|icon| match (icon.kind.as_str(), icon.emoji) {
            ("emoji", Some(emoji)) => PageIcon::Emoji(emoji),
            _ => PageIcon::Image,
        });
        Ok(RemotePage {
            id: self.id,
            title,
            icon,
            archived: self.archived || self.in_trash,
        })
    }
}

impl ToDomain<RemotePageRef> for PageObject {
    fn to_domain(self) -> Result<RemotePageRef, AppError> {
        let title = self.title_text();
        Ok(RemotePageRef { id: self.id, title })
    }
}

impl ToDomain<RemoteBlock> for BlockObject {
    fn to_domain(self) -> Result<RemoteBlock, AppError> {
        let kind = if self.kind == "child_page" {
            let child_page = self.child_page.ok_or_else(|| {
                AppError::MalformedResponse(format!(
                    "child_page block {} has no child_page payload",
                    self.id
                ))
            })?;
            RemoteBlockKind::ChildPage {
                title: child_page.title,
            }
        } else {
            RemoteBlockKind::Content(self.kind)
        };
        Ok(RemoteBlock { id: self.id, kind })
    }
}
