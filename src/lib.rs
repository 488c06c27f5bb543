// src/lib.rs
//! notion-docs-sync library: publishes a local documentation tree into Notion.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ErrorKind`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `SyncConfig`
//! - **Domain model** — `DocumentNode`, `Block`, `RichText`, etc.
//! - **Walking and conversion** — `walk_directory`, `convert_document`
//! - **API client** — `NotionRepository`, `NotionHttpClient`, request encoding
//! - **Sync** — `SyncOrchestrator`, `PageMapper`, `SyncReport`, `sync_docs`

mod analytics;
mod api;
mod config;
mod constants;
mod convert;
mod error;
mod model;
mod pipeline;
mod sync;
mod types;
mod walker;

// --- Error Handling ---
pub use crate::error::{AppError, ErrorKind, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, SyncArgs, SyncConfig};
pub use crate::constants::{
    LOG_FILE_NAME, MAX_BLOCKS_PER_APPEND, MAX_RICH_TEXT_CONTENT, NOTION_TOKEN_ENV,
};

// --- Domain Model ---
pub use crate::model::{page_title, Block, DirectoryNode, DocumentKind, DocumentNode, FileNode};

// --- Domain Types ---
pub use crate::types::{
    Annotations, BlockId, Id, NotionToken, PageId, RichText, TextSpan,
};

// --- Walking and Conversion ---
pub use crate::analytics::{measure_tree, TreeSummary};
pub use crate::convert::{
    convert_document, convert_markdown, convert_plain_text, notion_language, strip_front_matter,
};
pub use crate::walker::{classify_file, walk_directory, WalkOutcome, WalkWarning};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    requests::{
        append_children_body, create_page_body, encode_block, encode_rich_text, page_icon_body,
    },
    NotionHttpClient, NotionRepository, PageIcon, RemoteBlock, RemoteBlockKind, RemotePage,
    RemotePageRef,
};

// --- Sync ---
pub use crate::pipeline::sync_docs;
pub use crate::sync::{
    ChildPages, PageMapper, Resolution, SyncFailure, SyncOptions, SyncOrchestrator, SyncReport,
};
