// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Most of these mirror limits imposed by the Notion API; the rest name the
//! conventions the sync applies to the local documentation tree.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL of the public Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Maximum number of blocks accepted by a single append-children request.
pub const MAX_BLOCKS_PER_APPEND: usize = 100;

/// Maximum characters in one rich text item's `content`.
pub const MAX_RICH_TEXT_CONTENT: usize = 2000;

/// Maximum rich text items in a single block's text array.
pub const MAX_RICH_TEXT_ITEMS: usize = 100;

/// Deepest heading level Notion can display; deeper headings are clamped.
pub const NOTION_MAX_HEADING_LEVEL: u8 = 3;

/// Per-request timeout for the HTTP client.
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Local tree conventions
// ---------------------------------------------------------------------------

/// File stem whose content is written to the enclosing directory's page.
pub const INDEX_FILE_STEM: &str = "index";

/// Extensions treated as Markdown.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd"];

/// Extensions treated as plain text. Files without an extension are plain text too.
pub const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Environment variable consulted when `--notion-token` is not given.
pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";

/// Name of the debug log written to the system temp directory.
pub const LOG_FILE_NAME: &str = "notion_docs_sync.log";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
