use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use url::Url;
use uuid::Uuid;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

/// Type aliases for specific ID types
pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;

impl<T> Id<T> {
    /// Parse various Notion ID formats into a normalized ID.
    ///
    /// Accepts a bare 32-character hex ID, a hyphenated UUID, or a Notion
    /// page URL such as `https://www.notion.so/acme/Docs-0123456789abcdef0123456789abcdef`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_notion_id(input)?;
        Ok(Self::from_normalized(normalized))
    }

    /// Create an ID from an already normalized string (internal use)
    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Create a new random v4 UUID ID
    pub fn new_v4() -> Self {
        let uuid = Uuid::new_v4();
        Self::from_normalized(uuid.as_simple().to_string())
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the ID with dashes for API calls
    pub fn to_hyphenated(&self) -> String {
        if self.value.len() == 32 && !self.value.contains('-') {
            format!(
                "{}-{}-{}-{}-{}",
                &self.value[0..8],
                &self.value[8..12],
                &self.value[12..16],
                &self.value[16..20],
                &self.value[20..32]
            )
        } else {
            self.value.clone()
        }
    }

    /// Reinterprets the ID as another kind.
    ///
    /// A child page shows up in block listings as a block whose ID is the
    /// page ID, so the same value is valid under both markers.
    pub fn cast<U>(self) -> Id<U> {
        Id::from_normalized(self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_hyphenated().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Normalize various Notion ID formats into a consistent format
fn normalize_notion_id(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::EmptyField("notion id"));
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        return extract_id_from_url(input);
    }

    if let Ok(uuid) = Uuid::parse_str(input) {
        return Ok(uuid.as_simple().to_string());
    }

    if input.len() != 32 {
        return Err(ValidationError::InvalidId(format!(
            "Invalid ID length: expected 32 characters, got {}",
            input.len()
        )));
    }

    if !input.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidId(
            "ID must contain only hexadecimal characters".to_string(),
        ));
    }

    Ok(input.to_lowercase())
}

/// Extract ID from a Notion URL.
///
/// Peek-view URLs (`?p=<id>`) point at the peeked page, not the one in the
/// path, so the query parameter is consulted first.
fn extract_id_from_url(raw: &str) -> Result<String, ValidationError> {
    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if let Some(id) = url
        .query_pairs()
        .find(|(key, _)| key == "p")
        .and_then(|(_, value)| trailing_id(&value))
    {
        return Ok(id);
    }

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .and_then(trailing_id)
        .ok_or_else(|| ValidationError::InvalidId(format!("No page ID found in URL: {}", raw)))
}

/// Pulls the 32-hex identifier off the end of a path segment like `Page-Title-<id>`.
fn trailing_id(segment: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref TRAILING_ID: Regex = Regex::new(r"(?:^|-)([0-9a-fA-F]{32})$")
            .expect("Failed to compile Notion ID regex - this is a bug in the code");
    }

    if let Ok(uuid) = Uuid::parse_str(segment) {
        return Some(uuid.as_simple().to_string());
    }

    TRAILING_ID
        .captures(segment)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_lowercase())
}
