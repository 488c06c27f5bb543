// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each error variant tells the story of what went wrong and where,
//! and [`ErrorKind`] folds them into the four kinds an operator cares
//! about: local filesystem, authentication, missing pages, and API trouble.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// Token is invalid or expired
    Unauthorized,
    /// Token lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::RestrictedResource,
            404 => Self::ObjectNotFound,
            409 => Self::Conflict,
            429 => Self::RateLimited,
            500 => Self::InternalError,
            503 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// The operator-facing classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Docs path missing or unreadable.
    FileSystem,
    /// Token rejected by Notion.
    Authentication,
    /// Root page (or another addressed object) does not resolve.
    NotFound,
    /// Any other Notion API failure: rate limiting, network, server error.
    Api,
    /// Invalid command line or environment.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem => write!(f, "filesystem error"),
            Self::Authentication => write!(f, "authentication error"),
            Self::NotFound => write!(f, "not found"),
            Self::Api => write!(f, "API error"),
            Self::Configuration => write!(f, "configuration error"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Filesystem error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Notion rejected the token: {message}")]
    Authentication { message: String },

    #[error("Notion {resource} not found or not shared with this token: {message}")]
    NotFound { resource: String, message: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Sync finished with {} failed item(s): {}", failures.len(), failures.join("; "))]
    SyncIncomplete { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Wraps an I/O failure with the path it concerns.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Builds the error for a Notion API error response.
    ///
    /// Authentication and not-found failures get their own variants so callers
    /// can tell them apart without inspecting codes.
    pub fn from_notion_response(
        status: reqwest::StatusCode,
        code: NotionErrorCode,
        message: String,
    ) -> Self {
        match code {
            NotionErrorCode::Unauthorized => AppError::Authentication { message },
            NotionErrorCode::ObjectNotFound => AppError::NotFound {
                resource: "object".to_string(),
                message,
            },
            code => AppError::NotionService {
                code,
                message,
                status,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::FileSystem { .. } => ErrorKind::FileSystem,
            AppError::Authentication { .. } => ErrorKind::Authentication,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::NetworkFailure(_)
            | AppError::NotionService { .. }
            | AppError::MalformedResponse(_)
            | AppError::SyncIncomplete { .. }
            | AppError::InternalError { .. } => ErrorKind::Api,
            AppError::MissingConfiguration(_) | AppError::Validation(_) => {
                ErrorKind::Configuration
            }
        }
    }

    /// Whether the failure invalidates the rest of the run, not just one subtree.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }
}
