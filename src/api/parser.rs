// src/api/parser.rs
//! Response parsing for the Notion API.
//!
//! Successful bodies are deserialized into the wire types in `responses`;
//! error bodies are turned into [`AppError`] values.

use super::client::ApiResponse;
use super::responses::{BlockChildrenResponse, NotionError, PageObject, PaginatedResponse, ToDomain};
use super::{RemoteBlock, RemotePage, RemotePageRef};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use reqwest::StatusCode;

/// Parse any Notion API response, mapping error statuses to [`AppError`].
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, body_preview(body)))
    })
}

fn parse_error<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion returned {} ({}) for {}: {}",
            notion_error.status,
            notion_error.code,
            url,
            notion_error.message
        );
        return Err(AppError::from_notion_response(
            status,
            NotionErrorCode::from_api_response(&notion_error.code),
            notion_error.message,
        ));
    }

    // Fallback on the HTTP status when the body is not a Notion error object
    Err(AppError::from_notion_response(
        status,
        NotionErrorCode::from_http_status(status.as_u16()),
        format!("HTTP {} from {}: {}", status, url, body_preview(body)),
    ))
}

fn body_preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", preview)
    } else {
        body.to_string()
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<RemotePage, AppError> {
    let page: PageObject = parse_api_response(result)?;
    ToDomain::to_domain(page)
}

/// Parses the page returned by the create-page endpoint.
pub fn parse_created_page(result: ApiResponse<String>) -> Result<RemotePageRef, AppError> {
    let page: PageObject = parse_api_response(result)?;
    ToDomain::to_domain(page)
}

/// Parses one page of the block-children listing.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<RemoteBlock>, AppError> {
    let response: BlockChildrenResponse = parse_api_response(result)?;
    let results = response
        .results
        .into_iter()
        .map(ToDomain::to_domain)
        .collect::<Result<Vec<RemoteBlock>, AppError>>()?;

    Ok(PaginatedResponse {
        results,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Checks the status of a response whose body is not needed.
pub fn parse_empty_response(result: ApiResponse<String>) -> Result<(), AppError> {
    let _: serde_json::Value = parse_api_response(result)?;
    Ok(())
}
