// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations; parsing lives in `parser`.

use super::{parser, requests, simple_pagination, NotionRepository};
use super::{RemoteBlock, RemotePage, RemotePageRef};
use crate::constants::{
    HTTP_REQUEST_TIMEOUT_SECS, MAX_BLOCKS_PER_APPEND, NOTION_API_BASE_URL, NOTION_API_VERSION,
};
use crate::error::AppError;
use crate::model::Block;
use crate::types::{BlockId, NotionToken, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(token: &NotionToken) -> Result<Self, AppError> {
        Self::with_base_url(token, NOTION_API_BASE_URL)
    }

    /// Creates a client talking to `base_url` instead of the public API.
    pub fn with_base_url(token: &NotionToken, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(token: &NotionToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid Notion token format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        self.get_with_query(endpoint, &[]).await
    }

    pub async fn get_with_query(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Makes a PATCH request with JSON body to the specified endpoint.
    pub async fn patch<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("PATCH {}", url);
        Ok(self.client.patch(url).json(body).send().await?)
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("DELETE {}", url);
        Ok(self.client.delete(url).send().await?)
    }
}

#[async_trait::async_trait]
impl NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &PageId) -> Result<RemotePage, AppError> {
        let endpoint = format!("pages/{}", id.to_hyphenated());
        let response = self.get(&endpoint).await?;
        let result = extract_response_text(response).await?;
        parser::parse_page_response(result)
    }

    async fn list_children(&self, parent: &PageId) -> Result<Vec<RemoteBlock>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        simple_pagination::fetch_all_pages_simple(|page_size, cursor| {
            let endpoint = endpoint.clone();
            async move {
                let mut query = vec![("page_size", page_size.to_string())];
                if let Some(cursor) = cursor {
                    query.push(("start_cursor", cursor));
                }
                let response = self.get_with_query(&endpoint, &query).await?;
                let result = extract_response_text(response).await?;
                parser::parse_blocks_pagination(result)
            }
        })
        .await
    }

    async fn create_page(
        &self,
        parent: &PageId,
        title: &str,
        icon: Option<&str>,
    ) -> Result<RemotePageRef, AppError> {
        let body = requests::create_page_body(parent, title, icon);
        let response = self.post("pages", &body).await?;
        let result = extract_response_text(response).await?;
        let mut page = parser::parse_created_page(result)?;
        // The response title can lag behind the request; the requested one is authoritative
        page.title = title.to_string();
        Ok(page)
    }

    async fn append_blocks(&self, page: &PageId, blocks: &[Block]) -> Result<(), AppError> {
        if blocks.is_empty() {
            return Ok(());
        }
        let endpoint = format!("blocks/{}/children", page.to_hyphenated());
        for batch in blocks.chunks(MAX_BLOCKS_PER_APPEND) {
            let body = requests::append_children_body(batch);
            let response = self.patch(&endpoint, &body).await?;
            let result = extract_response_text(response).await?;
            parser::parse_empty_response(result)?;
        }
        Ok(())
    }

    async fn archive_block(&self, id: &BlockId) -> Result<(), AppError> {
        let endpoint = format!("blocks/{}", id.to_hyphenated());
        let response = self.delete(&endpoint).await?;
        let result = extract_response_text(response).await?;
        parser::parse_empty_response(result)
    }

    async fn set_page_icon(&self, page: &PageId, emoji: &str) -> Result<(), AppError> {
        let endpoint = format!("pages/{}", page.to_hyphenated());
        let body = requests::page_icon_body(emoji);
        let response = self.patch(&endpoint, &body).await?;
        let result = extract_response_text(response).await?;
        parser::parse_empty_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
