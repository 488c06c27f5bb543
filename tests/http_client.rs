// tests/http_client.rs
//! The reqwest-backed repository against a mock Notion API.

use notion_docs_sync::{
    Block, BlockId, ErrorKind, NotionHttpClient, NotionRepository, NotionToken, PageId,
    RemoteBlockKind,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const PAGE: &str = "550e8400e29b41d4a716446655440000";
const PAGE_HYPHENATED: &str = "550e8400-e29b-41d4-a716-446655440000";

async fn setup() -> (MockServer, NotionHttpClient) {
    let server = MockServer::start().await;
    let token = NotionToken::new("secret_test_token").unwrap();
    let client = NotionHttpClient::with_base_url(&token, &server.uri()).unwrap();
    (server, client)
}

fn page_id() -> PageId {
    PageId::parse(PAGE).unwrap()
}

fn page_json(id: &str, title: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "archived": false,
        "icon": null,
        "properties": {
            "title": {
                "id": "title",
                "type": "title",
                "title": [{ "type": "text", "plain_text": title }]
            }
        }
    })
}

fn request_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn retrieve_page_sends_auth_and_version_headers() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path(format!("/pages/{}", PAGE_HYPHENATED)))
        .and(header("authorization", "Bearer secret_test_token"))
        .and(header("notion-version", "2022-06-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(PAGE_HYPHENATED, "Docs")))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.retrieve_page(&page_id()).await.unwrap();

    assert_eq!(page.id, page_id());
    assert_eq!(page.title, "Docs");
    assert!(!page.archived);
}

#[tokio::test]
async fn list_children_follows_cursors() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path(format!("/blocks/{}/children", PAGE_HYPHENATED)))
        .respond_with(|request: &Request| {
            let cursor = request
                .url
                .query_pairs()
                .find(|(key, _)| key == "start_cursor")
                .map(|(_, value)| value.into_owned());
            let body = match cursor.as_deref() {
                None => json!({
                    "object": "list",
                    "results": [
                        {
                            "object": "block",
                            "id": "11111111-1111-1111-1111-111111111111",
                            "type": "paragraph",
                            "paragraph": { "rich_text": [] }
                        },
                        {
                            "object": "block",
                            "id": "22222222-2222-2222-2222-222222222222",
                            "type": "child_page",
                            "child_page": { "title": "Guide" }
                        }
                    ],
                    "next_cursor": "cursor-2",
                    "has_more": true
                }),
                Some(_) => json!({
                    "object": "list",
                    "results": [
                        {
                            "object": "block",
                            "id": "33333333-3333-3333-3333-333333333333",
                            "type": "child_page",
                            "child_page": { "title": "Reference" }
                        }
                    ],
                    "next_cursor": null,
                    "has_more": false
                }),
            };
            ResponseTemplate::new(200).set_body_json(body)
        })
        .expect(2)
        .mount(&server)
        .await;

    let children = client.list_children(&page_id()).await.unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].kind, RemoteBlockKind::Content("paragraph".to_string()));

    assert!(children[1].is_child_page());
    assert_eq!(
        children[2].as_page_ref().map(|page| page.title),
        Some("Reference".to_string())
    );

    let requests = server.received_requests().await.unwrap();
    let queries: Vec<String> = requests
        .iter()
        .map(|r| r.url.query().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        queries,
        vec![
            "page_size=100".to_string(),
            "page_size=100&start_cursor=cursor-2".to_string()
        ]
    );
}

#[tokio::test]
async fn create_page_posts_parent_title_and_icon() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            "99999999-9999-9999-9999-999999999999",
            "Getting started",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .create_page(&page_id(), "Getting started", Some("📘"))
        .await
        .unwrap();
    assert_eq!(page.title, "Getting started");
    assert_eq!(page.id.as_str(), "99999999999999999999999999999999");

    let requests = server.received_requests().await.unwrap();
    let body = request_body(&requests[0]);
    assert_eq!(body["parent"]["page_id"], json!(PAGE_HYPHENATED));
    assert_eq!(
        body["properties"]["title"]["title"][0]["text"]["content"],
        json!("Getting started")
    );
    assert_eq!(body["icon"], json!({ "type": "emoji", "emoji": "📘" }));
}

#[tokio::test]
async fn append_blocks_patches_children_in_batches() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/blocks/{}/children", PAGE_HYPHENATED)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [],
            "next_cursor": null,
            "has_more": false
        })))
        .expect(2)
        .mount(&server)
        .await;

    let blocks: Vec<Block> = (0..150).map(|i| Block::paragraph(format!("p{}", i))).collect();
    client.append_blocks(&page_id(), &blocks).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sizes: Vec<usize> = requests
        .iter()
        .map(|r| request_body(r)["children"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![100, 50]);
    assert_eq!(
        request_body(&requests[1])["children"][0]["paragraph"]["rich_text"][0]["text"]["content"],
        json!("p100")
    );
}

#[tokio::test]
async fn archive_block_sends_delete() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/blocks/11111111-1111-1111-1111-111111111111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "block",
            "id": "11111111-1111-1111-1111-111111111111",
            "archived": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let block = BlockId::parse("11111111111111111111111111111111").unwrap();
    client.archive_block(&block).await.unwrap();
}

#[tokio::test]
async fn set_page_icon_patches_the_page() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/pages/{}", PAGE_HYPHENATED)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(PAGE_HYPHENATED, "Docs")))
        .expect(1)
        .mount(&server)
        .await;

    client.set_page_icon(&page_id(), "📗").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        request_body(&requests[0]),
        json!({ "icon": { "type": "emoji", "emoji": "📗" } })
    );
}

#[tokio::test]
async fn unauthorized_is_an_authentication_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error",
            "status": 401,
            "code": "unauthorized",
            "message": "API token is invalid."
        })))
        .mount(&server)
        .await;

    let err = client.retrieve_page(&page_id()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(err.is_fatal());
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID: 550e8400-e29b-41d4-a716-446655440000."
        })))
        .mount(&server)
        .await;

    let err = client.retrieve_page(&page_id()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn server_errors_are_api_errors() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client
        .append_blocks(&page_id(), &[Block::Divider])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(!err.is_fatal());
}
