// src/api/requests.rs
//! Request bodies for the write endpoints of the Notion API.
//!
//! Blocks are encoded into the JSON shape of the append-children endpoint.
//! Text longer than Notion accepts in one rich text item is split across
//! several items.

use crate::constants::{MAX_RICH_TEXT_CONTENT, MAX_RICH_TEXT_ITEMS};
use crate::model::Block;
use crate::types::{PageId, RichText, TextSpan};
use serde_json::{json, Value};

/// Body of `POST /pages` creating a child page of `parent`.
pub fn create_page_body(parent: &PageId, title: &str, icon: Option<&str>) -> Value {
    let mut body = json!({
        "parent": { "page_id": parent.to_hyphenated() },
        "properties": {
            "title": { "title": encode_rich_text(&RichText::plain(title)) }
        }
    });
    if let Some(emoji) = icon {
        body["icon"] = json!({ "type": "emoji", "emoji": emoji });
    }
    body
}

/// Body of `PATCH /pages/{id}` setting an emoji icon.
pub fn page_icon_body(emoji: &str) -> Value {
    json!({ "icon": { "type": "emoji", "emoji": emoji } })
}

/// Body of `PATCH /blocks/{id}/children`.
pub fn append_children_body(blocks: &[Block]) -> Value {
    json!({ "children": blocks.iter().map(encode_block).collect::<Vec<_>>() })
}

/// Encodes one block, children included.
pub fn encode_block(block: &Block) -> Value {
    let block_type = block.block_type();
    let content = match block {
        Block::Heading { text, .. } | Block::Paragraph { text } | Block::Quote { text } => {
            json!({ "rich_text": encode_rich_text(text) })
        }
        Block::BulletItem { text, children } | Block::NumberedItem { text, children } => {
            with_children(json!({ "rich_text": encode_rich_text(text) }), children)
        }
        Block::ToDo {
            text,
            checked,
            children,
        } => with_children(
            json!({ "rich_text": encode_rich_text(text), "checked": checked }),
            children,
        ),
        Block::Code { language, text } => json!({
            "rich_text": encode_rich_text(&RichText::plain(text.as_str())),
            "language": language,
        }),
        Block::Divider => json!({}),
        Block::Image { url, caption } => json!({
            "type": "external",
            "external": { "url": url },
            "caption": encode_rich_text(caption),
        }),
        Block::Table {
            has_column_header,
            rows,
        } => encode_table(*has_column_header, rows),
    };

    let mut value = json!({ "object": "block", "type": block_type });
    value[block_type] = content;
    value
}

fn with_children(mut content: Value, children: &[Block]) -> Value {
    if !children.is_empty() {
        content["children"] = Value::Array(children.iter().map(encode_block).collect());
    }
    content
}

fn encode_table(has_column_header: bool, rows: &[Vec<RichText>]) -> Value {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let empty = RichText::new();

    let rows: Vec<Value> = rows
        .iter()
        .map(|row| {
            // Every row must have exactly `table_width` cells
            let cells: Vec<Vec<Value>> = (0..width)
                .map(|i| encode_rich_text(row.get(i).unwrap_or(&empty)))
                .collect();
            json!({
                "object": "block",
                "type": "table_row",
                "table_row": { "cells": cells },
            })
        })
        .collect();

    json!({
        "table_width": width,
        "has_column_header": has_column_header,
        "has_row_header": false,
        "children": rows,
    })
}

/// Encodes rich text as Notion text items.
///
/// Spans longer than the per-item limit are split on character boundaries.
/// Items past the per-block limit are dropped with a warning.
pub fn encode_rich_text(text: &RichText) -> Vec<Value> {
    let mut items: Vec<Value> = text
        .spans()
        .iter()
        .flat_map(|span| {
            split_content(&span.content)
                .into_iter()
                .map(move |chunk| encode_span(span, chunk))
        })
        .collect();

    if items.len() > MAX_RICH_TEXT_ITEMS {
        log::warn!(
            "Rich text has {} items; keeping the first {}",
            items.len(),
            MAX_RICH_TEXT_ITEMS
        );
        items.truncate(MAX_RICH_TEXT_ITEMS);
    }
    items
}

fn encode_span(span: &TextSpan, content: String) -> Value {
    let link = span.link.as_ref().map(|url| json!({ "url": url }));
    json!({
        "type": "text",
        "text": { "content": content, "link": link },
        "annotations": {
            "bold": span.annotations.bold,
            "italic": span.annotations.italic,
            "strikethrough": span.annotations.strikethrough,
            "underline": false,
            "code": span.annotations.code,
            "color": "default",
        },
    })
}

fn split_content(content: &str) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(MAX_RICH_TEXT_CONTENT)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
