//! Markdown → block conversion driven by `pulldown-cmark` events.

use super::languages::{notion_language, PLAIN_TEXT_LANGUAGE};
use crate::constants::NOTION_MAX_HEADING_LEVEL;
use crate::model::Block;
use crate::types::{Annotations, RichText, TextSpan};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::mem;
use url::Url;

/// Converts a Markdown document into page blocks.
///
/// YAML front matter is dropped. List items keep one level of children:
/// anything nested deeper is attached to the outermost item, in document order.
pub fn convert_markdown(source: &str) -> Vec<Block> {
    let body = strip_front_matter(source);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(body, options) {
        builder.handle(event);
    }
    builder.finish()
}

/// Returns the document without a leading `---` … `---` (or `...`) block.
pub fn strip_front_matter(source: &str) -> &str {
    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return source;
    };
    if first.trim_end() != "---" {
        return source;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return &source[offset..];
        }
    }

    // Unterminated: not front matter after all.
    source
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Quote,
    Item,
}

#[derive(Debug, Default)]
struct InlineStyle {
    strong: u32,
    emphasis: u32,
    strikethrough: u32,
}

#[derive(Debug)]
struct CodeState {
    language: &'static str,
    text: String,
}

#[derive(Debug)]
struct ImageState {
    url: String,
    alt: String,
}

#[derive(Debug)]
struct ItemState {
    ordered: bool,
    checked: Option<bool>,
    text: RichText,
    children: Vec<Block>,
    /// Set once a nested item forced this item out early.
    emitted: bool,
}

impl ItemState {
    fn into_block(self) -> Block {
        let ItemState {
            ordered,
            checked,
            text,
            children,
            ..
        } = self;
        match checked {
            Some(checked) => Block::ToDo {
                text,
                checked,
                children,
            },
            None if ordered => Block::NumberedItem { text, children },
            None => Block::BulletItem { text, children },
        }
    }
}

#[derive(Debug, Default)]
struct TableState {
    rows: Vec<Vec<RichText>>,
    row: Vec<RichText>,
}

/// Accumulates parser events into blocks.
#[derive(Debug, Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    /// Inline text of the leaf currently being read.
    text: RichText,
    style: InlineStyle,
    /// Destinations of open links; `None` for links Notion cannot store.
    links: Vec<Option<String>>,
    heading: Option<u8>,
    code: Option<CodeState>,
    image: Option<ImageState>,
    table: Option<TableState>,
    containers: Vec<Container>,
    quotes: Vec<RichText>,
    items: Vec<ItemState>,
    ordered_lists: Vec<bool>,
}

impl BlockBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => {
                self.flush_text();
                self.emit(Block::Divider);
            }
            Event::TaskListMarker(checked) => {
                if let Some(item) = self.items.last_mut() {
                    item.checked = Some(checked);
                }
            }
            Event::FootnoteReference(label) => self.push_text(&format!("[^{}]", label)),
            #[allow(unreachable_patterns)]
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.flush_text(),
            Tag::Heading { level, .. } => {
                self.flush_text();
                self.heading = Some(heading_level(level));
            }
            Tag::BlockQuote => {
                self.flush_text();
                self.containers.push(Container::Quote);
                self.quotes.push(RichText::new());
            }
            Tag::CodeBlock(kind) => {
                self.flush_text();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => notion_language(&info),
                    CodeBlockKind::Indented => PLAIN_TEXT_LANGUAGE,
                };
                self.code = Some(CodeState {
                    language,
                    text: String::new(),
                });
            }
            Tag::List(first_number) => {
                self.flush_text();
                if self.items.len() >= 2 {
                    self.emit_nested_item_early();
                }
                self.ordered_lists.push(first_number.is_some());
            }
            Tag::Item => {
                self.flush_text();
                let ordered = self.ordered_lists.last().copied().unwrap_or(false);
                self.containers.push(Container::Item);
                self.items.push(ItemState {
                    ordered,
                    checked: None,
                    text: RichText::new(),
                    children: Vec::new(),
                    emitted: false,
                });
            }
            Tag::Table(_) => {
                self.flush_text();
                self.table = Some(TableState::default());
            }
            Tag::Emphasis => self.style.emphasis += 1,
            Tag::Strong => self.style.strong += 1,
            Tag::Strikethrough => self.style.strikethrough += 1,
            Tag::Link { dest_url, .. } => self.links.push(storable_url(&dest_url)),
            Tag::Image { dest_url, .. } => {
                self.image = Some(ImageState {
                    url: dest_url.to_string(),
                    alt: String::new(),
                });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush_text(),
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                let text = mem::take(&mut self.text).trimmed();
                if !text.is_blank() {
                    self.emit(Block::Heading { level, text });
                }
            }
            TagEnd::BlockQuote => {
                self.flush_text();
                self.containers.pop();
                if let Some(text) = self.quotes.pop() {
                    let text = text.trimmed();
                    if !text.is_blank() {
                        self.emit(Block::Quote { text });
                    }
                }
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    let text = code
                        .text
                        .strip_suffix('\n')
                        .unwrap_or(&code.text)
                        .to_string();
                    self.emit(Block::Code {
                        language: code.language.to_string(),
                        text,
                    });
                }
            }
            TagEnd::List(_) => {
                self.ordered_lists.pop();
            }
            TagEnd::Item => self.end_item(),
            TagEnd::TableCell => {
                let cell = mem::take(&mut self.text).trimmed();
                if let Some(table) = self.table.as_mut() {
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    if !table.row.is_empty() {
                        let row = mem::take(&mut table.row);
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    if !table.rows.is_empty() {
                        self.emit(Block::Table {
                            has_column_header: true,
                            rows: table.rows,
                        });
                    }
                }
            }
            TagEnd::Emphasis => self.style.emphasis = self.style.emphasis.saturating_sub(1),
            TagEnd::Strong => self.style.strong = self.style.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.style.strikethrough = self.style.strikethrough.saturating_sub(1)
            }
            TagEnd::Link => {
                self.links.pop();
            }
            TagEnd::Image => self.end_image(),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_text();
        while !self.items.is_empty() {
            self.end_item();
        }
        self.blocks
    }

    fn annotations(&self) -> Annotations {
        Annotations {
            bold: self.style.strong > 0,
            italic: self.style.emphasis > 0,
            strikethrough: self.style.strikethrough > 0,
            code: false,
        }
    }

    fn current_link(&self) -> Option<String> {
        self.links.last().cloned().flatten()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.text.push_str(text);
        } else if let Some(image) = self.image.as_mut() {
            image.alt.push_str(text);
        } else {
            let span = TextSpan::styled(text, self.annotations(), self.current_link());
            self.text.push(span);
        }
    }

    fn push_inline_code(&mut self, code: &str) {
        if let Some(image) = self.image.as_mut() {
            image.alt.push_str(code);
            return;
        }
        let annotations = Annotations {
            code: true,
            ..self.annotations()
        };
        let span = TextSpan::styled(code, annotations, self.current_link());
        self.text.push(span);
    }

    /// Hands collected inline text to the innermost open container.
    fn flush_text(&mut self) {
        let text = mem::take(&mut self.text).trimmed();
        if text.is_blank() {
            return;
        }

        match self.containers.last().copied() {
            Some(Container::Quote) => {
                if let Some(quote) = self.quotes.last_mut() {
                    if !quote.is_empty() {
                        quote.push_plain("\n");
                    }
                    quote.extend(text);
                }
            }
            Some(Container::Item) => {
                let open_item = self
                    .items
                    .last_mut()
                    .filter(|item| item.text.is_empty() && !item.emitted);
                if let Some(item) = open_item {
                    item.text = text;
                } else {
                    self.emit(Block::Paragraph { text });
                }
            }
            None => self.emit(Block::Paragraph { text }),
        }
    }

    /// Places a finished block: under the outermost open list item, or at the top level.
    ///
    /// Quote text read so far goes out first so the block keeps its place in
    /// the document. A table cannot sit inside a list item (the append
    /// endpoint takes two levels of nesting), so it closes the list item and
    /// lands at the top level.
    fn emit(&mut self, block: Block) {
        self.flush_open_quotes();
        if matches!(block, Block::Table { .. }) {
            self.break_out_of_list();
        }
        match self.items.first_mut() {
            Some(outer) if !outer.emitted => outer.children.push(block),
            _ => self.blocks.push(block),
        }
    }

    /// Emits the pending text of every open quote as its own quote block.
    fn flush_open_quotes(&mut self) {
        let pending: Vec<RichText> = self
            .quotes
            .iter_mut()
            .map(mem::take)
            .map(RichText::trimmed)
            .filter(|text| !text.is_blank())
            .collect();
        for text in pending {
            match self.items.first_mut() {
                Some(outer) if !outer.emitted => outer.children.push(Block::Quote { text }),
                _ => self.blocks.push(Block::Quote { text }),
            }
        }
    }

    /// Emits the outermost open item as it stands; the rest of its content
    /// continues at the top level.
    fn break_out_of_list(&mut self) {
        let Some(outer) = self.items.first_mut() else {
            return;
        };
        if outer.emitted {
            return;
        }
        outer.emitted = true;
        let block = ItemState {
            ordered: outer.ordered,
            checked: outer.checked,
            text: mem::take(&mut outer.text),
            children: mem::take(&mut outer.children),
            emitted: true,
        }
        .into_block();
        self.blocks.push(block);
    }

    /// A list is opening inside an already nested item. Its entries will be
    /// flattened under the outermost item, so the nested item goes first to
    /// keep document order.
    fn emit_nested_item_early(&mut self) {
        let Some(item) = self.items.last_mut() else {
            return;
        };
        if item.emitted {
            return;
        }
        item.emitted = true;
        let block = ItemState {
            ordered: item.ordered,
            checked: item.checked,
            text: mem::take(&mut item.text),
            children: mem::take(&mut item.children),
            emitted: true,
        }
        .into_block();
        self.emit(block);
    }

    fn end_item(&mut self) {
        self.flush_text();
        let Some(item) = self.items.pop() else {
            return;
        };
        self.containers.pop();
        if !item.emitted {
            self.emit(item.into_block());
        }
    }

    fn end_image(&mut self) {
        let Some(image) = self.image.take() else {
            return;
        };

        let standalone = self.heading.is_none() && self.table.is_none();
        if standalone && is_web_url(&image.url) {
            self.flush_text();
            self.emit(Block::Image {
                url: image.url,
                caption: RichText::plain(image.alt.trim()),
            });
        } else {
            let raw = format!("![{}]({})", image.alt, image.url);
            let span = TextSpan::styled(raw, self.annotations(), self.current_link());
            self.text.push(span);
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    let level = match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    };
    if level > NOTION_MAX_HEADING_LEVEL {
        log::debug!(
            "h{} not supported in Notion, converting to h{}",
            level,
            NOTION_MAX_HEADING_LEVEL
        );
    }
    level.min(NOTION_MAX_HEADING_LEVEL)
}

fn is_web_url(dest: &str) -> bool {
    Url::parse(dest)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Notion only stores absolute link targets; relative ones stay plain text.
fn storable_url(dest: &str) -> Option<String> {
    match Url::parse(dest) {
        Ok(url) if matches!(url.scheme(), "http" | "https" | "mailto") => Some(dest.to_string()),
        _ => None,
    }
}
